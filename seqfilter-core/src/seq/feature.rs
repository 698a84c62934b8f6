use crate::error::{FilterError, FilterResult};
use std::collections::HashMap;
use std::fmt;

pub type Qualifiers = HashMap<Box<str>, Vec<Box<str>>>;
pub type Annotations = HashMap<Box<str>, Vec<Box<str>>>;

/// One contiguous, 0-based half-open span `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocationPart {
    start: usize,
    end: usize,
    strand: Option<i8>,
}

impl LocationPart {
    pub fn new(start: usize, end: usize, strand: Option<i8>) -> FilterResult<Self> {
        if start > end {
            return Err(FilterError::InvalidLocation { start, end });
        }
        if let Some(strand) = strand {
            if strand != -1 && strand != 1 {
                return Err(FilterError::InvalidStrand { strand });
            }
        }
        Ok(Self { start, end, strand })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn strand(&self) -> Option<i8> {
        self.strand
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest part covering every one of `parts`; the strand survives only
    /// when all parts share it.
    pub fn span(parts: &[LocationPart]) -> Option<Self> {
        let first = parts.first()?;
        let mut out = *first;
        for part in &parts[1..] {
            out.start = out.start.min(part.start);
            out.end = out.end.max(part.end);
            if out.strand != part.strand {
                out.strand = None;
            }
        }
        Some(out)
    }
}

impl fmt::Display for LocationPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strand = match self.strand {
            Some(1) => '+',
            Some(-1) => '-',
            _ => '?',
        };
        write!(f, "[{}:{}]({strand})", self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LocationOperator {
    #[default]
    None,
    /// Discontinuous location made of several parts, e.g. a spliced gene.
    Join,
}

/// A feature location: one or more parts plus the operator combining them.
///
/// The operator is `Join` exactly when there is more than one part.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeatureLocation {
    parts: Vec<LocationPart>,
    operator: LocationOperator,
}

impl FeatureLocation {
    pub fn new(start: usize, end: usize, strand: Option<i8>) -> FilterResult<Self> {
        Ok(Self::from(LocationPart::new(start, end, strand)?))
    }

    /// Builds a location from parts in the order given (biological order).
    pub fn join(parts: Vec<LocationPart>) -> FilterResult<Self> {
        if parts.is_empty() {
            return Err(FilterError::EmptyLocation);
        }
        let operator = if parts.len() > 1 {
            LocationOperator::Join
        } else {
            LocationOperator::None
        };
        Ok(Self { parts, operator })
    }

    pub fn parts(&self) -> &[LocationPart] {
        &self.parts
    }

    pub fn operator(&self) -> LocationOperator {
        self.operator
    }

    pub fn is_join(&self) -> bool {
        self.operator == LocationOperator::Join
    }

    /// Lowest start over all parts.
    pub fn start(&self) -> usize {
        self.parts.iter().map(|p| p.start).min().unwrap_or(0)
    }

    /// Highest end over all parts.
    pub fn end(&self) -> usize {
        self.parts.iter().map(|p| p.end).max().unwrap_or(0)
    }

    /// Common strand of all parts, `None` if they disagree.
    pub fn strand(&self) -> Option<i8> {
        let first = self.parts.first()?.strand;
        if self.parts.iter().all(|p| p.strand == first) {
            first
        } else {
            None
        }
    }

    pub fn is_reverse(&self) -> bool {
        self.strand() == Some(-1)
    }

    /// The single part spanning every part of this location.
    pub fn hull(&self) -> LocationPart {
        LocationPart::span(&self.parts).unwrap_or(LocationPart {
            start: 0,
            end: 0,
            strand: None,
        })
    }

    pub fn len(&self) -> usize {
        self.end().saturating_sub(self.start())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<LocationPart> for FeatureLocation {
    fn from(part: LocationPart) -> Self {
        Self {
            parts: vec![part],
            operator: LocationOperator::None,
        }
    }
}

impl fmt::Display for FeatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [part] = self.parts.as_slice() {
            return write!(f, "{part}");
        }
        f.write_str("join{")?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str("}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeqFeature {
    location: FeatureLocation,
    feature_type: Box<str>,
    qualifiers: Qualifiers,
}

impl SeqFeature {
    pub fn new(feature_type: impl Into<Box<str>>, location: FeatureLocation) -> FilterResult<Self> {
        let feature_type = feature_type.into();
        if feature_type.is_empty() {
            return Err(FilterError::InvalidFeatureType);
        }
        Ok(Self {
            location,
            feature_type,
            qualifiers: Qualifiers::new(),
        })
    }

    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    pub fn with_qualifier<V: Into<Box<str>>>(
        mut self,
        key: impl Into<Box<str>>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.qualifiers
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn location(&self) -> &FeatureLocation {
        &self.location
    }

    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    /// Values of `key` joined by a single space.
    pub fn qualifier_joined(&self, key: &str) -> Option<String> {
        self.qualifiers.get(key).map(|values| values.join(" "))
    }

    pub fn set_location(&mut self, location: FeatureLocation) {
        self.location = location;
    }
}

/// A normalized feature with its derived display fields.
///
/// `start` and `stop` are 1-based and inclusive. On the reverse strand they
/// are swapped, so `start > stop` marks reverse orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedFeature {
    feature: SeqFeature,
    id: Box<str>,
    function: Box<str>,
    start: usize,
    stop: usize,
}

impl AnnotatedFeature {
    pub(crate) fn new(
        feature: SeqFeature,
        id: Box<str>,
        function: Box<str>,
        start: usize,
        stop: usize,
    ) -> Self {
        Self {
            feature,
            id,
            function,
            start,
            stop,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn feature_type(&self) -> &str {
        self.feature.feature_type()
    }

    pub fn location(&self) -> &FeatureLocation {
        self.feature.location()
    }

    pub fn qualifiers(&self) -> &Qualifiers {
        self.feature.qualifiers()
    }

    pub fn strand(&self) -> Option<i8> {
        self.feature.location().strand()
    }

    pub fn is_reverse(&self) -> bool {
        self.feature.location().is_reverse()
    }

    pub fn feature(&self) -> &SeqFeature {
        &self.feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(start: usize, end: usize, strand: Option<i8>) -> LocationPart {
        LocationPart::new(start, end, strand).unwrap()
    }

    #[test]
    fn location_part_validation() {
        assert!(LocationPart::new(5, 2, None).is_err());
        assert!(LocationPart::new(0, 1, Some(0)).is_err());
        assert!(LocationPart::new(0, 1, Some(2)).is_err());
        assert_eq!(
            LocationPart::new(5, 2, None).unwrap_err(),
            FilterError::InvalidLocation { start: 5, end: 2 }
        );
    }

    #[test]
    fn location_part_basics() {
        let loc = part(2, 5, Some(1));
        assert_eq!(loc.start(), 2);
        assert_eq!(loc.end(), 5);
        assert_eq!(loc.strand(), Some(1));
        assert_eq!(loc.len(), 3);
        assert!(!loc.is_empty());
    }

    #[test]
    fn join_requires_parts() {
        assert_eq!(
            FeatureLocation::join(Vec::new()).unwrap_err(),
            FilterError::EmptyLocation
        );
    }

    #[test]
    fn single_part_join_has_no_operator() {
        let loc = FeatureLocation::join(vec![part(0, 10, Some(1))]).unwrap();
        assert_eq!(loc.operator(), LocationOperator::None);
        assert!(!loc.is_join());
    }

    #[test]
    fn compound_location_span_and_strand() {
        let loc = FeatureLocation::join(vec![part(300, 400, Some(-1)), part(100, 200, Some(-1))])
            .unwrap();
        assert!(loc.is_join());
        assert_eq!(loc.start(), 100);
        assert_eq!(loc.end(), 400);
        assert_eq!(loc.strand(), Some(-1));
        assert_eq!(loc.hull(), part(100, 400, Some(-1)));
        assert_eq!(loc.len(), 300);
    }

    #[test]
    fn mixed_strand_has_no_common_strand() {
        let loc =
            FeatureLocation::join(vec![part(0, 10, Some(1)), part(20, 30, Some(-1))]).unwrap();
        assert_eq!(loc.strand(), None);
        assert!(!loc.is_reverse());
    }

    #[test]
    fn location_display() {
        assert_eq!(
            FeatureLocation::new(100, 200, Some(1)).unwrap().to_string(),
            "[100:200](+)"
        );
        assert_eq!(
            FeatureLocation::new(100, 200, Some(-1)).unwrap().to_string(),
            "[100:200](-)"
        );
        assert_eq!(
            FeatureLocation::new(0, 5, None).unwrap().to_string(),
            "[0:5](?)"
        );
        let joined =
            FeatureLocation::join(vec![part(0, 10, Some(1)), part(20, 30, Some(1))]).unwrap();
        assert_eq!(joined.to_string(), "join{[0:10](+), [20:30](+)}");
    }

    #[test]
    fn seq_feature_basics() {
        let loc = FeatureLocation::new(0, 3, Some(1)).unwrap();
        let mut quals = Qualifiers::new();
        quals.insert("gene".into(), vec!["abc".into()]);
        let feat = SeqFeature::new("gene", loc)
            .unwrap()
            .with_qualifiers(quals.clone());
        assert_eq!(feat.feature_type(), "gene");
        assert_eq!(feat.qualifiers(), &quals);
        assert!(SeqFeature::new("", FeatureLocation::new(0, 1, None).unwrap()).is_err());
    }

    #[test]
    fn qualifier_values_are_space_joined() {
        let feat = SeqFeature::new("CDS", FeatureLocation::new(0, 3, Some(1)).unwrap())
            .unwrap()
            .with_qualifier("product", ["phage", "integrase"]);
        assert_eq!(
            feat.qualifier_joined("product").as_deref(),
            Some("phage integrase")
        );
        assert_eq!(feat.qualifier_joined("locus_tag"), None);
    }
}
