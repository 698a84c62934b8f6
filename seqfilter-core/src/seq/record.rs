use crate::seq::feature::{AnnotatedFeature, Annotations, SeqFeature};
use std::slice;

/// A raw record as handed over by an upstream parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: Box<str>,
    pub desc: Option<Box<str>>,
    pub features: Vec<SeqFeature>,
    pub annotations: Annotations,
}

impl SeqRecord {
    pub fn new(id: impl Into<Box<str>>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_desc(mut self, desc: impl Into<Box<str>>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_features(mut self, features: Vec<SeqFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn features(&self) -> &[SeqFeature] {
        &self.features
    }
}

/// Anything exposing an id and an ordered feature collection.
pub trait IntoSeqRecord {
    fn into_seq_record(self) -> SeqRecord;
}

impl IntoSeqRecord for SeqRecord {
    fn into_seq_record(self) -> SeqRecord {
        self
    }
}

impl<I: Into<Box<str>>> IntoSeqRecord for (I, Vec<SeqFeature>) {
    fn into_seq_record(self) -> SeqRecord {
        SeqRecord::new(self.0).with_features(self.1)
    }
}

/// A record whose features have been merged/split, sorted and annotated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenomeRecord {
    id: Box<str>,
    desc: Option<Box<str>>,
    features: Vec<AnnotatedFeature>,
    annotations: Annotations,
}

impl GenomeRecord {
    pub(crate) fn new(
        id: Box<str>,
        desc: Option<Box<str>>,
        features: Vec<AnnotatedFeature>,
        annotations: Annotations,
    ) -> Self {
        Self {
            id,
            desc,
            features,
            annotations,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// All features in normalized order.
    pub fn features(&self) -> &[AnnotatedFeature] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Lazily yields features of `feature_type` (or all of them for `None`)
    /// in normalized order. Every call starts from the first feature.
    ///
    /// An empty type string is treated like `None`.
    pub fn get_features<'a>(&'a self, feature_type: Option<&'a str>) -> Features<'a> {
        Features {
            inner: self.features.iter(),
            feature_type: feature_type.filter(|ty| !ty.is_empty()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Features<'a> {
    inner: slice::Iter<'a, AnnotatedFeature>,
    feature_type: Option<&'a str>,
}

impl<'a> Features<'a> {
    fn matches(&self, feature: &AnnotatedFeature) -> bool {
        match self.feature_type {
            Some(ty) => feature.feature_type() == ty,
            None => true,
        }
    }
}

impl<'a> Iterator for Features<'a> {
    type Item = &'a AnnotatedFeature;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let feature = self.inner.next()?;
            if self.matches(feature) {
                return Some(feature);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.feature_type {
            Some(_) => (0, Some(self.inner.len())),
            None => self.inner.size_hint(),
        }
    }
}

impl<'a> DoubleEndedIterator for Features<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            let feature = self.inner.next_back()?;
            if self.matches(feature) {
                return Some(feature);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::feature::FeatureLocation;

    fn feature(ty: &str, start: usize, end: usize) -> SeqFeature {
        SeqFeature::new(ty, FeatureLocation::new(start, end, Some(1)).unwrap()).unwrap()
    }

    #[test]
    fn seq_record_builder() {
        let mut ann = Annotations::new();
        ann.insert("organism".into(), vec!["Escherichia coli".into()]);
        let record = SeqRecord::new("contig_1")
            .with_desc("chromosome")
            .with_features(vec![feature("CDS", 0, 9)])
            .with_annotations(ann.clone());
        assert_eq!(record.id(), "contig_1");
        assert_eq!(record.desc(), Some("chromosome"));
        assert_eq!(record.features().len(), 1);
        assert_eq!(record.annotations, ann);
    }

    #[test]
    fn tuple_converts_into_record() {
        let record = ("contig_2", vec![feature("tRNA", 5, 80)]).into_seq_record();
        assert_eq!(record.id(), "contig_2");
        assert_eq!(record.desc(), None);
        assert_eq!(record.features()[0].feature_type(), "tRNA");
    }
}
