use crate::filter::config::FilterConfig;
use crate::seq::feature::{FeatureLocation, LocationPart, SeqFeature};
use log::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Parts collapse into one contiguous span.
    Merge,
    /// Parts far apart become separate features.
    Split,
}

/// Largest gap between adjacent parts, ordered by coordinate.
///
/// Each gap is `next.start - prev.end`, floored at 0 for overlapping parts.
/// Fewer than two parts give 0.
pub fn distance_between(parts: &[LocationPart]) -> usize {
    sorted_parts(parts)
        .windows(2)
        .map(|w| gap(&w[0], &w[1]))
        .max()
        .unwrap_or(0)
}

fn gap(prev: &LocationPart, next: &LocationPart) -> usize {
    next.start().saturating_sub(prev.end())
}

fn sorted_parts(parts: &[LocationPart]) -> Vec<LocationPart> {
    let mut sorted = parts.to_vec();
    sorted.sort_by_key(|p| (p.start(), p.end()));
    sorted
}

/// Cuts the sorted parts wherever an adjacent gap reaches `cutoff` and
/// returns one covering span per group, lowest coordinates first.
fn cluster_spans(parts: &[LocationPart], cutoff: usize) -> Vec<LocationPart> {
    let mut spans = Vec::new();
    let mut current: Vec<LocationPart> = Vec::new();
    for part in sorted_parts(parts) {
        if let Some(prev) = current.last() {
            if gap(prev, &part) >= cutoff {
                spans.extend(LocationPart::span(&current));
                current.clear();
            }
        }
        current.push(part);
    }
    spans.extend(LocationPart::span(&current));
    spans
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationResolver {
    cutoff_distance: usize,
}

impl LocationResolver {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            cutoff_distance: config.cutoff_distance,
        }
    }

    pub fn cutoff_distance(&self) -> usize {
        self.cutoff_distance
    }

    pub fn decide(&self, parts: &[LocationPart]) -> Resolution {
        if distance_between(parts) < self.cutoff_distance {
            Resolution::Merge
        } else {
            Resolution::Split
        }
    }

    /// Merges or splits a multi-part feature in place.
    ///
    /// On merge the feature's location becomes its hull and nothing is
    /// returned. On split the feature keeps the lowest group of parts and a
    /// copy is returned for every further group. Either way the resulting
    /// locations are single-part, so the join operator is cleared.
    pub fn resolve(&self, feature: &mut SeqFeature) -> Vec<SeqFeature> {
        let parts = feature.location().parts().to_vec();
        match self.decide(&parts) {
            Resolution::Merge => {
                trace!(
                    "merging {} {} ({} parts)",
                    feature.feature_type(),
                    feature.location(),
                    parts.len()
                );
                let hull = feature.location().hull();
                feature.set_location(FeatureLocation::from(hull));
                Vec::new()
            }
            Resolution::Split => {
                let mut spans = cluster_spans(&parts, self.cutoff_distance).into_iter();
                let Some(first) = spans.next() else {
                    return Vec::new();
                };
                let derived: Vec<SeqFeature> = spans
                    .map(|span| {
                        let mut copy = feature.clone();
                        copy.set_location(FeatureLocation::from(span));
                        copy
                    })
                    .collect();
                trace!(
                    "splitting {} {} into {} features",
                    feature.feature_type(),
                    feature.location(),
                    derived.len() + 1
                );
                feature.set_location(FeatureLocation::from(first));
                derived
            }
        }
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
