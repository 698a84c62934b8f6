use crate::filter::config::FilterConfig;
use crate::filter::resolve::LocationResolver;
use crate::seq::feature::{AnnotatedFeature, SeqFeature};
use crate::seq::record::{GenomeRecord, SeqRecord};
use log::debug;

const LOCUS_TAG: &str = "locus_tag";
const PRODUCT: &str = "product";
const UNKNOWN_FUNCTION: &str = "unknown";

/// Turns raw records into normalized ones: merge/split of joined locations,
/// a stable coordinate sort, then derivation of id/function/start/stop.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureNormalizer {
    resolver: LocationResolver,
}

impl FeatureNormalizer {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            resolver: LocationResolver::new(config),
        }
    }

    pub fn normalize(&self, record: SeqRecord) -> GenomeRecord {
        let SeqRecord {
            id,
            desc,
            features,
            annotations,
        } = record;
        let before = features.len();
        let features = self.normalize_features(features);
        debug!(
            "normalized record {id}: {before} features in, {} out",
            features.len()
        );
        GenomeRecord::new(id, desc, features, annotations)
    }

    pub fn normalize_features(&self, features: Vec<SeqFeature>) -> Vec<AnnotatedFeature> {
        let mut resolved = self.resolve_joins(features);
        resolved.sort_by_key(span_key);
        resolved.into_iter().map(annotate).collect()
    }

    /// Resolved originals keep their positions; split-off copies follow them.
    fn resolve_joins(&self, features: Vec<SeqFeature>) -> Vec<SeqFeature> {
        let mut out = Vec::with_capacity(features.len());
        let mut derived = Vec::new();
        for mut feature in features {
            if feature.location().is_join() {
                derived.extend(self.resolver.resolve(&mut feature));
            }
            out.push(feature);
        }
        out.append(&mut derived);
        out
    }
}

fn span_key(feature: &SeqFeature) -> (usize, usize) {
    let loc = feature.location();
    let (start, end) = (loc.start(), loc.end());
    (start.min(end), start.max(end))
}

/// Derives the display fields of a feature.
///
/// `id` falls back to the location text and `function` to `"unknown"`.
/// Coordinates go from 0-based half-open to 1-based inclusive and are
/// swapped on the reverse strand.
///
/// A zero-length span `[n, n)` comes out as `start = n + 1, stop = n` on
/// every strand, so its orientation must be read from
/// [`AnnotatedFeature::is_reverse`] rather than from `start > stop`.
pub fn annotate(feature: SeqFeature) -> AnnotatedFeature {
    let id = feature
        .qualifier_joined(LOCUS_TAG)
        .unwrap_or_else(|| feature.location().to_string());
    let function = feature
        .qualifier_joined(PRODUCT)
        .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());
    let mut start = feature.location().start() + 1;
    let mut stop = feature.location().end();
    if feature.location().is_reverse() {
        std::mem::swap(&mut start, &mut stop);
    }
    AnnotatedFeature::new(feature, id.into(), function.into(), start, stop)
}
