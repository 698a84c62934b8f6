pub mod feature;
pub mod record;

pub use feature::{
    AnnotatedFeature, Annotations, FeatureLocation, LocationOperator, LocationPart, Qualifiers,
    SeqFeature,
};
pub use record::{Features, GenomeRecord, IntoSeqRecord, SeqRecord};
