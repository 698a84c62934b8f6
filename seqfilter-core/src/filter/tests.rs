use super::*;
use crate::error::FilterError;
use crate::seq::feature::{FeatureLocation, LocationOperator, LocationPart, SeqFeature};
use crate::seq::record::SeqRecord;
use proptest::prelude::*;
use std::collections::HashMap;

fn part(start: usize, end: usize, strand: Option<i8>) -> LocationPart {
    LocationPart::new(start, end, strand).unwrap()
}

fn simple(ty: &str, start: usize, end: usize, strand: Option<i8>, tag: &str) -> SeqFeature {
    SeqFeature::new(ty, FeatureLocation::new(start, end, strand).unwrap())
        .unwrap()
        .with_qualifier("locus_tag", [tag])
}

fn joined(parts: Vec<LocationPart>, tag: &str) -> SeqFeature {
    SeqFeature::new("CDS", FeatureLocation::join(parts).unwrap())
        .unwrap()
        .with_qualifier("locus_tag", [tag])
        .with_qualifier("product", ["phage", "tail", "fiber"])
}

// ─── record index ───────────────────────────────────────────

#[test]
fn duplicate_ids_keep_all_records() {
    let index = RecordIndex::new(vec![
        SeqRecord::new("A").with_desc("first"),
        SeqRecord::new("B"),
        SeqRecord::new("A").with_desc("second"),
    ]);
    assert_eq!(index.position("A"), Some(2));
    assert_eq!(index.get_entry("A").unwrap().desc(), Some("second"));
    let descs: Vec<Option<&str>> = index.cursor().map(|r| r.desc()).collect();
    assert_eq!(descs, [Some("first"), None, Some("second")]);
}

#[test]
fn unknown_id_fails() {
    let index = RecordIndex::new(vec![SeqRecord::new("contig_1")]);
    match index.get_entry("contig_2") {
        Err(FilterError::KeyNotFound { id }) => assert_eq!(&*id, "contig_2"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

// ─── coordinates ────────────────────────────────────────────

#[test]
fn reverse_strand_half_open_to_closed() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![simple("CDS", 100, 200, Some(-1), "rev")],
    )]);
    let feature = &index.get_entry("r").unwrap().features()[0];
    assert_eq!((feature.start(), feature.stop()), (200, 101));
}

#[test]
fn forward_strand_half_open_to_closed() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![simple("CDS", 100, 200, Some(1), "fwd")],
    )]);
    let feature = &index.get_entry("r").unwrap().features()[0];
    assert_eq!((feature.start(), feature.stop()), (101, 200));
}

// ─── feature query ──────────────────────────────────────────

#[test]
fn type_filter_returns_sorted_matches() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![
            simple("CDS", 5000, 6000, Some(1), "cds_late"),
            simple("tRNA", 100, 180, Some(-1), "trna"),
            simple("CDS", 1000, 2000, Some(-1), "cds_early"),
        ],
    )]);
    let record = index.get_entry("r").unwrap();
    let cds: Vec<&str> = record.get_features(Some("CDS")).map(|f| f.id()).collect();
    assert_eq!(cds, ["cds_early", "cds_late"]);

    let all: Vec<&str> = record.get_features(None).map(|f| f.id()).collect();
    assert_eq!(all, ["trna", "cds_early", "cds_late"]);

    assert_eq!(record.get_features(Some("rRNA")).count(), 0);
}

#[test]
fn empty_type_filter_yields_every_feature() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![
            simple("gene", 300, 900, Some(1), "g"),
            simple("tRNA", 100, 180, Some(-1), "t"),
        ],
    )]);
    let record = index.get_entry("r").unwrap();
    let unfiltered: Vec<&str> = record.get_features(Some("")).map(|f| f.id()).collect();
    assert_eq!(unfiltered, ["t", "g"]);
    assert_eq!(record.get_features(Some("")).size_hint(), (2, Some(2)));
}

#[test]
fn feature_queries_are_independent() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![
            simple("CDS", 0, 90, Some(1), "a"),
            simple("CDS", 100, 190, Some(1), "b"),
        ],
    )]);
    let record = index.get_entry("r").unwrap();
    let mut first = record.get_features(Some("CDS"));
    assert_eq!(first.next().map(|f| f.id()), Some("a"));
    let mut second = record.get_features(Some("CDS"));
    assert_eq!(second.next().map(|f| f.id()), Some("a"));
    assert_eq!(first.next().map(|f| f.id()), Some("b"));

    let replay = second.clone();
    assert_eq!(second.count(), replay.count());
    assert_eq!(
        record.get_features(None).next_back().map(|f| f.id()),
        Some("b")
    );
}

// ─── restartable iteration ──────────────────────────────────

#[test]
fn iteration_restarts_after_exhaustion() {
    let index = RecordIndex::new(vec![
        SeqRecord::new("one"),
        SeqRecord::new("two"),
        SeqRecord::new("three"),
    ]);
    let mut cursor = index.cursor();
    let ids: Vec<&str> = (&mut cursor).map(|r| r.id()).collect();
    assert_eq!(ids, ["one", "two", "three"]);
    assert_eq!(cursor.next().map(|r| r.id()), Some("one"));
}

#[test]
fn empty_index_signals_end_immediately() {
    let index = RecordIndex::new(Vec::<SeqRecord>::new());
    let mut cursor = index.cursor();
    assert!(cursor.next().is_none());
    assert!(index.get_entry("anything").is_err());
}

// ─── merge / split ──────────────────────────────────────────

#[test]
fn gap_of_50_merges() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![joined(vec![part(1000, 1500, Some(1)), part(1550, 2000, Some(1))], "m")],
    )]);
    let record = index.get_entry("r").unwrap();
    assert_eq!(record.feature_count(), 1);
    let feature = &record.features()[0];
    assert_eq!(feature.location().operator(), LocationOperator::None);
    assert_eq!((feature.start(), feature.stop()), (1001, 2000));
    assert_eq!(feature.function(), "phage tail fiber");
}

#[test]
fn gap_of_150_splits() {
    let index = RecordIndex::new(vec![(
        "r",
        vec![
            joined(vec![part(3150, 3600, Some(-1)), part(1000, 3000, Some(-1))], "s"),
            simple("CDS", 3050, 3100, Some(1), "between"),
        ],
    )]);
    let record = index.get_entry("r").unwrap();
    let coords: Vec<(&str, usize, usize)> = record
        .get_features(None)
        .map(|f| (f.id(), f.start(), f.stop()))
        .collect();
    assert_eq!(
        coords,
        [("s", 3000, 1001), ("between", 3051, 3100), ("s", 3600, 3151)]
    );
    assert!(record.features().iter().all(|f| !f.location().is_join()));
}

#[test]
fn custom_cutoff_changes_resolution() {
    let source = || {
        vec![(
            "r",
            vec![joined(vec![part(0, 100, Some(1)), part(150, 300, Some(1))], "j")],
        )]
    };
    let default = RecordIndex::new(source());
    assert_eq!(default.get_entry("r").unwrap().feature_count(), 1);

    let strict =
        RecordIndex::with_config(source(), FilterConfig::new().with_cutoff_distance(25)).unwrap();
    assert_eq!(strict.get_entry("r").unwrap().feature_count(), 2);
}

// ─── properties ─────────────────────────────────────────────

fn feature_strategy() -> impl Strategy<Value = SeqFeature> {
    (
        prop::sample::select(vec!["CDS", "tRNA", "gene", "repeat_region"]),
        0usize..50_000,
        2usize..3_000,
        prop::option::of(prop_oneof![Just(1i8), Just(-1i8)]),
        prop::option::of((0usize..400, 2usize..1_000)),
    )
        .prop_map(|(ty, start, len, strand, second)| {
            let first = part(start, start + len, strand);
            let location = match second {
                Some((gap, len2)) => {
                    let s2 = start + len + gap;
                    FeatureLocation::join(vec![first, part(s2, s2 + len2, strand)]).unwrap()
                }
                None => FeatureLocation::from(first),
            };
            SeqFeature::new(ty, location).unwrap()
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<(&'static str, Vec<SeqFeature>)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["A", "B", "C", "D", "E"]),
            prop::collection::vec(feature_strategy(), 0..10),
        ),
        0..8,
    )
}

proptest! {
    #[test]
    fn id_map_points_at_last_occurrence(records in records_strategy()) {
        let mut last = HashMap::new();
        for (pos, (id, _)) in records.iter().enumerate() {
            last.insert(*id, pos);
        }
        let index = RecordIndex::new(records.clone());
        prop_assert_eq!(index.len(), records.len());
        for (id, pos) in &last {
            prop_assert_eq!(index.position(id), Some(*pos));
            prop_assert!(*pos < index.len());
            prop_assert_eq!(index.get_entry(id).unwrap().id(), *id);
        }
    }

    #[test]
    fn unique_ids_map_bijectively(n in 0usize..20) {
        let ids: Vec<String> = (0..n).map(|i| format!("contig_{i}")).collect();
        let index = RecordIndex::new(ids.iter().map(|id| SeqRecord::new(id.as_str())));
        let mut positions: Vec<usize> = ids.iter().filter_map(|id| index.position(id)).collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn features_sorted_and_oriented(features in prop::collection::vec(feature_strategy(), 0..25)) {
        let index = RecordIndex::new(vec![("r", features)]);
        let record = index.get_entry("r").unwrap();
        let keys: Vec<(usize, usize)> = record
            .features()
            .iter()
            .map(|f| (f.start().min(f.stop()), f.start().max(f.stop())))
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        for feature in record.features() {
            prop_assert!(!feature.location().is_join());
            if feature.is_reverse() {
                prop_assert!(feature.start() > feature.stop());
            } else {
                prop_assert!(feature.start() < feature.stop());
            }
        }
    }

    #[test]
    fn split_adds_one_feature_per_wide_gap(features in prop::collection::vec(feature_strategy(), 0..25)) {
        let wide = features
            .iter()
            .filter(|f| distance_between(f.location().parts()) >= DEFAULT_CUTOFF_DISTANCE)
            .count();
        let expected = features.len() + wide;
        let index = RecordIndex::new(vec![("r", features)]);
        prop_assert_eq!(index.get_entry("r").unwrap().feature_count(), expected);
    }

    #[test]
    fn cursor_restart_law(n in 1usize..10, rounds in 1usize..4) {
        let index = RecordIndex::new((0..n).map(|i| SeqRecord::new(format!("r{i}"))));
        let mut cursor = index.cursor();
        for _ in 0..rounds {
            prop_assert_eq!((&mut cursor).count(), n);
        }
        prop_assert_eq!(cursor.next().map(|r| r.id()), Some("r0"));
    }
}
