use crate::error::{FilterError, FilterResult};
use crate::filter::config::FilterConfig;
use crate::filter::cursor::RecordCursor;
use crate::filter::normalize::FeatureNormalizer;
use crate::seq::record::{GenomeRecord, IntoSeqRecord};
use log::warn;
use std::collections::HashMap;
use std::slice;

/// Normalized genome records in arrival order, addressable by id.
///
/// Repeated ids keep every record; lookups by id resolve to the last one.
#[derive(Clone, Debug, Default)]
pub struct RecordIndex {
    records: Vec<GenomeRecord>,
    positions: HashMap<Box<str>, usize>,
    config: FilterConfig,
    cursor: usize,
}

impl RecordIndex {
    pub fn new<I, R>(source: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoSeqRecord,
    {
        Self::build(source, FilterConfig::default())
    }

    pub fn with_config<I, R>(source: I, config: FilterConfig) -> FilterResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoSeqRecord,
    {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    /// Builds from a fallible source such as a streaming parser, stopping at
    /// the first error.
    pub fn from_results<I, R, E>(source: I, config: FilterConfig) -> FilterResult<Self>
    where
        I: IntoIterator<Item = Result<R, E>>,
        R: IntoSeqRecord,
        E: Into<FilterError>,
    {
        config.validate()?;
        let mut index = Self::empty(config);
        let normalizer = FeatureNormalizer::new(&config);
        for item in source {
            match item {
                Ok(record) => index.push(&normalizer, record),
                Err(err) => return Err(err.into()),
            }
        }
        Ok(index)
    }

    fn empty(config: FilterConfig) -> Self {
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
            config,
            cursor: 0,
        }
    }

    fn build<I, R>(source: I, config: FilterConfig) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoSeqRecord,
    {
        let mut index = Self::empty(config);
        let normalizer = FeatureNormalizer::new(&config);
        for item in source {
            index.push(&normalizer, item);
        }
        index
    }

    fn push<R: IntoSeqRecord>(&mut self, normalizer: &FeatureNormalizer, item: R) {
        let record = normalizer.normalize(item.into_seq_record());
        let pos = self.records.len();
        if let Some(prev) = self.positions.insert(record.id().into(), pos) {
            warn!(
                "duplicate record id {}: position {prev} shadowed by {pos}",
                record.id()
            );
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn records(&self) -> &[GenomeRecord] {
        &self.records
    }

    /// Record ids in stored order, duplicates included.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.id())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn get_entry(&self, id: &str) -> FilterResult<&GenomeRecord> {
        self.position(id)
            .and_then(|pos| self.records.get(pos))
            .ok_or_else(|| FilterError::KeyNotFound { id: id.into() })
    }

    /// Plain single-pass iteration.
    pub fn iter(&self) -> slice::Iter<'_, GenomeRecord> {
        self.records.iter()
    }

    /// A fresh self-rewinding cursor, see [`RecordCursor`].
    pub fn cursor(&self) -> RecordCursor<'_> {
        RecordCursor::new(&self.records)
    }

    /// Advances the index's own cursor with the same rewind contract as
    /// [`RecordCursor`].
    pub fn next_record(&mut self) -> Option<&GenomeRecord> {
        match self.records.get(self.cursor) {
            Some(record) => {
                self.cursor += 1;
                Some(record)
            }
            None => {
                self.cursor = 0;
                None
            }
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> IntoIterator for &'a RecordIndex {
    type Item = &'a GenomeRecord;
    type IntoIter = slice::Iter<'a, GenomeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: IntoSeqRecord> FromIterator<R> for RecordIndex {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter)
    }
}
