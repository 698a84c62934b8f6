use crate::seq::record::GenomeRecord;

/// Record cursor that rewinds itself once exhausted.
///
/// After the last record, `next` resets the position to 0 and returns
/// `None` once; the following call yields the first record again. Repeated
/// full scans therefore never need a new cursor:
///
/// ```
/// # use seqfilter_core::filter::RecordIndex;
/// # use seqfilter_core::seq::SeqRecord;
/// let index = RecordIndex::new(vec![SeqRecord::new("a"), SeqRecord::new("b")]);
/// let mut cursor = index.cursor();
/// assert_eq!((&mut cursor).count(), 2);
/// assert_eq!((&mut cursor).count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RecordCursor<'a> {
    records: &'a [GenomeRecord],
    pos: usize,
}

impl<'a> RecordCursor<'a> {
    pub fn new(records: &'a [GenomeRecord]) -> Self {
        Self { records, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.records.len() - self.pos
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = &'a GenomeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.get(self.pos) {
            Some(record) => {
                self.pos += 1;
                Some(record)
            }
            None => {
                self.pos = 0;
                None
            }
        }
    }
}
