use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyModule};

use seqfilter_core::filter::{FilterConfig, RecordIndex};
use seqfilter_core::seq::record::SeqRecord as CoreSeqRecord;

use crate::record::{GenomeRecord, SeqRecord};
use crate::utils::filter_err;

fn collect_records(obj: &Bound<'_, PyAny>) -> PyResult<Vec<CoreSeqRecord>> {
    let mut out = Vec::new();
    for item in obj.iter()? {
        let item = item?;
        let record = item
            .extract::<PyRef<'_, SeqRecord>>()
            .map_err(|_| PyTypeError::new_err("SeqioFilter expects SeqRecord objects only"))?;
        out.push(record.inner.clone());
    }
    Ok(out)
}

/// Normalized records, iterable any number of times.
///
/// The filter is its own iterator: once exhausted it rewinds, so a second
/// `for` loop over the same object sees every record again.
#[pyclass]
pub struct SeqioFilter {
    inner: RecordIndex,
}

#[pymethods]
impl SeqioFilter {
    #[new]
    #[pyo3(signature = (records, cutoff_distance=None))]
    fn new(records: &Bound<'_, PyAny>, cutoff_distance: Option<usize>) -> PyResult<Self> {
        let mut config = FilterConfig::default();
        if let Some(cutoff_distance) = cutoff_distance {
            config = config.with_cutoff_distance(cutoff_distance);
        }
        let records = collect_records(records)?;
        let inner = RecordIndex::with_config(records, config).map_err(filter_err)?;
        Ok(Self { inner })
    }

    fn get_entry(&self, id: &str) -> PyResult<GenomeRecord> {
        let record = self.inner.get_entry(id).map_err(filter_err)?;
        Ok(GenomeRecord {
            inner: record.clone(),
        })
    }

    fn ids(&self) -> Vec<String> {
        self.inner.ids().map(str::to_string).collect()
    }

    #[getter]
    fn cutoff_distance(&self) -> usize {
        self.inner.config().cutoff_distance
    }

    fn rewind(&mut self) {
        self.inner.rewind();
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(&mut self) -> Option<GenomeRecord> {
        self.inner
            .next_record()
            .map(|record| GenomeRecord {
                inner: record.clone(),
            })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    fn __repr__(&self) -> String {
        format!("SeqioFilter(records={})", self.inner.len())
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SeqioFilter>()?;
    Ok(())
}
