use pyo3::prelude::*;
use pyo3::types::{PyAny, PyModule};

use seqfilter_core::seq::record::{GenomeRecord as CoreGenomeRecord, SeqRecord as CoreSeqRecord};

use crate::feature::{extract_features, features_to_pylist, AnnotatedFeature, SeqFeature};

/// Raw record handed to `SeqioFilter`.
#[pyclass(frozen)]
pub struct SeqRecord {
    pub(crate) inner: CoreSeqRecord,
}

#[pymethods]
impl SeqRecord {
    #[new]
    #[pyo3(signature = (id, features=None, desc=None))]
    fn new(id: &str, features: Option<&Bound<'_, PyAny>>, desc: Option<&str>) -> PyResult<Self> {
        let mut record = CoreSeqRecord::new(id);
        if let Some(features) = features {
            record = record.with_features(extract_features(features)?);
        }
        if let Some(desc) = desc {
            record = record.with_desc(desc);
        }
        Ok(Self { inner: record })
    }

    #[getter]
    fn id(&self) -> &str {
        self.inner.id()
    }

    #[getter]
    fn description(&self) -> Option<&str> {
        self.inner.desc()
    }

    #[getter]
    fn features(&self, py: Python<'_>) -> PyResult<Vec<Py<SeqFeature>>> {
        features_to_pylist(py, self.inner.features())
    }

    fn __repr__(&self) -> String {
        format!(
            "SeqRecord(id={:?}, features={})",
            self.inner.id(),
            self.inner.features().len()
        )
    }
}

/// Normalized record as yielded by `SeqioFilter`.
#[pyclass(frozen)]
pub struct GenomeRecord {
    pub(crate) inner: CoreGenomeRecord,
}

#[pymethods]
impl GenomeRecord {
    #[getter]
    fn id(&self) -> &str {
        self.inner.id()
    }

    #[getter]
    fn description(&self) -> Option<&str> {
        self.inner.desc()
    }

    #[getter(features)]
    fn features_getter(&self) -> Vec<AnnotatedFeature> {
        self.inner
            .features()
            .iter()
            .map(|f| AnnotatedFeature { inner: f.clone() })
            .collect()
    }

    /// Lazily iterate normalized features, optionally of one type only.
    /// An empty type string means no filter.
    #[pyo3(signature = (feature_type=None))]
    fn get_features(slf: PyRef<'_, Self>, feature_type: Option<String>) -> FeatureIter {
        FeatureIter {
            record: slf.into(),
            feature_type: feature_type.filter(|ty| !ty.is_empty()),
            pos: 0,
        }
    }

    fn __len__(&self) -> usize {
        self.inner.feature_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "GenomeRecord(id={:?}, features={})",
            self.inner.id(),
            self.inner.feature_count()
        )
    }
}

#[pyclass]
pub struct FeatureIter {
    record: Py<GenomeRecord>,
    feature_type: Option<String>,
    pos: usize,
}

#[pymethods]
impl FeatureIter {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<AnnotatedFeature> {
        let py = slf.py();
        let record = slf.record.clone_ref(py);
        let record = record.borrow(py);
        let features = record.inner.features();
        while let Some(feature) = features.get(slf.pos) {
            slf.pos += 1;
            let matches = match slf.feature_type.as_deref() {
                Some(ty) => feature.feature_type() == ty,
                None => true,
            };
            if matches {
                return Some(AnnotatedFeature {
                    inner: feature.clone(),
                });
            }
        }
        None
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SeqRecord>()?;
    m.add_class::<GenomeRecord>()?;
    m.add_class::<FeatureIter>()?;
    Ok(())
}
