use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyModule};

use seqfilter_core::seq::feature::{
    AnnotatedFeature as CoreAnnotatedFeature, SeqFeature as CoreSeqFeature,
};

use crate::location::FeatureLocation;
use crate::utils::{extract_str_list_map, filter_err, map_to_pydict};

#[pyclass(frozen)]
pub struct SeqFeature {
    pub(crate) inner: CoreSeqFeature,
}

#[pymethods]
impl SeqFeature {
    #[new]
    #[pyo3(signature = (feature_type, location, qualifiers=None))]
    fn new(
        feature_type: &str,
        location: PyRef<'_, FeatureLocation>,
        qualifiers: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let mut inner =
            CoreSeqFeature::new(feature_type, location.inner.clone()).map_err(filter_err)?;
        if let Some(qualifiers) = qualifiers {
            let parsed = extract_str_list_map(qualifiers, "qualifiers")?;
            inner = inner.with_qualifiers(parsed);
        }
        Ok(Self { inner })
    }

    #[getter]
    fn r#type(&self) -> &str {
        self.inner.feature_type()
    }

    #[getter]
    fn location(&self) -> FeatureLocation {
        FeatureLocation {
            inner: self.inner.location().clone(),
        }
    }

    #[getter]
    fn qualifiers(&self, py: Python<'_>) -> PyResult<PyObject> {
        map_to_pydict(py, self.inner.qualifiers())
    }

    fn __repr__(&self) -> String {
        format!(
            "SeqFeature(type={:?}, location={})",
            self.inner.feature_type(),
            self.inner.location()
        )
    }
}

/// A normalized feature; read-only.
#[pyclass(frozen)]
pub struct AnnotatedFeature {
    pub(crate) inner: CoreAnnotatedFeature,
}

#[pymethods]
impl AnnotatedFeature {
    #[getter]
    fn id(&self) -> &str {
        self.inner.id()
    }

    #[getter]
    fn function(&self) -> &str {
        self.inner.function()
    }

    #[getter]
    fn start(&self) -> usize {
        self.inner.start()
    }

    #[getter]
    fn stop(&self) -> usize {
        self.inner.stop()
    }

    #[getter]
    fn r#type(&self) -> &str {
        self.inner.feature_type()
    }

    #[getter]
    fn strand(&self) -> Option<i8> {
        self.inner.strand()
    }

    #[getter]
    fn location(&self) -> FeatureLocation {
        FeatureLocation {
            inner: self.inner.location().clone(),
        }
    }

    #[getter]
    fn qualifiers(&self, py: Python<'_>) -> PyResult<PyObject> {
        map_to_pydict(py, self.inner.qualifiers())
    }

    fn __repr__(&self) -> String {
        format!(
            "AnnotatedFeature(id={:?}, type={:?}, start={}, stop={}, function={:?})",
            self.inner.id(),
            self.inner.feature_type(),
            self.inner.start(),
            self.inner.stop(),
            self.inner.function()
        )
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SeqFeature>()?;
    m.add_class::<AnnotatedFeature>()?;
    Ok(())
}

pub(crate) fn extract_features(obj: &Bound<'_, PyAny>) -> PyResult<Vec<CoreSeqFeature>> {
    let mut out = Vec::new();
    for item in obj.iter()? {
        let item = item?;
        let feature = item
            .extract::<PyRef<'_, SeqFeature>>()
            .map_err(|_| PyTypeError::new_err("features must be SeqFeature objects"))?;
        out.push(feature.inner.clone());
    }
    Ok(out)
}

pub(crate) fn features_to_pylist(
    py: Python<'_>,
    features: &[CoreSeqFeature],
) -> PyResult<Vec<Py<SeqFeature>>> {
    let mut out = Vec::with_capacity(features.len());
    for feature in features {
        out.push(Py::new(
            py,
            SeqFeature {
                inner: feature.clone(),
            },
        )?);
    }
    Ok(out)
}
