use pyo3::prelude::*;
use pyo3::types::PyModule;

use seqfilter_core::seq::feature::{
    FeatureLocation as CoreFeatureLocation, LocationOperator, LocationPart as CoreLocationPart,
};

use crate::utils::filter_err;

#[pyclass(frozen)]
#[derive(Clone)]
pub struct LocationPart {
    pub(crate) inner: CoreLocationPart,
}

#[pymethods]
impl LocationPart {
    #[new]
    #[pyo3(signature = (start, end, strand=None))]
    fn new(start: usize, end: usize, strand: Option<i8>) -> PyResult<Self> {
        let inner = CoreLocationPart::new(start, end, strand).map_err(filter_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn start(&self) -> usize {
        self.inner.start()
    }

    #[getter]
    fn end(&self) -> usize {
        self.inner.end()
    }

    #[getter]
    fn strand(&self) -> Option<i8> {
        self.inner.strand()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "LocationPart(start={}, end={}, strand={:?})",
            self.inner.start(),
            self.inner.end(),
            self.inner.strand()
        )
    }
}

#[pyclass(frozen)]
pub struct FeatureLocation {
    pub(crate) inner: CoreFeatureLocation,
}

#[pymethods]
impl FeatureLocation {
    #[new]
    #[pyo3(signature = (start, end, strand=None))]
    fn new(start: usize, end: usize, strand: Option<i8>) -> PyResult<Self> {
        let inner = CoreFeatureLocation::new(start, end, strand).map_err(filter_err)?;
        Ok(Self { inner })
    }

    /// Multi-part location, parts given in biological order.
    #[staticmethod]
    fn join(parts: Vec<PyRef<'_, LocationPart>>) -> PyResult<Self> {
        let parts = parts.iter().map(|p| p.inner).collect();
        let inner = CoreFeatureLocation::join(parts).map_err(filter_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn start(&self) -> usize {
        self.inner.start()
    }

    #[getter]
    fn end(&self) -> usize {
        self.inner.end()
    }

    #[getter]
    fn strand(&self) -> Option<i8> {
        self.inner.strand()
    }

    #[getter]
    fn parts(&self) -> Vec<LocationPart> {
        self.inner
            .parts()
            .iter()
            .map(|&inner| LocationPart { inner })
            .collect()
    }

    #[getter]
    fn operator(&self) -> Option<&'static str> {
        match self.inner.operator() {
            LocationOperator::Join => Some("join"),
            LocationOperator::None => None,
        }
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("FeatureLocation({})", self.inner)
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<LocationPart>()?;
    m.add_class::<FeatureLocation>()?;
    Ok(())
}
