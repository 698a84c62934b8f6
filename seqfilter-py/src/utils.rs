use pyo3::exceptions::{PyKeyError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyAny, PyDict, PyList};
use std::collections::HashMap;

use seqfilter_core::error::FilterError;
use seqfilter_core::seq::feature::Qualifiers;

pub(crate) fn filter_err(err: FilterError) -> PyErr {
    match err {
        FilterError::KeyNotFound { id } => PyKeyError::new_err(id.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

pub(crate) fn extract_str_list_map(
    obj: &Bound<'_, PyAny>,
    name: &str,
) -> PyResult<HashMap<Box<str>, Vec<Box<str>>>> {
    let dict = obj
        .downcast::<PyDict>()
        .map_err(|_| PyTypeError::new_err(format!("{name} must be a dict[str, list[str]]")))?;
    let mut out = HashMap::new();
    for (key, value) in dict.iter() {
        let key: String = key
            .extract()
            .map_err(|_| PyTypeError::new_err(format!("{name} keys must be str")))?;
        let values: Vec<String> = value
            .extract()
            .map_err(|_| PyTypeError::new_err(format!("{name} values must be list[str]")))?;
        let boxed_values = values
            .into_iter()
            .map(|v| v.into_boxed_str())
            .collect::<Vec<_>>();
        out.insert(key.into_boxed_str(), boxed_values);
    }
    Ok(out)
}

pub(crate) fn map_to_pydict(py: Python<'_>, map: &Qualifiers) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    for (key, values) in map {
        let list = PyList::new_bound(py, values.iter().map(|v| v.as_ref()));
        dict.set_item(key.as_ref(), list)?;
    }
    Ok(dict.to_object(py))
}
