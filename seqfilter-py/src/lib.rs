use pyo3::prelude::*;

mod feature;
mod filter;
mod location;
mod record;
mod utils;

#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    location::register(m)?;
    feature::register(m)?;
    record::register(m)?;
    filter::register(m)?;
    Ok(())
}
