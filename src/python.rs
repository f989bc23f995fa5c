// Python Bindings
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::engine::config::{RunConfig, Seed, DEFAULT_LEN};
use crate::engine::controller::RunController;
use crate::engine::error::Error;
use crate::engine::generator::generate;
use crate::engine::kernels::combine;
use crate::engine::memory::zeroed;

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
        Error::LengthMismatch { .. }
        | Error::InvalidChunkLen
        | Error::InvalidThreadCount
        | Error::InvalidStride => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn seed_of(seed: Option<u64>) -> Seed {
    seed.map_or(Seed::Entropy, Seed::Fixed)
}

/// Returns `(a, b)` as numpy arrays of `len` quantized floats.
#[pyfunction]
#[pyo3(name = "generate", signature = (len, seed=None))]
fn py_generate(
    py: Python<'_>,
    len: usize,
    seed: Option<u64>,
) -> PyResult<(Bound<'_, PyArray1<f64>>, Bound<'_, PyArray1<f64>>)> {
    let seed = seed_of(seed).resolve();
    let mut a = zeroed("a", len).map_err(to_py_err)?;
    let mut b = zeroed("b", len).map_err(to_py_err)?;
    py.allow_threads(|| generate(&mut a, &mut b, seed))
        .map_err(to_py_err)?;
    Ok((a.into_pyarray(py), b.into_pyarray(py)))
}

/// `(a + b) * b` over two contiguous float64 arrays.
#[pyfunction]
#[pyo3(name = "combine")]
fn py_combine<'py>(
    py: Python<'py>,
    a: PyReadonlyArray1<'py, f64>,
    b: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let a = a.as_slice()?;
    let b = b.as_slice()?;
    let mut out = zeroed("results", a.len()).map_err(to_py_err)?;
    py.allow_threads(|| combine(a, b, &mut out))
        .map_err(to_py_err)?;
    Ok(out.into_pyarray(py))
}

#[pyclass(name = "Controller")]
pub struct PyController {
    config: RunConfig,
}

#[pymethods]
impl PyController {
    #[new]
    #[pyo3(signature = (len=DEFAULT_LEN, seed=None))]
    fn new(len: usize, seed: Option<u64>) -> Self {
        Self {
            config: RunConfig::with_len(len).seed(seed_of(seed)),
        }
    }

    /// Run both passes; returns the seed and per-pass timings in microseconds.
    fn run<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let controller = RunController::new(self.config);
        let report = py.allow_threads(|| controller.run()).map_err(to_py_err)?;
        let dict = PyDict::new(py);
        dict.set_item("len", report.len)?;
        dict.set_item("seed", report.seed)?;
        dict.set_item("generate_us", report.generate.as_micros() as u64)?;
        dict.set_item("combine_us", report.combine.as_micros() as u64)?;
        Ok(dict)
    }
}

/// Python module definition
#[pymodule]
fn vec_combine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_generate, m)?)?;
    m.add_function(wrap_pyfunction!(py_combine, m)?)?;
    m.add_class::<PyController>()?;
    Ok(())
}
