// Sequence Buffers
use ndarray::Array1;
use tracing::debug;

use crate::engine::error::{Error, Result};

/// Owns the three sequences `a`, `b` and `results`.
///
/// All three are allocated zero-filled in `new` and never resized, so
/// `a.len() == b.len() == results.len()` holds for the struct's lifetime.
/// Resources are tied to this struct's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequences {
    a: Vec<f64>,
    b: Vec<f64>,
    results: Vec<f64>,
}

impl Sequences {
    /// Allocate three zeroed sequences of `len` elements each.
    ///
    /// Reservation is fallible so running out of memory comes back as
    /// `Error::Allocation` instead of aborting.
    pub fn new(len: usize) -> Result<Self> {
        let bytes = len.saturating_mul(std::mem::size_of::<f64>());
        debug!(len, bytes_per_sequence = bytes, "allocating sequences");
        Ok(Self {
            a: zeroed("a", len)?,
            b: zeroed("b", len)?,
            results: zeroed("results", len)?,
        })
    }

    /// Wrap caller-provided inputs. `results` is allocated zeroed.
    pub fn from_inputs(a: Vec<f64>, b: Vec<f64>) -> Result<Self> {
        if a.len() != b.len() {
            return Err(Error::LengthMismatch {
                a: a.len(),
                b: b.len(),
                out: a.len(),
            });
        }
        let results = zeroed("results", a.len())?;
        Ok(Self { a, b, results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn results(&self) -> &[f64] {
        &self.results
    }

    /// Mutable access to both inputs at once, for the generator.
    pub fn inputs_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.a, &mut self.b)
    }

    /// Read access to the inputs and write access to `results`, for the combiner.
    pub fn split_for_combine(&mut self) -> (&[f64], &[f64], &mut [f64]) {
        (&self.a, &self.b, &mut self.results)
    }

    /// Hand the buffers over as ndarray vectors without copying.
    pub fn into_arrays(self) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (
            Array1::from_vec(self.a),
            Array1::from_vec(self.b),
            Array1::from_vec(self.results),
        )
    }
}

/// Allocate a zero-filled buffer or report which sequence could not fit.
pub(crate) fn zeroed(name: &'static str, len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| Error::Allocation { name, len, source })?;
    buf.resize(len, 0.0);
    Ok(buf)
}
