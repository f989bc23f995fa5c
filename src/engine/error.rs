// Error Types
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors surfaced by the engine.
///
/// On the binary's path only `Allocation` can occur; the rest guard the
/// library entry points against misuse.
#[derive(Error, Debug)]
pub enum Error {
    /// Not enough memory for the three sequences.
    #[error("failed to allocate {len} elements for sequence `{name}`")]
    Allocation {
        name: &'static str,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// Kernel inputs and output have different lengths.
    #[error("length mismatch: a = {a}, b = {b}, out = {out}")]
    LengthMismatch { a: usize, b: usize, out: usize },

    #[error("parallel chunk length must be non-zero")]
    InvalidChunkLen,

    #[error("thread count must be non-zero")]
    InvalidThreadCount,

    #[error("spot check stride must be non-zero")]
    InvalidStride,

    /// Two strategies disagreed beyond tolerance.
    #[error("mismatch at index {index}: expected {expected}, got {actual}")]
    Mismatch {
        index: usize,
        expected: f64,
        actual: f64,
    },

    #[error("failed to write status line: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check the length invariant shared by every kernel.
pub(crate) fn check_lengths(a: usize, b: usize, out: usize) -> Result<()> {
    if a == b && b == out {
        Ok(())
    } else {
        Err(Error::LengthMismatch { a, b, out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_must_all_match() {
        assert!(check_lengths(3, 3, 3).is_ok());
        assert!(check_lengths(0, 0, 0).is_ok());
        let err = check_lengths(3, 2, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch { a: 3, b: 2, out: 3 }
        ));
        assert_eq!(err.to_string(), "length mismatch: a = 3, b = 2, out = 3");
    }
}
