//! Generate two large vectors of quantized random floats and combine them
//! element-wise as `(a + b) * b`.
//!
//! The pipeline is two passes over flat `f64` buffers, run by
//! [`RunController`]: the generator fills `a` and `b`, then the combiner
//! fills `results`. Both passes have a sequential and a rayon variant.

pub mod engine;
#[cfg(feature = "python")]
mod python;

pub use engine::config::{Execution, RunConfig, Seed, DEFAULT_LEN, RANGE_MAX, SCALE, VALUE_MAX};
pub use engine::controller::{RunController, RunReport};
pub use engine::error::{Error, Result};
pub use engine::generator::{generate, generate_parallel, Generator};
pub use engine::kernels::{combine, combine_lanes, combine_one, combine_parallel};
pub use engine::memory::Sequences;
pub use engine::verify::{compare_strategies, spot_check, SampleStats, StrategyTimings};
