// Strategy Verification
use std::time::{Duration, Instant};

use ndarray::ArrayView1;
use tracing::{debug, info};

use crate::engine::error::{check_lengths, Error, Result};
use crate::engine::kernels::{combine, combine_lanes, combine_parallel};

/// Stride and tolerance used when cross-checking strategies.
pub const SPOT_CHECK_STRIDE: usize = 200;
pub const SPOT_CHECK_TOLERANCE: f64 = 0.05;

/// Compare every `stride`-th element of `candidate` against `reference`.
/// Returns the first index whose absolute difference exceeds `tolerance`.
pub fn spot_check(reference: &[f64], candidate: &[f64], stride: usize, tolerance: f64) -> Result<()> {
    check_lengths(reference.len(), candidate.len(), candidate.len())?;
    if stride == 0 {
        return Err(Error::InvalidStride);
    }
    for index in (0..reference.len()).step_by(stride) {
        let (expected, actual) = (reference[index], candidate[index]);
        // Same infinity on both sides counts as equal.
        if expected == actual {
            continue;
        }
        let diff = (expected - actual).abs();
        if diff.is_nan() || diff > tolerance {
            return Err(Error::Mismatch {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Wall time of each combine strategy over the same inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyTimings {
    pub plain: Duration,
    pub lanes: Duration,
    pub parallel: Duration,
}

/// Run all three combiners on `a`/`b`, spot-check the lane and parallel
/// outputs against the plain pass and report how long each took.
pub fn compare_strategies(a: &[f64], b: &[f64], chunk_len: usize) -> Result<StrategyTimings> {
    let len = a.len();
    let mut plain_out = crate::engine::memory::zeroed("plain", len)?;
    let mut lanes_out = crate::engine::memory::zeroed("lanes", len)?;
    let mut par_out = crate::engine::memory::zeroed("parallel", len)?;

    let plain = timed(|| combine(a, b, &mut plain_out))?;
    let lanes = timed(|| combine_lanes(a, b, &mut lanes_out))?;
    let parallel = timed(|| combine_parallel(a, b, &mut par_out, chunk_len))?;

    spot_check(&plain_out, &lanes_out, SPOT_CHECK_STRIDE, SPOT_CHECK_TOLERANCE)?;
    spot_check(&plain_out, &par_out, SPOT_CHECK_STRIDE, SPOT_CHECK_TOLERANCE)?;

    info!(
        len,
        plain_us = plain.as_micros() as u64,
        lanes_us = lanes.as_micros() as u64,
        parallel_us = parallel.as_micros() as u64,
        "strategy comparison"
    );
    Ok(StrategyTimings {
        plain,
        lanes,
        parallel,
    })
}

fn timed(f: impl FnOnce() -> Result<()>) -> Result<Duration> {
    let start = Instant::now();
    f()?;
    Ok(start.elapsed())
}

/// Summary of a generated sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStats {
    /// `None` for an empty sequence.
    pub fn of(values: &[f64]) -> Option<Self> {
        let view = ArrayView1::from(values);
        let mean = view.mean()?;
        let min = view.fold(f64::INFINITY, |acc, &v| acc.min(v));
        let max = view.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        debug!(len = values.len(), mean, min, max, "sample stats");
        Some(Self { mean, min, max })
    }
}
