// Computation Kernels
// Element-wise `(a + b) * b` over flat f64 buffers
use rayon::prelude::*;

use crate::engine::error::{check_lengths, Error, Result};

/// Width of the unrolled lane loop. 8 f64 = two AVX registers, one AVX-512.
pub const LANES: usize = 8;

/// The combine expression for a single index.
#[inline(always)]
pub fn combine_one(a: f64, b: f64) -> f64 {
    (a + b) * b
}

/// Plain indexed pass: `out[i] = (a[i] + b[i]) * b[i]`.
pub fn combine(a: &[f64], b: &[f64], out: &mut [f64]) -> Result<()> {
    check_lengths(a.len(), b.len(), out.len())?;
    for i in 0..out.len() {
        out[i] = combine_one(a[i], b[i]);
    }
    Ok(())
}

/// Same result as [`combine`], processed in fixed `LANES`-wide blocks.
pub fn combine_lanes(a: &[f64], b: &[f64], out: &mut [f64]) -> Result<()> {
    check_lengths(a.len(), b.len(), out.len())?;
    lanes_unchecked(a, b, out);
    Ok(())
}

/// Parallel pass. Each `chunk_len` slice of `out` runs the lane kernel on
/// one rayon worker; the call returns once every chunk is done.
pub fn combine_parallel(a: &[f64], b: &[f64], out: &mut [f64], chunk_len: usize) -> Result<()> {
    check_lengths(a.len(), b.len(), out.len())?;
    if chunk_len == 0 {
        return Err(Error::InvalidChunkLen);
    }
    out.par_chunks_mut(chunk_len)
        .zip(a.par_chunks(chunk_len))
        .zip(b.par_chunks(chunk_len))
        .for_each(|((o, ca), cb)| lanes_unchecked(ca, cb, o));
    Ok(())
}

// Caller guarantees equal lengths.
fn lanes_unchecked(a: &[f64], b: &[f64], out: &mut [f64]) {
    // Fixed-size blocks with no bounds checks inside are friendly to
    // CPU vectorization (AVX/SSE).
    let mut o_blocks = out.chunks_exact_mut(LANES);
    let mut a_blocks = a.chunks_exact(LANES);
    let mut b_blocks = b.chunks_exact(LANES);
    for ((o, x), y) in (&mut o_blocks).zip(&mut a_blocks).zip(&mut b_blocks) {
        for j in 0..LANES {
            o[j] = combine_one(x[j], y[j]);
        }
    }

    let tail = o_blocks.into_remainder();
    for ((o, &x), &y) in tail
        .iter_mut()
        .zip(a_blocks.remainder())
        .zip(b_blocks.remainder())
    {
        *o = combine_one(x, y);
    }
}
