// Run Configuration
use crate::engine::error::{Error, Result};

/// Element count of each sequence in the shipped binary.
pub const DEFAULT_LEN: usize = 50_000_000;

/// Upper bound (inclusive) of the integer draw. The lower bound is 0.
pub const RANGE_MAX: u32 = 150_000;

/// Factor applied to every integer draw.
pub const SCALE: f64 = 0.2;

/// Largest value the generator can produce (`RANGE_MAX * SCALE`).
pub const VALUE_MAX: f64 = 30_000.0;

/// Chunk length used by the parallel passes when none is given.
/// 64K f64 values = 512KB per input chunk.
pub const DEFAULT_CHUNK_LEN: usize = 1 << 16;

/// Where the generator's PRNG gets its seed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seed {
    /// Pull a fresh seed from OS entropy once per run.
    #[default]
    Entropy,
    /// Reproducible runs.
    Fixed(u64),
}

impl Seed {
    /// Resolve to a concrete seed value.
    pub fn resolve(self) -> u64 {
        match self {
            Seed::Entropy => rand::random(),
            Seed::Fixed(seed) => seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One thread, index order. What the binary runs.
    #[default]
    Sequential,
    /// Rayon over `chunk_len` slices. `threads: None` uses the global pool.
    Parallel {
        chunk_len: usize,
        threads: Option<usize>,
    },
}

impl Execution {
    pub fn parallel() -> Self {
        Execution::Parallel {
            chunk_len: DEFAULT_CHUNK_LEN,
            threads: None,
        }
    }
}

/// Everything a run needs. There is no file or flag layer on top of this;
/// the binary always uses `RunConfig::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub len: usize,
    pub seed: Seed,
    pub execution: Execution,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            seed: Seed::Entropy,
            execution: Execution::Sequential,
        }
    }
}

impl RunConfig {
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Execution::Parallel { chunk_len, threads } = self.execution {
            if chunk_len == 0 {
                return Err(Error::InvalidChunkLen);
            }
            if threads == Some(0) {
                return Err(Error::InvalidThreadCount);
            }
        }
        Ok(())
    }
}
