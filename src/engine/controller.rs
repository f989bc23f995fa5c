// Controller
use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, enabled, info, Level};

use crate::engine::config::{Execution, RunConfig};
use crate::engine::error::Result;
use crate::engine::generator::{generate, generate_parallel};
use crate::engine::kernels::{combine, combine_parallel};
use crate::engine::memory::Sequences;
use crate::engine::verify::SampleStats;

/// Outcome of one generate + combine run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub len: usize,
    pub seed: u64,
    pub generate: Duration,
    pub combine: Duration,
}

/// Drives the two passes: allocate, generate `a`/`b`, then combine into
/// `results`. Nothing flows back from the combiner to the generator.
pub struct RunController {
    config: RunConfig,
}

impl RunController {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run both passes and drop the sequences. Status lines go to stdout.
    pub fn run(&self) -> Result<RunReport> {
        let stdout = std::io::stdout();
        let (report, _sequences) = self.execute(&mut stdout.lock())?;
        Ok(report)
    }

    /// Run both passes, writing the two status lines to `out`, and hand the
    /// populated sequences back to the caller.
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<(RunReport, Sequences)> {
        self.config.validate()?;
        let len = self.config.len;
        let seed = self.config.seed.resolve();
        info!(len, seed, execution = ?self.config.execution, "starting run");

        // Phase 1: allocate + generate
        writeln!(out, "{}", preparing_line(len))?;
        let mut seqs = Sequences::new(len)?;
        let started = Instant::now();
        {
            let (a, b) = seqs.inputs_mut();
            self.in_pool(|| match self.config.execution {
                Execution::Sequential => generate(a, b, seed),
                Execution::Parallel { chunk_len, .. } => generate_parallel(a, b, seed, chunk_len),
            })?;
        }
        let generate_time = started.elapsed();
        debug!(us = generate_time.as_micros() as u64, "generate pass done");
        if enabled!(Level::DEBUG) {
            // Extra full pass, only paid for when someone is looking.
            SampleStats::of(seqs.a());
            SampleStats::of(seqs.b());
        }

        // Phase 2: combine
        writeln!(out, "{COMBINING_LINE}")?;
        out.flush()?;
        let started = Instant::now();
        {
            let (a, b, results) = seqs.split_for_combine();
            self.in_pool(|| match self.config.execution {
                Execution::Sequential => combine(a, b, results),
                Execution::Parallel { chunk_len, .. } => combine_parallel(a, b, results, chunk_len),
            })?;
        }
        let combine_time = started.elapsed();

        let report = RunReport {
            len,
            seed,
            generate: generate_time,
            combine: combine_time,
        };
        info!(
            len,
            generate_us = generate_time.as_micros() as u64,
            combine_us = combine_time.as_micros() as u64,
            "run finished"
        );
        Ok((report, seqs))
    }

    /// Run `f` inside a dedicated pool when a thread count is configured,
    /// otherwise on the current thread / global rayon pool.
    fn in_pool<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send,
    {
        match self.config.execution {
            Execution::Parallel {
                threads: Some(threads),
                ..
            } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(f)
            }
            _ => f(),
        }
    }
}

pub const COMBINING_LINE: &str = "calculating result..";

/// First status line, e.g. `preparing 2 lists of 50 million floats to work with...`.
pub fn preparing_line(len: usize) -> String {
    let count = if len > 0 && len % 1_000_000 == 0 {
        format!("{} million", len / 1_000_000)
    } else {
        len.to_string()
    };
    format!("preparing 2 lists of {count} floats to work with...")
}
