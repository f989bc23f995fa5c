use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vec_combine::{Result, RunConfig, RunController};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the status lines.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let controller = RunController::new(RunConfig::default());
    if let Err(e) = controller.run() {
        error!(error = %e, "run failed");
        return Err(e);
    }
    Ok(())
}
