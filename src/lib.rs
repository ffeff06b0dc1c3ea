// fixts - rewrites the TimeoutContext generic arrow so the TSX parser accepts it

pub mod error;
pub mod patch;
pub mod utils;

use anyhow::Result;
use tracing::debug;

pub use error::{PatchError, PatchResult};
pub use patch::{PatchReport, Patcher, SubstitutionRule, TargetFile};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize the stderr logger
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is true. Stdout is left alone since
/// it carries the confirmation line.
pub fn init_with_logger(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_directive = if verbose { "fixts=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt::Subscriber::builder()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    debug!("Initializing fixts v{}", version());
    Ok(())
}
