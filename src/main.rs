use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fixts::Patcher;

/// Rewrite `async <T>(` as `async <T,>(` in the frontend's TimeoutContext.tsx
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fixts::init_with_logger(cli.verbose)?;

    let patcher = Patcher::timeout_context();
    info!("Patching {}", patcher.target().path().display());

    let report = patcher
        .run()
        .with_context(|| format!("Failed to patch {}", patcher.target().basename()))?;

    println!("{}", report);
    Ok(())
}
