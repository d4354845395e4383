use clap::Parser;
use dotenvy::dotenv;

mod cli;
mod commands;
mod context;
mod notifier;
mod render;

use cli::Cli;

/// Storefront command line
///
/// Keeps an anonymous cart in a local file and switches to the account's
/// remote cart once signed in.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter; stdout is left to command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // 2. Load environment variables before clap reads its env fallbacks
    dotenv().ok();

    // 3. Parse arguments and run
    commands::run(Cli::parse()).await
}
