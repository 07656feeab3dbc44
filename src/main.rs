use clap::Parser;
use tracing::debug;

use sitevault::cli::{run, Cli};
use sitevault::config::ObservabilityConfig;
use sitevault::observability::init_logging;
use sitevault::{APP_NAME, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (optional - won't fail if missing).
    // This must happen before any config is read from environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::from_env();
    if cli.verbose {
        observability.log_level = "debug".to_string();
    }
    init_logging(&observability)?;

    debug!(app_name = APP_NAME, version = VERSION, "Starting sitevault");

    run(cli).await
}
