use admin_console::cli::{self, Cli};
use admin_console::{init_logger, ConsoleError};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.config.validate()?;
    let _guard = init_logger(&cli.config.log_level, cli.config.log_dir.as_deref())?;

    tracing::debug!(base_url = %cli.config.api_base_url, "admin-console starting");

    if let Err(e) = cli::run(cli).await {
        // Client failures were already printed as notices
        if !matches!(e, ConsoleError::Client(_)) {
            eprintln!("error: {e}");
        }
        tracing::debug!(error = %e, "Command failed");
        std::process::exit(1);
    }
    Ok(())
}
