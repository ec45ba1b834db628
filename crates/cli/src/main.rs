use clap::Parser;
use tracing_subscriber::EnvFilter;

use repofs_cli::cli::{Cli, Commands};
use repofs_cli::commands::{handle_config_command, handle_file_command};
use repofs_cli::config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let overrides = cli.overrides();

    match cli.command {
        Commands::Config { command } => handle_config_command(command).await?,
        command => {
            let config = Config::load().await?;
            let adapter = repofs_cli::build_adapter(config, overrides)?;
            tracing::debug!(
                "Using project {} on branch {}",
                adapter.client().project_id(),
                adapter.client().branch()
            );

            let mut stdout = std::io::stdout();
            handle_file_command(command, &adapter, &mut stdout).await?;
        }
    }

    Ok(())
}
