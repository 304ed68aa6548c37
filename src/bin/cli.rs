//! yeyak CLI
//!
//! Local and scheduled execution entry point.
//! Exit status: 0 on success, 2 for configuration errors, 3 for fetch or file failures.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use yeyak::{
    error::{AppError, Result},
    models::{API_KEY_ENV, Config, FetchStats},
    pipeline,
    services::ReqwestTransport,
    storage::LocalStorage,
    utils::env::resolve_credential,
};

/// yeyak - Seoul public reservation daily digest
#[derive(Parser, Debug)]
#[command(
    name = "yeyak",
    version,
    about = "Seoul public service reservation digest"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory for result files (overrides output.dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every listing page and write the result files
    Fetch(KeyArgs),

    /// Print the daily digest from existing result files
    Summary,

    /// Run full pipeline: Fetch → Summary
    Pipeline(KeyArgs),

    /// Validate configuration file
    Validate,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Listing API key
    #[arg(long, env = "SEOUL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Dotenv file consulted when the key is not in the environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Resolve the API key, validate configuration and run the fetch pipeline.
async fn fetch(config: &Config, key: &KeyArgs, storage: &LocalStorage) -> Result<FetchStats> {
    let api_key = resolve_credential(key.api_key.as_deref(), &key.env_file, API_KEY_ENV)
        .ok_or_else(|| AppError::config(format!("Missing {API_KEY_ENV} environment variable.")))?;
    config.validate()?;

    let transport = ReqwestTransport::from_config(&config.api)?;
    pipeline::run_fetch(config, &api_key, &transport, storage).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }
    log::debug!("Output directory: {}", config.output.dir.display());

    let storage = LocalStorage::from_config(&config.output);

    match cli.command {
        Command::Fetch(key) => {
            fetch(&config, &key, &storage).await?;
            log::info!("Fetch complete!");
        }

        Command::Summary => {
            let text = pipeline::run_summary(&config, &storage).await?;
            println!("{text}");
        }

        Command::Pipeline(key) => {
            log::info!("Step 1/2: Fetching listings...");
            fetch(&config, &key, &storage).await?;

            log::info!("Step 2/2: Rendering summary...");
            let text = pipeline::run_summary(&config, &storage).await?;
            println!("{text}");
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
