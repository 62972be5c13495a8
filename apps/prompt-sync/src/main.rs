mod config;
mod errors;
mod github;
mod models;
mod pipeline;
mod progress;
mod records;
mod throttle;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::github::GithubClient;
use crate::pipeline::{SyncPipeline, SyncTargets};
use crate::progress::{ConsoleProgress, ProgressObserver, SilentProgress};

/// Fetch community prompts and bake them, with the bundled prompts, into one JSON dataset.
#[derive(Parser, Debug)]
#[command(name = "prompt-sync", version)]
struct Cli {
    /// Directory listing endpoint to read prompt files from
    #[arg(long)]
    listing_url: Option<String>,

    /// Bundled prompts merged ahead of the remote ones
    #[arg(long)]
    local: Option<PathBuf>,

    /// Destination of the merged dataset
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pause after each download, in milliseconds (0 disables)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Run everything except writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Hide the download progress and summary lines
    #[arg(long, short)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError updating prompts: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli);

    // Logs go to stderr; stdout is reserved for progress output.
    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, &config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting prompt sync v{}", env!("CARGO_PKG_VERSION"));

    let client = GithubClient::new(
        &config.user_agent,
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let progress: Box<dyn ProgressObserver> = if cli.quiet {
        Box::new(SilentProgress)
    } else {
        Box::new(ConsoleProgress)
    };

    let pipeline = SyncPipeline::new(
        Box::new(client.clone()),
        Box::new(client),
        throttle::from_millis(config.request_delay_ms),
        progress,
        SyncTargets {
            listing_url: config.listing_url,
            file_suffix: config.file_suffix,
            local_file: config.local_prompts_file,
            output_file: config.output_file,
            dry_run: cli.dry_run,
        },
    );

    let summary = pipeline.run().await?;
    info!(
        "Sync finished: {} local, {} remote, {} written to {}",
        summary.local,
        summary.remote,
        summary.written,
        summary.output.display()
    );

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.listing_url {
        config.listing_url = url.clone();
    }
    if let Some(path) = &cli.local {
        config.local_prompts_file = path.clone();
    }
    if let Some(path) = &cli.output {
        config.output_file = path.clone();
    }
    if let Some(ms) = cli.delay_ms {
        config.request_delay_ms = ms;
    }
}

/// `--verbose` forces debug output for this crate, even over `RUST_LOG`.
fn log_filter(verbose: bool, rust_log: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME")));
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log)))
}
