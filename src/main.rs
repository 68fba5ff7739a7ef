use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_curator::{
    config::Config,
    pipeline::Curator,
    sources::{SourceFetcher, StreamProber},
};

#[derive(Parser)]
#[command(name = "m3u-curator")]
#[command(version)]
#[command(about = "IPTV playlist curation with identity mapping and categorised output")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge every source in the source list into the combined playlist
    Merge,
    /// Probe the combined playlist and keep the live entries
    Check,
    /// Curate the working and custom sources into categorised playlists
    Curate,
    /// Merge, check and curate in sequence
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("m3u_curator={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting m3u-curator v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    match cli.command {
        Commands::Merge => {
            merge_stage(&config).await?;
        }
        Commands::Check => {
            check_stage(&config).await?;
        }
        Commands::Curate => {
            curate_stage(&config).await?;
        }
        Commands::Run => {
            merge_stage(&config).await?;
            check_stage(&config).await?;
            curate_stage(&config).await?;
        }
    }

    Ok(())
}

async fn merge_stage(config: &Config) -> Result<()> {
    let fetcher = SourceFetcher::new(config.sources.fetch_timeout_secs);
    let merged = fetcher
        .merge_source_list(&config.sources.source_list, &config.output.total_playlist)
        .await?;
    info!("Merge stage complete: {} sources", merged);
    Ok(())
}

async fn check_stage(config: &Config) -> Result<()> {
    let prober = StreamProber::new(config.probe.timeout_secs, config.probe.concurrency);
    let alive = prober
        .check_playlist(
            &config.output.total_playlist,
            &config.sources.working_playlist,
        )
        .await?;
    info!("Check stage complete: {} live entries", alive);
    Ok(())
}

async fn curate_stage(config: &Config) -> Result<()> {
    let report = Curator::new(config.clone()).run().await?;
    info!(
        "Curate stage complete: {} channels, {} records ({} flagged), {} unresolved names",
        report.channels, report.records, report.flagged, report.unresolved
    );
    Ok(())
}
