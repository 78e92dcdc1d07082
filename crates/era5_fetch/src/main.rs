use std::path::PathBuf;

use cds_client::{Client, ClientOptions};
use clap::Parser;
use era5_fetch::{FetchConfig, FetchPlan};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Download ERA5 reanalysis data from the Climate Data Store: one file per
/// variable per year.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML file with the years, area and variables to download.
    #[arg(long)]
    config: PathBuf,

    /// Write files here instead of the config's `output_dir`.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override the first year of the config's range.
    #[arg(long)]
    start_year: Option<i32>,

    /// Override the last year of the config's range.
    #[arg(long)]
    end_year: Option<i32>,

    /// Print the files that would be downloaded, then exit.
    #[arg(long)]
    dry_run: bool,

    /// Log filter, e.g. `info` or `era5_fetch=debug,cds_client=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Hide download progress bars.
    #[arg(long)]
    no_progress: bool,

    /// Leave finished jobs on the archive instead of deleting them.
    #[arg(long)]
    keep_jobs: bool,
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .with_target(false)
        .init();

    let mut config = FetchConfig::load(&args.config)?;
    if let Some(output_dir) = args.output_dir {
        config = config.with_output_dir(output_dir);
    }
    let config = config.with_years(args.start_year, args.end_year)?;

    if args.dry_run {
        for task in FetchPlan::new(&config).tasks() {
            println!("{}", task.target.display());
        }
        return Ok(());
    }

    let client = Client::from_env(ClientOptions {
        delete_finished_jobs: !args.keep_jobs,
        show_progress: !args.no_progress,
        ..ClientOptions::default()
    })?;
    info!(url = %client.credentials().url, "Using CDS API");

    let summary = era5_fetch::run(&client, &config).await?;
    info!(files = summary.files.len(), "Finished");
    Ok(())
}
