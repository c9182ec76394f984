mod error;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use chrono::NaiveDate;
use chrono::Utc;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use common::config::Config;
use dateparser::DateTimeUtc;
use exporter::gcs::Uploader;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing::info;
use tracing::metadata::LevelFilter;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::error::Result;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE.into(),
            LogLevel::Debug => Level::DEBUG.into(),
            LogLevel::Info => Level::INFO.into(),
            LogLevel::Warn => Level::WARN.into(),
            LogLevel::Error => Level::ERROR.into(),
        }
    }
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(version, about = "synthetic coffee shop dataset tooling")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
    /// Optional TOML config file, layered under COFFEE__* environment variables
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate the dataset and write it as CSV files
    Generate {
        /// Output folder for the CSV files
        #[arg(long)]
        out: Option<PathBuf>,
        /// Random seed override
        #[arg(long)]
        seed: Option<u64>,
        /// First day of the date range, e.g. 2022-01-01
        #[arg(long)]
        from: Option<String>,
        /// Last day of the date range, inclusive
        #[arg(long)]
        to: Option<String>,
        /// Upload the files to the GCS bucket after writing them
        #[arg(long, default_value = "false")]
        upload: bool,
    },
    /// Upload a folder of CSV files to the GCS bucket
    Upload {
        /// Folder to upload, defaults to the configured output folder
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Load the uploaded CSV files into the warehouse dataset
    Load,
    /// Trigger the remote generation job
    Trigger,
    /// Serve the load and trigger operations over HTTP
    Serve {
        /// Listen address override, e.g. 0.0.0.0:8080
        #[arg(long)]
        host: Option<SocketAddr>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(raw.parse::<DateTimeUtc>()?.0.with_timezone(&Utc).date_naive())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let version = env!("CARGO_PKG_VERSION");
    info!("coffeegen v{version}");

    let mut cfg = Config::load(args.config.as_deref())?;

    match args.cmd {
        Cmd::Generate {
            out,
            seed,
            from,
            to,
            upload,
        } => {
            if let Some(seed) = seed {
                cfg.generation.random_seed = seed;
            }
            if let Some(from) = &from {
                cfg.generation.overall_start = parse_date(from)?;
            }
            if let Some(to) = &to {
                cfg.generation.overall_end = Some(parse_date(to)?);
            }
            if let Some(out) = out {
                cfg.export.local_folder = out;
            }

            debug!("random seed: {}", cfg.generation.random_seed);
            debug!(
                "date range: {} - {}",
                cfg.generation.overall_start,
                cfg.generation
                    .overall_end
                    .unwrap_or_else(|| Utc::now().date_naive())
            );
            debug!("output folder: {}", cfg.export.local_folder.display());

            let uploader = if upload {
                Some(Uploader::try_new(&cfg.export)?)
            } else {
                None
            };

            info!("starting data generation...");
            let started = Instant::now();

            let mut rng = StdRng::seed_from_u64(cfg.generation.random_seed);
            let dataset = dataset_gen::generate(&cfg.generation, &mut rng)?;
            let files = exporter::csv::write_dataset(&dataset, &cfg.export.local_folder)?;

            if let Some(uploader) = uploader {
                info!("uploading {} files to gcs...", files.len());
                uploader.upload_files(&files).await?;
            }

            let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
            info!("done in {}", humantime::format_duration(elapsed));
        }
        Cmd::Upload { dir } => {
            let dir = dir.unwrap_or_else(|| cfg.export.local_folder.clone());
            info!("uploading csv files from {}...", dir.display());
            let uploader = Uploader::try_new(&cfg.export)?;
            uploader.upload_dir(&dir).await?;
        }
        Cmd::Load => {
            info!("loading tables into the warehouse...");
            cloud::bigquery::load_tables(&cfg).await?;
            info!("all tables loaded");
        }
        Cmd::Trigger => {
            cloud::run_jobs::trigger_job(&cfg.jobs).await?;
        }
        Cmd::Serve { host } => {
            if let Some(host) = host {
                cfg.server.host = host;
            }
            cloud::http::serve(cfg).await?;
        }
    }

    Ok(())
}
