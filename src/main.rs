//! Still Capture CLI
//!
//! Runs one capture session end to end and reports the outcome. The
//! hardware drivers are external collaborators; this binary wires in
//! the mock drivers, which is enough to exercise the whole workflow on
//! a development machine.

use clap::Parser;
use still_capture::{
    config::FileConfig,
    sensor::MockSensor,
    session::{SessionOrchestrator, Stage},
    storage::MockStorage,
    timing::ThreadDelay,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// One bounded still-capture session.
#[derive(Debug, Parser)]
#[command(name = "still-capture", version, about)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of images to capture.
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Override the storage root images are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Still Capture v{}", still_capture::VERSION);

    let mut config = match args.config {
        Some(path) => match FileConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(count) = args.count {
        config.session.capture_count = count;
    }
    if let Some(dir) = args.output_dir {
        config.session.output_dir = dir;
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let mut storage = MockStorage::new();
    let mut sensor = MockSensor::new();
    let delay = ThreadDelay::new();

    let summary = SessionOrchestrator::new(&mut storage, &mut sensor, &config, &delay).run();

    info!(
        "Session finished: {}/{} images saved, {} failures",
        summary.successful_saves(),
        summary.attempted_captures(),
        summary.failures().len()
    );
    for failure in summary.failures() {
        warn!("{}: {}", failure.stage, failure.message);
    }
    for file in summary.listed_files() {
        println!("  {} - {} bytes", file.path.display(), file.size_bytes);
    }

    if let Some(stage) = summary.fatal_stage() {
        if stage == Stage::Mount {
            error!("Make sure:");
            error!("- the card is inserted");
            error!("- the card is formatted as FAT32");
            error!("- the card is not locked/write-protected");
        }
        std::process::exit(1);
    }
}
