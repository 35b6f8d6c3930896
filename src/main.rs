use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber;

use wordreel::{
    backend::FfmpegBackend,
    composition::CompositionEngine,
    config::Config,
    project::Project,
};

#[derive(Parser)]
#[command(
    name = "wordreel",
    version,
    about = "Turn a vocabulary list into a narrated instructional video",
    long_about = "Wordreel reads a vocabulary project (manifest, item database, cached narration and illustrations) and composes one video: an intro card followed by narrated word and example segments for every item, repeated as configured."
)]
struct Cli {
    /// Project directory (contains manifest.json and database.json)
    #[arg(short, long)]
    project: PathBuf,

    /// Output video file path
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remove cached segment clips after a successful run
    #[arg(long)]
    clear_cache: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Wordreel v{}", env!("CARGO_PKG_VERSION"));
    info!("Project: {:?}", cli.project);
    info!("Output: {:?}", cli.output);

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    // Open the project
    let project = Project::load(&cli.project)?;
    info!(
        "Loaded project '{}' ({} items)",
        project.manifest().name,
        project.items().len()
    );

    // Create and run the composition engine
    let backend = Arc::new(FfmpegBackend::new(config.encode.clone()));
    let engine = CompositionEngine::new(config, backend);

    info!("Starting generation...");
    let video = engine.generate(&project, &cli.output).await?;

    info!(
        "Generation complete! {:?} ({:.1}s, {} clips)",
        video.path, video.duration, video.clip_count
    );

    if cli.clear_cache {
        project.clear_video_cache()?;
    }

    Ok(())
}
