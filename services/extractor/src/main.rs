//! Bloom data extractor.
//!
//! Reads a gridded vegetation-index container (MODIS-style HDF granule),
//! runs the extraction pipeline, and writes the GeoJSON point collection
//! consumed by the bloom data-serving layer.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bloom_common::BoundingBox;
use bloom_pipeline::{run_extraction, ExtractConfig};

#[derive(Parser, Debug)]
#[command(name = "extractor")]
#[command(about = "Extract vegetation-index points from a raster container into GeoJSON")]
struct Args {
    /// Path to the input raster container (HDF granule)
    input: PathBuf,

    /// Output GeoJSON path
    #[arg(short, long, default_value = "bloom_data.json")]
    output: PathBuf,

    /// Sample every Nth pixel in both axes
    #[arg(short, long, default_value_t = 10)]
    stride: usize,

    /// Sub-dataset carrying the index band (enumeration order)
    #[arg(long, default_value_t = 0)]
    subdataset: usize,

    /// Band number within the sub-dataset (1-based)
    #[arg(long, default_value_t = 1)]
    band: usize,

    /// Region of interest as min_lon,min_lat,max_lon,max_lat
    #[arg(long)]
    region: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting bloom data extractor");

    // Environment overrides first, command line on top.
    let mut config = ExtractConfig::from_env();
    config.stride = args.stride;
    config.subdataset = args.subdataset;
    config.band = args.band;
    if let Some(region) = &args.region {
        config.region = BoundingBox::from_csv_string(region)?;
    }

    let summary = run_extraction(&args.input, &args.output, &config)?;

    match summary.ndvi_range {
        Some((lo, hi)) => info!(
            features = summary.features,
            ndvi_min = lo,
            ndvi_max = hi,
            "Extraction complete"
        ),
        None => info!(
            features = 0usize,
            "Extraction complete; no samples inside the configured region"
        ),
    }

    Ok(())
}
