//! Ground-observation CSV to GeoJSON converter.
//!
//! Converts observation CSV (`latitude,longitude,ndvi[,date]`, with header)
//! into the same point-collection schema the raster extractor emits.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bloom_common::BoundingBox;
use bloom_pipeline::{convert_observations_file, ExtractConfig};

#[derive(Parser, Debug)]
#[command(name = "csv2geojson")]
#[command(about = "Convert observation CSV (latitude,longitude,ndvi[,date]) to bloom GeoJSON")]
struct Args {
    /// Input CSV path
    input: PathBuf,

    /// Output GeoJSON path
    output: PathBuf,

    /// Region of interest as min_lon,min_lat,max_lon,max_lat
    #[arg(long)]
    region: Option<String>,

    /// Decimal places for emitted values
    #[arg(long, default_value_t = 3)]
    precision: u32,

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

    info!("Starting observation CSV converter");

    let config = ExtractConfig::from_env();
    let region = match &args.region {
        Some(region) => BoundingBox::from_csv_string(region)?,
        None => config.region,
    };

    let stats = convert_observations_file(&args.input, &args.output, &region, args.precision)?;

    match stats.ndvi_range {
        Some((lo, hi)) => info!(
            features = stats.count,
            ndvi_min = lo,
            ndvi_max = hi,
            "Conversion complete"
        ),
        None => info!(
            features = 0usize,
            "Conversion complete; no rows survived the filters"
        ),
    }

    Ok(())
}
