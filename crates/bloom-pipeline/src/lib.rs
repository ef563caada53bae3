//! Raster-to-points vegetation index extraction.
//!
//! One pipeline, four sequential stages:
//!
//! 1. **Loader**: open the container, pick the sub-dataset carrying the
//!    index band, read geotransform and raw grid (`raster-source`).
//! 2. **Decoder**: scaled-integer values to physical index values, fill
//!    envelope checked in raw encoding space.
//! 3. **Sampler & Geolocator**: strided row-major walk, domain and region
//!    filters, affine geolocation, lazy output.
//! 4. **Emitter**: GeoJSON feature assembly, rounding, one atomic write.
//!
//! The stages run single-threaded and strictly in order; a failure anywhere
//! aborts the run without partial output.

pub mod config;
pub mod decoder;
pub mod emitter;
pub mod error;
pub mod metadata;
pub mod observations;
pub mod pipeline;
pub mod sampler;

pub use config::ExtractConfig;
pub use decoder::Decoder;
pub use emitter::{build_collection, round_to, write_atomic, EmitStats};
pub use error::{ExtractError, Result};
pub use metadata::{parse_granule_filename, GranuleInfo};
pub use observations::{convert_observations, convert_observations_file};
pub use pipeline::{extract_from_container, run_extraction, ExtractionSummary};
pub use sampler::{sample, Sample, SampleIter};
