//! Batch extraction of photoluminescence peak positions.
//!
//! Every spectrum file in a directory is reduced to its maximum-intensity
//! (wavelength, intensity) pair, and the results are written as one table
//! keyed by sample identifier.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::{ExtractorConfig, OutputFormat};
pub use data::model::{OutputTable, PeakResult, SpectrumFile, SpectrumPoint};
pub use error::{ConfigError, SpectrumError};
pub use pipeline::{analyze_file, run, FileFailure, RunSummary};
