use anyhow::{Context, Result};

use crate::config::ExtractorConfig;
use crate::data::loader::load_spectrum;
use crate::data::locator::locate_spectrum_files;
use crate::data::model::{OutputTable, PeakResult, SpectrumFile};
use crate::data::peak::find_peak;
use crate::data::writer::{write_table, WrittenOutput};
use crate::error::SpectrumError;

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// A file that produced no peak, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub sample_id: String,
    pub file_name: String,
    pub kind: &'static str,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Extracted peaks, in processing order.
    pub table: OutputTable,
    pub failures: Vec<FileFailure>,
    /// `None` when nothing was extracted and no file was written.
    pub output: Option<WrittenOutput>,
}

impl RunSummary {
    pub fn files_seen(&self) -> usize {
        self.table.len() + self.failures.len()
    }
}

// ---------------------------------------------------------------------------
// Per-file step
// ---------------------------------------------------------------------------

/// Parse one spectrum file and return its peak.
///
/// A file without numeric rows is reported as [`SpectrumError::NoData`].
pub fn analyze_file(
    file: &SpectrumFile,
    cfg: &ExtractorConfig,
) -> Result<PeakResult, SpectrumError> {
    let parsed = load_spectrum(&file.path, cfg)?;
    let peak = find_peak(&parsed.points).ok_or_else(|| SpectrumError::NoData {
        path: file.path.clone(),
    })?;
    Ok(PeakResult::from_point(file.sample_id.clone(), peak))
}

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

/// Extract the peak of every spectrum file in `cfg.input_dir` and write the
/// consolidated table.
///
/// Only an invalid config, an unlistable input directory, or a failed
/// write is returned as an error. Per-file failures are logged and
/// collected in the summary.
pub fn run(cfg: &ExtractorConfig) -> Result<RunSummary> {
    cfg.validate().context("checking configuration")?;

    log::info!("Scanning raw PL files in: {}", cfg.input_dir.display());
    let files = locate_spectrum_files(&cfg.input_dir, &cfg.file_suffix)?;

    let mut summary = RunSummary::default();
    for file in &files {
        let file_name = file.file_name();
        log::info!("Processing '{file_name}' (Sample ID: {})...", file.sample_id);

        match analyze_file(file, cfg) {
            Ok(peak) => {
                log::info!("  Extracted peak {peak}");
                summary.table.push(peak);
            }
            Err(e) => {
                if e.is_warning() {
                    log::warn!("  Failed to extract peak for {}: {e}", file.sample_id);
                } else {
                    log::error!("  Failed to extract peak for {}: {e}", file.sample_id);
                }
                summary.failures.push(FileFailure {
                    sample_id: file.sample_id.clone(),
                    file_name,
                    kind: e.kind(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if summary.table.is_empty() {
        log::warn!(
            "No PL peaks were successfully extracted. Check your raw data files and configuration."
        );
        return Ok(summary);
    }

    let written = write_table(&summary.table, cfg)?;
    log::info!(
        "Extracted peaks for {} sample(s); saved {} to {}",
        summary.table.len(),
        written.format,
        written.path.display()
    );
    summary.output = Some(written);
    Ok(summary)
}
