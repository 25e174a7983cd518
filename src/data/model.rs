use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Column headers of the consolidated output table, in output order.
pub const SAMPLE_COLUMN: &str = "QW_Sample";
pub const WAVELENGTH_COLUMN: &str = "PL_Peak_Wavelength_nm";
pub const INTENSITY_COLUMN: &str = "PL_Peak_Intensity_au";

// ---------------------------------------------------------------------------
// SpectrumFile – one candidate input file
// ---------------------------------------------------------------------------

/// A spectrum file found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumFile {
    pub path: PathBuf,
    /// File name without its extension.
    pub sample_id: String,
}

impl SpectrumFile {
    /// File name component, for log messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// SpectrumPoint – one numeric data row
// ---------------------------------------------------------------------------

/// A single (wavelength, intensity) row, in the units of the source file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    pub wavelength: f64,
    pub intensity: f64,
}

impl SpectrumPoint {
    pub fn new(wavelength: f64, intensity: f64) -> Self {
        Self {
            wavelength,
            intensity,
        }
    }
}

// ---------------------------------------------------------------------------
// PeakResult – one row of the output table
// ---------------------------------------------------------------------------

/// The maximum-intensity point of one sample's spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakResult {
    #[serde(rename = "QW_Sample")]
    pub sample_id: String,
    #[serde(rename = "PL_Peak_Wavelength_nm")]
    pub peak_wavelength: f64,
    #[serde(rename = "PL_Peak_Intensity_au")]
    pub peak_intensity: f64,
}

impl PeakResult {
    pub fn from_point(sample_id: impl Into<String>, point: SpectrumPoint) -> Self {
        Self {
            sample_id: sample_id.into(),
            peak_wavelength: point.wavelength,
            peak_intensity: point.intensity,
        }
    }
}

impl fmt::Display for PeakResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Wavelength={:.2} nm, Intensity={:.4} a.u.",
            self.sample_id, self.peak_wavelength, self.peak_intensity
        )
    }
}

// ---------------------------------------------------------------------------
// OutputTable – the consolidated result
// ---------------------------------------------------------------------------

/// Peak rows in file-processing order. Duplicate sample IDs are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    pub rows: Vec<PeakResult>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: PeakResult) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed column order of every serialized form.
    pub fn column_names() -> [&'static str; 3] {
        [SAMPLE_COLUMN, WAVELENGTH_COLUMN, INTENSITY_COLUMN]
    }
}

impl From<Vec<PeakResult>> for OutputTable {
    fn from(rows: Vec<PeakResult>) -> Self {
        Self { rows }
    }
}
