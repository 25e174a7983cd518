use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_INPUT_DIR: &str = "PL_Spectra_Raw";
pub const DEFAULT_OUTPUT_PATH: &str = "extracted_pl_peaks.csv";
pub const DEFAULT_SUFFIX: &str = ".csv";
pub const DEFAULT_WAVELENGTH_MARKER: &str = "lambda [nm]";
pub const DEFAULT_INTENSITY_MARKER: &str = "intensity [a.u.]";
pub const DEFAULT_DELIMITER: char = '\t';
pub const DEFAULT_COMMENT_MARKER: char = '#';
pub const DEFAULT_SHEET_NAME: &str = "PL_Peaks";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

const MAX_SHEET_NAME_LEN: usize = 31;
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// Serialization of the consolidated peak table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text with a header row.
    #[default]
    Csv,
    /// Single-sheet `.xlsx` workbook.
    Excel,
    /// Apache Parquet file.
    Parquet,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "excel",
            OutputFormat::Parquet => "parquet",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "parquet" | "pq" => Ok(OutputFormat::Parquet),
            other => Err(ConfigError::Invalid(format!(
                "unknown output format '{other}' (expected csv, excel or parquet)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ExtractorConfig
// ---------------------------------------------------------------------------

/// Everything the pipeline needs to know, fixed before the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Directory scanned (non-recursively) for spectrum files.
    pub input_dir: PathBuf,
    /// Where the consolidated table is written.
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    /// Only file names ending with this are processed.
    pub file_suffix: String,
    /// Substring identifying the wavelength column in the header line.
    pub wavelength_marker: String,
    /// Substring identifying the intensity column in the header line.
    pub intensity_marker: String,
    /// Field separator of the data region.
    pub delimiter: char,
    /// In the data region, text from this character to the end of the line
    /// is ignored.
    pub comment_marker: char,
    /// Worksheet name for excel output.
    pub sheet_name: String,
    /// Rows shown in the console summary.
    pub preview_rows: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_format: OutputFormat::default(),
            file_suffix: DEFAULT_SUFFIX.to_string(),
            wavelength_marker: DEFAULT_WAVELENGTH_MARKER.to_string(),
            intensity_marker: DEFAULT_INTENSITY_MARKER.to_string(),
            delimiter: DEFAULT_DELIMITER,
            comment_marker: DEFAULT_COMMENT_MARKER,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the settings the parser relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wavelength_marker.is_empty() || self.intensity_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "column markers must not be empty".into(),
            ));
        }
        if self.file_suffix.is_empty() {
            return Err(ConfigError::Invalid("file suffix must not be empty".into()));
        }
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter {:?} is not a single ASCII character",
                self.delimiter
            )));
        }
        if !self.comment_marker.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "comment marker {:?} is not a single ASCII character",
                self.comment_marker
            )));
        }
        if self.delimiter == self.comment_marker {
            return Err(ConfigError::Invalid(
                "delimiter and comment marker must differ".into(),
            ));
        }
        if self.output_format == OutputFormat::Excel {
            validate_sheet_name(&self.sheet_name)?;
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects. Valid after `validate`.
    pub(crate) fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

/// Excel's worksheet naming rules.
fn validate_sheet_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Invalid("sheet name must not be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(ConfigError::Invalid(format!(
            "sheet name '{name}' is longer than {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| SHEET_NAME_FORBIDDEN.contains(c)) {
        return Err(ConfigError::Invalid(format!(
            "sheet name '{name}' contains '{c}'"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ConfigError::Invalid(format!(
            "sheet name '{name}' must not start or end with an apostrophe"
        )));
    }
    Ok(())
}
