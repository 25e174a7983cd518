use std::path::PathBuf;

use thiserror::Error;

/// Why a single spectrum file produced no peak.
///
/// None of these abort a batch run: the pipeline records the failure and
/// moves on to the next file.
#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error(
        "could not find data header '{wavelength_marker}' / '{intensity_marker}' in {}",
        path.display()
    )]
    HeaderNotFound {
        path: PathBuf,
        wavelength_marker: String,
        intensity_marker: String,
    },

    #[error("no valid numerical PL data found in {}", path.display())]
    NoData { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SpectrumError {
    /// Short label for summaries and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SpectrumError::NotFound { .. } => "not found",
            SpectrumError::HeaderNotFound { .. } => "header not found",
            SpectrumError::NoData { .. } => "no data",
            SpectrumError::Read { .. } | SpectrumError::Malformed { .. } => "unexpected I/O",
        }
    }

    /// Expected, data-driven skips are warnings; the rest are errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, SpectrumError::NoData { .. })
    }
}

/// Invalid extractor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_not_found_names_file_and_markers() {
        let err = SpectrumError::HeaderNotFound {
            path: PathBuf::from("raw/B.csv"),
            wavelength_marker: "lambda [nm]".into(),
            intensity_marker: "intensity [a.u.]".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("raw/B.csv"));
        assert!(msg.contains("lambda [nm]"));
        assert!(msg.contains("intensity [a.u.]"));
        assert_eq!(err.kind(), "header not found");
        assert!(!err.is_warning());
    }

    #[test]
    fn no_data_is_a_warning() {
        let err = SpectrumError::NoData {
            path: PathBuf::from("B.csv"),
        };
        assert!(err.is_warning());
    }
}
