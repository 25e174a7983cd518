use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::SpectrumPoint;
use crate::config::ExtractorConfig;
use crate::error::SpectrumError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Numeric rows of one spectrum file, plus how many data rows were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSpectrum {
    /// Points in file order.
    pub points: Vec<SpectrumPoint>,
    /// Data-region records that were not two numeric fields.
    pub dropped_rows: usize,
}

/// Read a PL spectrum file and return its numeric (wavelength, intensity) rows.
///
/// File layout:
///
/// ```text
/// # Sample: G25-023        ┐
/// # Integration: 100 ms    │ discarded, whatever it contains
/// some free-form metadata  ┘
/// lambda [nm]	intensity [a.u.]   ← first line containing both markers
/// 500.0	10.0                    ┐
/// # comment                      │ data region
/// 510.0	55.2  # saturated       ┘  (text after `#` is ignored)
/// ```
///
/// An empty result is not an error here; the caller decides what a file
/// without data means.
pub fn load_spectrum(
    path: &Path,
    cfg: &ExtractorConfig,
) -> Result<ParsedSpectrum, SpectrumError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => SpectrumError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SpectrumError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_spectrum(&text, path, cfg)
}

/// Parse spectrum text already in memory. `path` is only used in errors.
pub fn parse_spectrum(
    text: &str,
    path: &Path,
    cfg: &ExtractorConfig,
) -> Result<ParsedSpectrum, SpectrumError> {
    let data = data_region(text, &cfg.wavelength_marker, &cfg.intensity_marker).ok_or_else(
        || SpectrumError::HeaderNotFound {
            path: path.to_path_buf(),
            wavelength_marker: cfg.wavelength_marker.clone(),
            intensity_marker: cfg.intensity_marker.clone(),
        },
    )?;

    let data = strip_comments(data, cfg.comment_marker);

    // Quotes carry no meaning in spectrometer exports; one stray `"` must not
    // merge the following lines into a single field.
    let mut reader = ReaderBuilder::new()
        .delimiter(cfg.delimiter_byte())
        .quoting(false)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    let mut parsed = ParsedSpectrum::default();
    for result in reader.records() {
        let record = result.map_err(|source| SpectrumError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        match parse_point(&record) {
            Some(point) => parsed.points.push(point),
            None => parsed.dropped_rows += 1,
        }
    }

    log::debug!(
        "{}: {} numeric row(s), {} dropped",
        path.display(),
        parsed.points.len(),
        parsed.dropped_rows
    );
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Everything after the first line that contains both column markers.
fn data_region<'t>(
    text: &'t str,
    wavelength_marker: &str,
    intensity_marker: &str,
) -> Option<&'t str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.contains(wavelength_marker) && line.contains(intensity_marker) {
            return Some(&text[offset..]);
        }
    }
    None
}

/// Cut every line at the comment marker and drop lines left blank.
fn strip_comments(data: &str, comment_marker: char) -> String {
    data.lines()
        .map(|line| line.split_once(comment_marker).map_or(line, |(kept, _)| kept))
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Exactly two numeric fields. NaN counts as missing.
fn parse_point(record: &StringRecord) -> Option<SpectrumPoint> {
    if record.len() != 2 {
        return None;
    }
    let wavelength = record.get(0)?.parse::<f64>().ok()?;
    let intensity = record.get(1)?.parse::<f64>().ok()?;
    if wavelength.is_nan() || intensity.is_nan() {
        return None;
    }
    Some(SpectrumPoint::new(wavelength, intensity))
}
