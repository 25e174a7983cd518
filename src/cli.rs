use std::path::PathBuf;

use clap::Parser;

use pl_peaks::config::{ExtractorConfig, OutputFormat};

/// Extract the peak wavelength and intensity from every PL spectrum file in a
/// directory and write them to one table.
#[derive(Parser, Debug)]
#[command(name = "pl-peaks", version, about)]
pub struct Cli {
    /// JSON file with extractor settings. Flags given here override it.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing the raw spectrum files
    #[arg(short, long, value_name = "DIR", env = "PL_PEAKS_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output table path
    #[arg(short, long, value_name = "PATH", env = "PL_PEAKS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format: csv, excel or parquet
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only process file names ending with this
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Header substring naming the wavelength column
    #[arg(long, value_name = "TEXT")]
    pub wavelength_marker: Option<String>,

    /// Header substring naming the intensity column
    #[arg(long, value_name = "TEXT")]
    pub intensity_marker: Option<String>,

    /// Field delimiter of the data rows ("tab" or "\t" for a tab)
    #[arg(long, value_name = "CHAR", value_parser = parse_single_char)]
    pub delimiter: Option<char>,

    /// Data lines starting with this character are skipped
    #[arg(long, value_name = "CHAR", value_parser = parse_single_char)]
    pub comment: Option<char>,

    /// Worksheet name for excel output
    #[arg(long, value_name = "NAME")]
    pub sheet_name: Option<String>,

    /// Number of rows shown in the final summary
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Increase verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Lay the flags that were given over `base`.
    pub fn apply(&self, base: ExtractorConfig) -> ExtractorConfig {
        let mut cfg = base;
        if let Some(dir) = &self.input_dir {
            cfg.input_dir = dir.clone();
        }
        if let Some(path) = &self.output {
            cfg.output_path = path.clone();
        }
        if let Some(format) = self.format {
            cfg.output_format = format;
        }
        if let Some(suffix) = &self.suffix {
            cfg.file_suffix = suffix.clone();
        }
        if let Some(marker) = &self.wavelength_marker {
            cfg.wavelength_marker = marker.clone();
        }
        if let Some(marker) = &self.intensity_marker {
            cfg.intensity_marker = marker.clone();
        }
        if let Some(c) = self.delimiter {
            cfg.delimiter = c;
        }
        if let Some(c) = self.comment {
            cfg.comment_marker = c;
        }
        if let Some(name) = &self.sheet_name {
            cfg.sheet_name = name.clone();
        }
        if let Some(n) = self.preview {
            cfg.preview_rows = n;
        }
        cfg
    }
}

fn parse_single_char(s: &str) -> Result<char, String> {
    match s {
        "tab" | "\\t" => return Ok('\t'),
        "space" => return Ok(' '),
        _ => {}
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got '{s}'")),
    }
}
