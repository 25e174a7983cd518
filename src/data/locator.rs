use std::path::Path;

use anyhow::{Context, Result};

use super::model::SpectrumFile;

/// Derive the sample identifier from a file name by dropping its extension.
///
/// `G25-023-center.csv` → `G25-023-center`. Only the last extension goes,
/// so `run.2.csv` → `run.2`.
pub fn sample_id_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// List the spectrum files directly inside `dir` whose names end with
/// `suffix`, in directory-listing order. Subdirectories are not entered.
///
/// Failing to list the directory is fatal for the run; entries that cannot
/// be inspected are skipped with a warning.
pub fn locate_spectrum_files(dir: &Path, suffix: &str) -> Result<Vec<SpectrumFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            log::warn!("Skipping non UTF-8 file name {file_name:?}");
            continue;
        };
        if !name.ends_with(suffix) {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        files.push(SpectrumFile {
            sample_id: sample_id_from_file_name(name),
            path,
        });
    }

    log::debug!(
        "Found {} '*{suffix}' file(s) in {}",
        files.len(),
        dir.display()
    );
    Ok(files)
}
