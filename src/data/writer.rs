use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

use super::model::{
    OutputTable, PeakResult, INTENSITY_COLUMN, SAMPLE_COLUMN, WAVELENGTH_COLUMN,
};
use crate::config::{ExtractorConfig, OutputFormat};

/// Where and how the table actually ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Set when excel output was requested but CSV was written instead.
    pub fell_back: bool,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Serialize `table` to `cfg.output_path` in `cfg.output_format`.
pub fn write_table(table: &OutputTable, cfg: &ExtractorConfig) -> Result<WrittenOutput> {
    let path = cfg.output_path.as_path();
    match cfg.output_format {
        OutputFormat::Csv => {
            write_csv(table, path)?;
            Ok(WrittenOutput {
                path: path.to_path_buf(),
                format: OutputFormat::Csv,
                fell_back: false,
            })
        }
        OutputFormat::Excel => write_excel_or_fallback(table, path, &cfg.sheet_name),
        OutputFormat::Parquet => {
            write_parquet(table, path)?;
            Ok(WrittenOutput {
                path: path.to_path_buf(),
                format: OutputFormat::Parquet,
                fell_back: false,
            })
        }
    }
}

/// Path used when a spreadsheet cannot be written: `.xlsx` becomes `.csv`,
/// any other path is kept as is.
pub fn fallback_csv_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => path.with_extension("csv"),
        _ => path.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Comma-separated, header row first.
pub fn write_csv(table: &OutputTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &table.rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing row for '{}'", row.sample_id))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// Read a table written by [`write_csv`].
pub fn read_csv_table(path: &Path) -> Result<OutputTable> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let rows = reader
        .deserialize::<PeakResult>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("{}: row {i}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    Ok(OutputTable::from(rows))
}

// ---------------------------------------------------------------------------
// Excel
// ---------------------------------------------------------------------------

#[cfg(feature = "excel")]
fn write_excel_or_fallback(
    table: &OutputTable,
    path: &Path,
    sheet_name: &str,
) -> Result<WrittenOutput> {
    match write_excel(table, path, sheet_name) {
        Ok(()) => Ok(WrittenOutput {
            path: path.to_path_buf(),
            format: OutputFormat::Excel,
            fell_back: false,
        }),
        Err(e) => fall_back_to_csv(table, path, &format!("{e:#}")),
    }
}

#[cfg(not(feature = "excel"))]
fn write_excel_or_fallback(
    table: &OutputTable,
    path: &Path,
    _sheet_name: &str,
) -> Result<WrittenOutput> {
    fall_back_to_csv(
        table,
        path,
        "Excel support is not compiled in (enable the `excel` feature)",
    )
}

fn fall_back_to_csv(table: &OutputTable, path: &Path, reason: &str) -> Result<WrittenOutput> {
    let csv_path = fallback_csv_path(path);
    log::warn!(
        "Cannot save to Excel: {reason}. Saving to CSV instead: {}",
        csv_path.display()
    );
    write_csv(table, &csv_path)?;
    Ok(WrittenOutput {
        path: csv_path,
        format: OutputFormat::Csv,
        fell_back: true,
    })
}

#[cfg(feature = "excel")]
fn write_excel(table: &OutputTable, path: &Path, sheet_name: &str) -> Result<()> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name)
        .with_context(|| format!("invalid sheet name '{sheet_name}'"))?;

    for (col, name) in OutputTable::column_names().iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.sample_id)?;
        sheet.write_number(r, 1, row.peak_wavelength)?;
        sheet.write_number(r, 2, row.peak_intensity)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("saving workbook {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Arrow / Parquet
// ---------------------------------------------------------------------------

/// The table as a single Arrow record batch with the fixed column order.
pub fn to_record_batch(table: &OutputTable) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(SAMPLE_COLUMN, DataType::Utf8, false),
        Field::new(WAVELENGTH_COLUMN, DataType::Float64, false),
        Field::new(INTENSITY_COLUMN, DataType::Float64, false),
    ]));

    let samples = StringArray::from(
        table
            .rows
            .iter()
            .map(|r| r.sample_id.as_str())
            .collect::<Vec<_>>(),
    );
    let wavelengths = Float64Array::from(
        table.rows.iter().map(|r| r.peak_wavelength).collect::<Vec<_>>(),
    );
    let intensities = Float64Array::from(
        table.rows.iter().map(|r| r.peak_intensity).collect::<Vec<_>>(),
    );

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(samples) as ArrayRef,
            Arc::new(wavelengths) as ArrayRef,
            Arc::new(intensities) as ArrayRef,
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

pub fn write_parquet(table: &OutputTable, path: &Path) -> Result<()> {
    let batch = to_record_batch(table)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// First `rows` rows rendered as a text table for the console.
pub fn preview(table: &OutputTable, rows: usize) -> Result<String> {
    let batch = to_record_batch(table)?;
    let head = batch.slice(0, rows.min(batch.num_rows()));
    let rendered = pretty_format_batches(&[head]).context("formatting preview")?;
    Ok(rendered.to_string())
}
