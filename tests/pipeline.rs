use std::fs;
use std::path::{Path, PathBuf};

use pl_peaks::data::writer::read_csv_table;
use pl_peaks::{run, ExtractorConfig, OutputFormat};

const HEADER: &str = "lambda [nm]\tintensity [a.u.]\n";

struct Workspace {
    _dir: tempfile::TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn workspace(files: &[(&str, &str)]) -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("PL_Spectra_Raw");
    fs::create_dir(&input).unwrap();
    for (name, body) in files {
        fs::write(input.join(name), body).unwrap();
    }
    let output = dir.path().join("extracted_pl_peaks.csv");
    Workspace {
        _dir: dir,
        input,
        output,
    }
}

fn config(ws: &Workspace) -> ExtractorConfig {
    ExtractorConfig {
        input_dir: ws.input.clone(),
        output_path: ws.output.clone(),
        ..Default::default()
    }
}

fn read_back(path: &Path) -> Vec<(String, f64, f64)> {
    read_csv_table(path)
        .unwrap()
        .rows
        .into_iter()
        .map(|r| (r.sample_id, r.peak_wavelength, r.peak_intensity))
        .collect()
}

#[test]
fn header_only_file_is_skipped() {
    let a = format!("# PL scan\n# operator: kw\n{HEADER}500.0\t10.0\n510.0\t55.2\n");
    let ws = workspace(&[("A.csv", &a), ("B.csv", HEADER)]);

    let summary = run(&config(&ws)).unwrap();

    assert_eq!(summary.table.len(), 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].sample_id, "B");
    assert_eq!(summary.failures[0].kind, "no data");

    let output = summary.output.expect("table should be written");
    assert_eq!(output.path, ws.output);
    assert_eq!(read_back(&ws.output), vec![("A".to_string(), 510.0, 55.2)]);
}

#[test]
fn comments_between_rows_do_not_count() {
    let body = format!("{HEADER}#note\n500.0\t1.0\n#skip\n500.0\t99.0\n");
    let ws = workspace(&[("C.csv", &body)]);

    run(&config(&ws)).unwrap();

    assert_eq!(read_back(&ws.output), vec![("C".to_string(), 500.0, 99.0)]);
}

#[test]
fn malformed_rows_do_not_affect_peak() {
    let body = format!("{HEADER}abc\txyz\n600.0\t3.5\n610.0\tpeak!\n620.0\t2.0\n");
    let ws = workspace(&[("D.csv", &body)]);

    run(&config(&ws)).unwrap();

    assert_eq!(read_back(&ws.output), vec![("D".to_string(), 600.0, 3.5)]);
}

#[test]
fn missing_header_is_logged_and_skipped() {
    let good = format!("{HEADER}450.0\t1.0\n");
    let ws = workspace(&[
        ("good.csv", &good),
        ("noheader.csv", "# export\n450.0\t1.0\n451.0\t2.0\n"),
    ]);

    let summary = run(&config(&ws)).unwrap();

    assert_eq!(summary.table.len(), 1);
    assert_eq!(summary.table.rows[0].sample_id, "good");
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].kind, "header not found");
    assert!(summary.failures[0].reason.contains("noheader.csv"));
}

#[test]
fn peak_matches_max_of_parsed_rows() {
    let rows = [(480.0, 0.2), (481.0, 0.9), (482.0, 1.7), (483.0, 1.7), (484.0, 0.4)];
    let mut body = format!("# generated\n{HEADER}");
    for (w, i) in rows {
        body.push_str(&format!("{w}\t{i}\n"));
    }
    let ws = workspace(&[("E.csv", &body)]);

    run(&config(&ws)).unwrap();

    let max = rows.iter().map(|r| r.1).fold(f64::MIN, f64::max);
    let first = rows.iter().find(|r| r.1 == max).unwrap();
    assert_eq!(read_back(&ws.output), vec![("E".to_string(), first.0, max)]);
}

#[test]
fn other_suffixes_and_subdirectories_are_ignored() {
    let body = format!("{HEADER}500.0\t1.0\n");
    let ws = workspace(&[("A.csv", &body), ("notes.txt", &body)]);
    fs::create_dir(ws.input.join("old")).unwrap();
    fs::write(ws.input.join("old").join("Z.csv"), &body).unwrap();

    let summary = run(&config(&ws)).unwrap();

    assert_eq!(summary.files_seen(), 1);
    assert_eq!(summary.table.rows[0].sample_id, "A");
}

#[test]
fn duplicate_sample_ids_are_preserved() {
    let a = format!("{HEADER}500.0\t1.0\n");
    let b = format!("{HEADER}505.0\t2.0\n");
    let ws = workspace(&[("S.csv", &a), ("S.tsv", &b)]);
    let cfg = ExtractorConfig {
        file_suffix: "sv".into(),
        ..config(&ws)
    };

    let summary = run(&cfg).unwrap();

    assert_eq!(summary.table.len(), 2);
    assert!(summary.table.rows.iter().all(|r| r.sample_id == "S"));
    let mut wavelengths: Vec<f64> = read_back(&ws.output).into_iter().map(|r| r.1).collect();
    wavelengths.sort_by(f64::total_cmp);
    assert_eq!(wavelengths, vec![500.0, 505.0]);
}

#[test]
fn missing_input_directory_is_fatal() {
    let ws = workspace(&[]);
    let cfg = ExtractorConfig {
        input_dir: ws.input.join("nope"),
        ..config(&ws)
    };

    let err = run(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("reading input directory"));
    assert!(!ws.output.exists());
}

#[test]
fn bad_sheet_name_fails_before_any_file_is_read() {
    let body = format!("{HEADER}500.0\t10.0\n");
    let ws = workspace(&[("A.csv", &body)]);
    let cfg = ExtractorConfig {
        output_path: ws.output.with_extension("xlsx"),
        output_format: OutputFormat::Excel,
        sheet_name: "PL/Peaks run 2026".into(),
        ..config(&ws)
    };

    let err = run(&cfg).unwrap_err();

    assert!(format!("{err:#}").contains("sheet name"));
    assert!(!ws.output.exists());
    assert!(!ws.output.with_extension("xlsx").exists());
}

#[test]
fn trailing_comment_on_peak_row() {
    let body = format!("{HEADER}500.0\t10.0\n510.0\t55.2  # saturated\n520.0\t30.0\n");
    let ws = workspace(&[("G.csv", &body)]);

    run(&config(&ws)).unwrap();

    assert_eq!(read_back(&ws.output), vec![("G".to_string(), 510.0, 55.2)]);
}

#[test]
fn stray_quote_does_not_hide_later_rows() {
    let body = format!("{HEADER}500\t1\n\"bad\t2\n510\t99\n520\t3\n");
    let ws = workspace(&[("H.csv", &body)]);

    run(&config(&ws)).unwrap();

    assert_eq!(read_back(&ws.output), vec![("H".to_string(), 510.0, 99.0)]);
}

#[test]
fn empty_directory_writes_nothing() {
    let ws = workspace(&[]);
    let summary = run(&config(&ws)).unwrap();
    assert!(summary.output.is_none());
    assert!(!ws.output.exists());
}

#[test]
fn comma_separated_input() {
    let ws = workspace(&[(
        "F.txt",
        "Wavelength (nm),Counts\n;dark frame subtracted\n700,12\n705,40\n710,33\n",
    )]);
    let cfg = ExtractorConfig {
        file_suffix: ".txt".into(),
        wavelength_marker: "Wavelength (nm)".into(),
        intensity_marker: "Counts".into(),
        delimiter: ',',
        comment_marker: ';',
        ..config(&ws)
    };

    run(&cfg).unwrap();

    assert_eq!(read_back(&ws.output), vec![("F".to_string(), 705.0, 40.0)]);
}

#[test]
fn parquet_output() {
    let body = format!("{HEADER}500.0\t10.0\n510.0\t55.2\n");
    let ws = workspace(&[("A.csv", &body)]);
    let out = ws.output.with_extension("parquet");
    let cfg = ExtractorConfig {
        output_path: out.clone(),
        output_format: OutputFormat::Parquet,
        ..config(&ws)
    };

    let summary = run(&cfg).unwrap();

    let written = summary.output.unwrap();
    assert_eq!(written.format, OutputFormat::Parquet);
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[cfg(not(feature = "excel"))]
#[test]
fn excel_request_without_support_falls_back_to_csv() {
    let body = format!("{HEADER}500.0\t10.0\n510.0\t55.2\n");
    let ws = workspace(&[("A.csv", &body)]);
    let cfg = ExtractorConfig {
        output_path: ws.output.with_extension("xlsx"),
        output_format: OutputFormat::Excel,
        ..config(&ws)
    };

    let written = run(&cfg).unwrap().output.unwrap();

    assert!(written.fell_back);
    assert_eq!(written.path, ws.output);
    assert_eq!(read_back(&ws.output), vec![("A".to_string(), 510.0, 55.2)]);
}
