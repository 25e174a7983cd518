mod cli;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use pl_peaks::config::ExtractorConfig;
use pl_peaks::data::writer::preview;
use pl_peaks::pipeline::{self, RunSummary};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run_app(&cli) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise the level follows `-v` / `-q`.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => ExtractorConfig::from_json_file(path)?,
        None => ExtractorConfig::default(),
    };
    let cfg = cli.apply(base);
    log::debug!("Effective configuration: {cfg:?}");

    let summary = pipeline::run(&cfg)?;
    print_summary(&summary, cfg.preview_rows)
}

fn print_summary(summary: &RunSummary, preview_rows: usize) -> Result<()> {
    let Some(output) = &summary.output else {
        println!(
            "\nNo PL peaks were successfully extracted from {} file(s). \
             Check your raw data files and configuration.",
            summary.files_seen()
        );
        return Ok(());
    };

    println!("\n--- PL Peak Extraction Complete ---");
    println!("Extracted peaks for {} sample(s).", summary.table.len());
    if !summary.failures.is_empty() {
        println!("Skipped {} file(s):", summary.failures.len());
        for failure in &summary.failures {
            println!("  {} ({}): {}", failure.file_name, failure.kind, failure.reason);
        }
    }
    if output.fell_back {
        println!(
            "Spreadsheet output unavailable; saved as {} instead: {}",
            output.format,
            output.path.display()
        );
    } else {
        println!("Consolidated data saved to: {}", output.path.display());
    }

    if preview_rows > 0 {
        println!("\nFirst {} row(s) of extracted data:", preview_rows.min(summary.table.len()));
        println!("{}", preview(&summary.table, preview_rows)?);
    }
    Ok(())
}
