/// Data layer: core types, file discovery, parsing, peak search and output.
///
/// Architecture:
/// ```text
///   input dir (*.csv)
///        │
///        ▼
///   ┌──────────┐
///   │ locator   │  list files → SpectrumFile (path, sample id)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip header region, parse rows → Vec<SpectrumPoint>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   peak    │  first max-intensity point → PeakResult
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  OutputTable → .csv / .xlsx / .parquet
///   └──────────┘
/// ```

pub mod loader;
pub mod locator;
pub mod model;
pub mod peak;
pub mod writer;
