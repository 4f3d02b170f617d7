/// Data layer: core types, loading, and year filtering.
///
/// Architecture:
/// ```text
///  all_data.csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Observation> + timestamp-sorted view
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  available years, rows of the selected year
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
