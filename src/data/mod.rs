/// Data layer: core types, loading, row selection, and output.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, column order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  label presence → labeled / unlabeled indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  ids + predictions → id,prediction CSV
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod writer;
