/// Data layer: core types, loading, and row predicates.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, header order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  short / improper predicates → record indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
