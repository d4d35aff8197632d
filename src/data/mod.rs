/// Data layer: core types, loading, cleaning, filtering, and aggregation.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (raw text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  canonical columns, typed cells → new Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → visible row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analyze   │  summary cards, rankings, text reports
///   └──────────┘
/// ```
///
/// Data flows one way; the canonical table is only ever replaced wholesale
/// (load, clean), never edited by the downstream stages.

pub mod analyze;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
