/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  INVESTICNI_HITPARADA*.xlsx  (.csv / .json / .parquet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  newest file → rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Snapshot>, replaced wholesale after the TTL
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  predicates + sort by yield → filtered indices
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
