/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  data.csv (Windows-1252)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, distinct-value index
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │ → View   │ aggregate │  group/sum/sort, counts, bins
///   └──────────┘          └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
