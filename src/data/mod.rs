/// Data layer: loading, normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv (URL or file) / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → RawTable        (DatasetCache: load once)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  rename, drop null years, relabel codes → SalaryTable
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / seniority / remote selections → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics + grouped means → DashboardView
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod labels;
pub mod loader;
pub mod model;
pub mod normalize;
