/// Data layer: core types, loading, normalization, filtering and aggregates.
///
/// Architecture:
/// ```text
///   companies.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  locate file → raw rows → clean → CompanyDataset (cached once)
///   └──────────┘
///        │  normalize: "1.2k" → 1200, "3l" → 300000, junk → 0
///        ▼
///   ┌────────────────┐
///   │ CompanyDataset  │  Vec<CompanyRecord>, unique names
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rating threshold + name selection → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs, top-N, histogram, grid order, pages
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
