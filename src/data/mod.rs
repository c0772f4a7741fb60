/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → TripTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ TripTable │  Vec<Trip>, optional-column flags
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply month/day predicates → TripView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
