/// Data layer: core types, loading, and transposition.
///
/// Architecture:
/// ```text
///   delimited text file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse lines → Table (rows of f64)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transpose  │  rows → columns, per RaggedPolicy
///   └───────────┘
///        │
///        ▼
///     CurveSet     Vec<Curve>, one per column
/// ```

pub mod loader;
pub mod model;
pub mod transpose;
