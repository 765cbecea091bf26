/// Data layer: employee records, loading, and department filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EmployeeDataset │  Vec<Employee>, department index
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  department → employee rows / names
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
