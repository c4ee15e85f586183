/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site / category index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates → row indices, outcome counts
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;

/// Source column names, as written by the pandas export of the launch table.
pub mod columns {
    pub const FLIGHT_NUMBER: &str = "Flight Number";
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const CLASS: &str = "class";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const BOOSTER_VERSION: &str = "Booster Version";
    pub const BOOSTER_VERSION_CATEGORY: &str = "Booster Version Category";
}

/// Errors describing a malformed launch table.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("class must be 0 or 1, got {0}")]
    InvalidClass(String),

    #[error("row {row}: column '{column}' has unsupported type {found}")]
    UnsupportedType {
        row: usize,
        column: String,
        found: String,
    },

    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: String },
}
