use thiserror::Error;

/// Fatal errors raised while building the salary table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The raw data could not be fetched (network or file error).
    #[error("data source unavailable ({location}): {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// One or more of the expected raw columns is missing.
    #[error("schema mismatch: missing column(s) {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A non-null cell could not be converted to the type its column needs.
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The payload could not be parsed in its declared format.
    #[error("malformed {format} data: {reason}")]
    Malformed { format: &'static str, reason: String },

    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),
}

/// A metric or grouped view was computed over zero rows.
///
/// Not fatal: each widget renders it as an explicit "no data" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("no data for the current selection")]
    EmptyInput,
}
