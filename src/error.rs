//! Error types for the framequery engine.
//!
//! This module defines domain-specific errors for frame construction,
//! schema validation, and embedded DuckDB execution.

/// Errors from frame construction and query execution.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The input frame violates the required schema (missing or ill-typed
    /// columns, unequal column lengths, invalid identifiers).
    #[error("Schema error: {0}")]
    Schema(String),

    /// The SQL statement could not be parsed or bound by DuckDB.
    ///
    /// The inner string contains the DuckDB diagnostic message.
    #[error("Invalid SQL: {0}")]
    InvalidSql(String),

    /// A DuckDB operation failed (wrapper around the duckdb crate error).
    #[error("DuckDB error: {0}")]
    DuckDb(String),
}

impl QueryError {
    /// Create a `Schema` error.
    pub fn schema(detail: impl Into<String>) -> Self {
        Self::Schema(detail.into())
    }

    /// Create an `InvalidSql` error carrying a preview of the offending query.
    ///
    /// # Examples
    ///
    /// ```
    /// use framequery::error::QueryError;
    ///
    /// let err = QueryError::invalid_sql(
    ///     "SELECT * FORM t",
    ///     "syntax error near 'FORM'",
    /// );
    /// assert!(err.to_string().contains("syntax error"));
    /// ```
    pub fn invalid_sql(sql: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        // Truncate very long queries in the error message, on a char
        // boundary so multi-byte text cannot split mid-character.
        let sql_preview = match sql.char_indices().nth(120) {
            Some((idx, _)) => format!("{}...", &sql[..idx]),
            None => sql.to_string(),
        };
        Self::InvalidSql(format!("{} (query: {})", detail, sql_preview))
    }

    /// Wrap a raw DuckDB error string.
    pub fn duckdb(detail: impl Into<String>) -> Self {
        Self::DuckDb(detail.into())
    }
}

impl From<duckdb::Error> for QueryError {
    fn from(e: duckdb::Error) -> Self {
        let msg = e.to_string();
        // Heuristic: DuckDB syntax / parse errors
        if msg.contains("Parser Error") || msg.contains("Binder Error") {
            QueryError::InvalidSql(msg)
        } else {
            QueryError::DuckDb(msg)
        }
    }
}

/// A specialised `Result` type for framequery operations.
pub type Result<T> = std::result::Result<T, QueryError>;
