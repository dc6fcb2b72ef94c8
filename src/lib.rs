//! In-memory columnar frames queried through an embedded DuckDB context.
//!
//! This crate demonstrates the smallest useful analytics loop: build a
//! fixed two-column [`frame::Frame`] in memory, register it inside a fresh
//! in-process DuckDB database, run one filtering/transformation statement,
//! and hand the result back as a frame. Each call to
//! [`query::execute`] owns its own ephemeral engine context; nothing is
//! shared or persisted between calls.
//!
//! # Modules
//!
//! - [`frame`] -- The columnar container (`Frame`, `Column`, `Cell`).
//! - [`engine`] -- Ephemeral DuckDB context: register frames, run SQL.
//! - [`dataset`] -- The fixed sample dataset builder.
//! - [`query`] -- The fixed query executor.
//! - [`error`] -- Domain-specific error types.
//!
//! # Example
//!
//! ```
//! let input = framequery::dataset::build();
//! let result = framequery::query::execute(&input).unwrap();
//!
//! assert_eq!(result.column_names(), vec!["id", "value", "value2"]);
//! assert_eq!(result.num_rows(), 3);
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod frame;
pub mod query;

pub use engine::SqlContext;
pub use error::{QueryError, Result};
pub use frame::{Cell, Column, ColumnType, Frame};
