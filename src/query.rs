//! The fixed filtering/transformation query.
//!
//! [`execute`] is a single stateless request/response operation: it
//! validates the input frame's schema, opens a private [`SqlContext`],
//! registers the frame as relation `t`, runs the fixed statement, and
//! returns the result. The context is dropped before the call returns, so
//! nothing is visible across calls and concurrent calls are independent.

use crate::engine::SqlContext;
use crate::error::{QueryError, Result};
use crate::frame::Frame;
use tracing::debug;

/// Relation name the input frame is registered under.
const RELATION: &str = "t";

/// The fixed statement: project `id`, `value`, and the doubled `value2`;
/// keep rows with `value >= 20`; order by `id` descending.
const SQL: &str = "SELECT id, value, value * 2 AS value2 FROM t WHERE value >= 20 ORDER BY id DESC";

/// Run the fixed query against `input`.
///
/// The input must carry (at least) a column named `id` and a numeric column
/// named `value`. The result has columns `id, value, value2` in that order;
/// an input where no row passes the filter yields a zero-row result with
/// that schema, which is not an error.
///
/// # Errors
///
/// Returns [`QueryError::Schema`] when `id` or `value` is missing or
/// `value` is not numeric; engine failures propagate unmodified as
/// [`QueryError::InvalidSql`] or [`QueryError::DuckDb`].
pub fn execute(input: &Frame) -> Result<Frame> {
    validate_input(input)?;

    let ctx = SqlContext::new()?;
    ctx.register(RELATION, input)?;
    let result = ctx.query(SQL)?;

    debug!(
        rows_in = input.num_rows(),
        rows_out = result.num_rows(),
        "fixed query executed"
    );
    Ok(result)
}

/// Reject inputs the fixed statement cannot run against, before any engine
/// work happens.
fn validate_input(frame: &Frame) -> Result<()> {
    if frame.column("id").is_none() {
        return Err(QueryError::schema("missing required column 'id'"));
    }
    let value = frame
        .column("value")
        .ok_or_else(|| QueryError::schema("missing required column 'value'"))?;
    if !value.column_type().is_numeric() {
        return Err(QueryError::schema(format!(
            "column 'value' must be numeric, got {}",
            value.column_type()
        )));
    }
    Ok(())
}
