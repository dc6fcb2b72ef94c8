//! Ephemeral in-memory DuckDB query context.
//!
//! [`SqlContext`] wraps a single in-memory DuckDB connection and exposes the
//! narrow surface the query path needs: create a context, register a
//! [`Frame`] as a named relation, run a SQL string, and materialise the
//! result back into a [`Frame`].
//!
//! Registration creates a table with the frame's declared column types and
//! inserts rows through a prepared parameterized statement. A context is
//! meant to live for one query exchange; dropping it discards the database
//! and every relation registered in it. Nothing is shared between contexts,
//! so no locking is involved.

use crate::error::{QueryError, Result};
use crate::frame::{Cell, Column, ColumnType, Frame};
use duckdb::types::{ToSqlOutput, Value, ValueRef};
use duckdb::{params_from_iter, Connection, ToSql};
use tracing::debug;

/// An isolated in-memory DuckDB context.
///
/// Relations registered here are visible only within this context and only
/// for its lifetime.
pub struct SqlContext {
    /// DuckDB connection (in-memory database).
    conn: Connection,
}

impl SqlContext {
    /// Open a fresh in-memory DuckDB database.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuckDb`] if DuckDB initialisation fails.
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QueryError::duckdb(format!("Failed to create DuckDB connection: {}", e))
        })?;

        // Disable automatic extension installation to avoid failures on
        // systems where dynamic extension loading is restricted. The bundled
        // build already includes everything this crate needs.
        let _ = conn.execute_batch(
            "SET autoinstall_known_extensions=false; SET autoload_known_extensions=true;",
        );

        debug!("DuckDB context initialized");
        Ok(Self { conn })
    }

    /// Register a frame as a named relation within this context.
    ///
    /// Creates (or replaces) a table named `name` whose column types come
    /// from the frame's declared types, then inserts every row. A zero-row
    /// frame registers as an empty table with the correct schema.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Schema`] when `name` or a column name is not a
    /// plain identifier, or when the frame has no columns; DuckDB failures
    /// convert through `From<duckdb::Error>`.
    pub fn register(&self, name: &str, frame: &Frame) -> Result<()> {
        if !is_identifier(name) {
            return Err(QueryError::schema(format!(
                "invalid relation name '{}'",
                name
            )));
        }
        if frame.num_columns() == 0 {
            return Err(QueryError::schema(
                "cannot register a frame with no columns",
            ));
        }
        for col in frame.columns() {
            if !is_identifier(col.name()) {
                return Err(QueryError::schema(format!(
                    "invalid column name '{}'",
                    col.name()
                )));
            }
        }

        let decls: Vec<String> = frame
            .columns()
            .iter()
            .map(|c| format!("\"{}\" {}", c.name(), c.column_type().sql_type()))
            .collect();

        let _ = self
            .conn
            .execute(&format!("DROP TABLE IF EXISTS {}", name), []);

        self.conn.execute(
            &format!("CREATE TABLE {} ({})", name, decls.join(", ")),
            [],
        )?;

        if frame.num_rows() > 0 {
            let placeholders = vec!["?"; frame.num_columns()].join(", ");
            let mut stmt = self
                .conn
                .prepare(&format!("INSERT INTO {} VALUES ({})", name, placeholders))?;

            for row in 0..frame.num_rows() {
                let cells = frame.columns().iter().map(|c| &c.values()[row]);
                stmt.execute(params_from_iter(cells))?;
            }
        }

        debug!(relation = %name, rows = frame.num_rows(), "frame registered");
        Ok(())
    }

    /// Execute a SQL string and materialise the result as a [`Frame`].
    ///
    /// A query yielding zero rows still produces a frame with the full
    /// result-set schema (column names in projection order).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidSql`] (with a query preview) when
    /// DuckDB rejects the statement at prepare time; execution failures
    /// convert through `From<duckdb::Error>`, which classifies parse and
    /// bind diagnostics as [`QueryError::InvalidSql`] and everything else
    /// as [`QueryError::DuckDb`].
    pub fn query(&self, sql: &str) -> Result<Frame> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| QueryError::invalid_sql(sql, e.to_string()))?;

        let mut rows = stmt.query([])?;

        // Collect all rows, probing column count dynamically from each row.
        // We cannot call stmt.column_names() here because Rows holds a
        // mutable borrow on stmt; names are retrieved after dropping Rows.
        let mut collected: Vec<Vec<Cell>> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::new();
            for i in 0.. {
                match row.get_ref(i) {
                    Ok(value) => cells.push(value_to_cell(value)),
                    Err(_) => break,
                }
            }
            collected.push(cells);
        }

        // Release the Rows borrow so we can access column metadata.
        drop(rows);

        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<Cell> = collected
                    .iter()
                    .map(|r| r.get(i).cloned().unwrap_or(Cell::Null))
                    .collect();
                // An empty or all-NULL column carries nothing to infer a
                // type from; BIGINT matches what integer inputs produce.
                let ty = values.iter().find_map(cell_type).unwrap_or(ColumnType::Int);
                Column::from_cells(name, ty, values)
            })
            .collect();

        debug!(rows = collected.len(), "query result materialised");
        Ok(Frame::from_columns_unchecked(columns))
    }
}

impl ToSql for Cell {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(match self {
            Cell::Null => Value::Null,
            Cell::Int(i) => Value::BigInt(*i),
            Cell::Float(f) => Value::Double(*f),
            Cell::Text(s) => Value::Text(s.clone()),
            Cell::Bool(b) => Value::Boolean(*b),
        }))
    }
}

/// `true` when `s` is a plain SQL identifier (letter or `_`, then
/// alphanumerics or `_`). Relation and column names are interpolated into
/// DDL strings, so anything else is rejected up front.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The declared type a cell implies, if any.
fn cell_type(cell: &Cell) -> Option<ColumnType> {
    match cell {
        Cell::Null => None,
        Cell::Int(_) => Some(ColumnType::Int),
        Cell::Float(_) => Some(ColumnType::Float),
        Cell::Text(_) => Some(ColumnType::Text),
        Cell::Bool(_) => Some(ColumnType::Bool),
    }
}

/// Convert a DuckDB `ValueRef` to a [`Cell`].
fn value_to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Boolean(b) => Cell::Bool(b),
        ValueRef::TinyInt(i) => Cell::Int(i.into()),
        ValueRef::SmallInt(i) => Cell::Int(i.into()),
        ValueRef::Int(i) => Cell::Int(i.into()),
        ValueRef::BigInt(i) => Cell::Int(i),
        ValueRef::HugeInt(i) => {
            // Fall back to text for values outside the i64 range.
            i64::try_from(i)
                .map(Cell::Int)
                .unwrap_or_else(|_| Cell::Text(i.to_string()))
        }
        ValueRef::UTinyInt(i) => Cell::Int(i.into()),
        ValueRef::USmallInt(i) => Cell::Int(i.into()),
        ValueRef::UInt(i) => Cell::Int(i.into()),
        ValueRef::UBigInt(i) => i64::try_from(i)
            .map(Cell::Int)
            .unwrap_or_else(|_| Cell::Text(i.to_string())),
        ValueRef::Float(f) => Cell::Float(f as f64),
        ValueRef::Double(f) => Cell::Float(f),
        ValueRef::Text(s) => Cell::Text(String::from_utf8_lossy(s).into_owned()),
        _ => Cell::Text(format!("{:?}", value)),
    }
}
