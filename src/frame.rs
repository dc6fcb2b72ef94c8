//! In-memory columnar frame container.
//!
//! A [`Frame`] is an ordered sequence of named [`Column`]s, each holding an
//! ordered sequence of [`Cell`]s of a single declared type, with all columns
//! of equal length. Frames are plain owned values: built once, never mutated
//! in place, and cheap to clone for datasets of this size.
//!
//! The engine materialises frames into DuckDB tables on registration and
//! pivots query results back into frames, so this container is both the
//! input and the output shape of the query path.

use crate::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a column.
///
/// Registration maps this to the corresponding DuckDB column type; keeping
/// the type on the column (rather than inferring it from the cells) lets
/// zero-row frames register with a correct schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer (`BIGINT`).
    Int,
    /// 64-bit float (`DOUBLE`).
    Float,
    /// UTF-8 string (`VARCHAR`).
    Text,
    /// Boolean (`BOOLEAN`).
    Bool,
}

impl ColumnType {
    /// The DuckDB type name used in `CREATE TABLE`.
    pub(crate) fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Int => "BIGINT",
            ColumnType::Float => "DOUBLE",
            ColumnType::Text => "VARCHAR",
            ColumnType::Bool => "BOOLEAN",
        }
    }

    /// Returns `true` for types that support arithmetic and ordering
    /// comparisons.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Bool => "bool",
        })
    }
}

/// A single value in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// SQL NULL.
    Null,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string.
    Text(String),
    /// Boolean.
    Bool(bool),
}

impl Cell {
    /// The integer value, if this cell is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A named column: a declared type plus an ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    ty: ColumnType,
    values: Vec<Cell>,
}

impl Column {
    /// Create an integer column.
    pub fn int(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            name: name.into(),
            ty: ColumnType::Int,
            values: values.into_iter().map(Cell::Int).collect(),
        }
    }

    /// Create a float column.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            ty: ColumnType::Float,
            values: values.into_iter().map(Cell::Float).collect(),
        }
    }

    /// Create a text column.
    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ColumnType::Text,
            values: values.into_iter().map(|s| Cell::Text(s.into())).collect(),
        }
    }

    /// Create a boolean column.
    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            name: name.into(),
            ty: ColumnType::Bool,
            values: values.into_iter().map(Cell::Bool).collect(),
        }
    }

    /// Assemble a column from already-typed cells (engine result path).
    pub(crate) fn from_cells(name: String, ty: ColumnType, values: Vec<Cell>) -> Self {
        Self { name, ty, values }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column type.
    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The cells, in row order.
    pub fn values(&self) -> &[Cell] {
        &self.values
    }
}

/// An in-memory table: ordered named columns of uniform length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Build a frame from columns, validating that all columns have the
    /// same length and that no name repeats.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Schema`] on unequal column lengths or a
    /// duplicate column name.
    ///
    /// # Examples
    ///
    /// ```
    /// use framequery::frame::{Column, Frame};
    ///
    /// let frame = Frame::from_columns(vec![
    ///     Column::int("id", [1, 2]),
    ///     Column::int("value", [10, 20]),
    /// ]).unwrap();
    /// assert_eq!(frame.num_rows(), 2);
    /// ```
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns[1..] {
                if col.len() != expected {
                    return Err(QueryError::schema(format!(
                        "column '{}' has {} rows, expected {}",
                        col.name,
                        col.len(),
                        expected
                    )));
                }
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(QueryError::schema(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Assemble a frame whose columns are already known to be uniform
    /// (engine result path; a SQL result may legitimately repeat a name).
    pub(crate) fn from_columns_unchecked(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows (0 for a frame with no columns).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name (first match wins).
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Encode the frame as one JSON object per row, keyed by column name.
    ///
    /// # Examples
    ///
    /// ```
    /// use framequery::frame::{Column, Frame};
    ///
    /// let frame = Frame::from_columns(vec![Column::int("id", [1])]).unwrap();
    /// assert_eq!(frame.to_json_rows(), vec![serde_json::json!({"id": 1})]);
    /// ```
    pub fn to_json_rows(&self) -> Vec<serde_json::Value> {
        (0..self.num_rows())
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .map(|c| (c.name.clone(), cell_to_json(&c.values[row])))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect()
    }
}

/// Convert a [`Cell`] to a `serde_json::Value`.
fn cell_to_json(cell: &Cell) -> serde_json::Value {
    match cell {
        Cell::Null => serde_json::Value::Null,
        Cell::Int(i) => serde_json::Value::Number((*i).into()),
        Cell::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Cell::Text(s) => serde_json::Value::String(s.clone()),
        Cell::Bool(b) => serde_json::Value::Bool(*b),
    }
}

impl fmt::Display for Frame {
    /// Renders an aligned ASCII table: header, separator, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(empty frame)");
        }

        let rendered: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.values.iter().map(Cell::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&rendered)
            .map(|(col, cells)| {
                cells
                    .iter()
                    .map(String::len)
                    .max()
                    .unwrap_or(0)
                    .max(col.name.len())
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:>width$}", col.name, width = *w))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;

        for row in 0..self.num_rows() {
            let line: Vec<String> = rendered
                .iter()
                .zip(&widths)
                .map(|(cells, w)| format!("{:>width$}", cells[row], width = *w))
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        Ok(())
    }
}
