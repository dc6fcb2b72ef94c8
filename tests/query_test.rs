//! Integration tests for the public query contract.
//!
//! These tests drive the crate through its public API, covering:
//!
//! - Dataset builder determinism
//! - The fixed query on the fixed dataset (filter, projection, ordering)
//! - Zero-row results (empty input, nothing passing the filter)
//! - Boundary values and duplicate/tied ids
//! - Idempotence of repeated execution
//! - Schema error handling (missing or ill-typed columns)

use framequery::frame::{Cell, Column, Frame};
use framequery::{dataset, query, QueryError};

/// Extract a column of integers, panicking on any non-integer cell.
fn int_column(frame: &Frame, name: &str) -> Vec<i64> {
    frame
        .column(name)
        .unwrap_or_else(|| panic!("missing column '{}'", name))
        .values()
        .iter()
        .map(|c| c.as_i64().unwrap_or_else(|| panic!("non-integer cell {:?}", c)))
        .collect()
}

// ── Dataset builder ─────────────────────────────────────────────────────

#[test]
fn test_dataset_builder_is_deterministic() {
    let first = dataset::build();
    let second = dataset::build();

    assert_eq!(first, second);
    assert_eq!(first.column_names(), vec!["id", "value"]);
    assert_eq!(int_column(&first, "id"), vec![1, 2, 3, 4]);
    assert_eq!(int_column(&first, "value"), vec![10, 20, 30, 40]);
}

// ── Fixed query on the fixed dataset ────────────────────────────────────

#[test]
fn test_fixed_dataset_query() {
    let result = query::execute(&dataset::build()).unwrap();

    assert_eq!(result.column_names(), vec!["id", "value", "value2"]);
    assert_eq!(int_column(&result, "id"), vec![4, 3, 2]);
    assert_eq!(int_column(&result, "value"), vec![40, 30, 20]);
    assert_eq!(int_column(&result, "value2"), vec![80, 60, 40]);
}

#[test]
fn test_every_output_row_passes_filter() {
    let input = Frame::from_columns(vec![
        Column::int("id", [1, 2, 3, 4, 5, 6]),
        Column::int("value", [5, 19, 20, 21, 100, -3]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert!(result.num_rows() <= input.num_rows());
    for cell in result.column("value").unwrap().values() {
        assert!(cell.as_i64().unwrap() >= 20);
    }
}

#[test]
fn test_value2_is_exactly_double() {
    let input = Frame::from_columns(vec![
        Column::int("id", [1, 2, 3]),
        Column::int("value", [20, 33, 1_000_000]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    let values = int_column(&result, "value");
    let doubled = int_column(&result, "value2");
    assert_eq!(values.len(), doubled.len());
    for (v, v2) in values.iter().zip(&doubled) {
        assert_eq!(*v2, v * 2);
    }
}

#[test]
fn test_output_ordered_by_id_descending() {
    // Deliberately unsorted ids.
    let input = Frame::from_columns(vec![
        Column::int("id", [3, 9, 1, 7]),
        Column::int("value", [30, 40, 50, 60]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert_eq!(int_column(&result, "id"), vec![9, 7, 3, 1]);
}

// ── Zero-row results ────────────────────────────────────────────────────

#[test]
fn test_nothing_passes_filter_yields_empty_schema() {
    let input = Frame::from_columns(vec![
        Column::int("id", [1, 2]),
        Column::int("value", [10, 15]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert_eq!(result.num_rows(), 0);
    assert_eq!(result.column_names(), vec!["id", "value", "value2"]);
}

#[test]
fn test_zero_row_input_yields_empty_schema() {
    let input = Frame::from_columns(vec![
        Column::int("id", []),
        Column::int("value", []),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert_eq!(result.num_rows(), 0);
    assert_eq!(result.column_names(), vec!["id", "value", "value2"]);
}

// ── Boundary and tie handling ───────────────────────────────────────────

#[test]
fn test_filter_boundary_ties_all_retained() {
    let input = Frame::from_columns(vec![
        Column::int("id", [5, 9]),
        Column::int("value", [20, 20]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert_eq!(int_column(&result, "id"), vec![9, 5]);
    assert_eq!(int_column(&result, "value"), vec![20, 20]);
    assert_eq!(int_column(&result, "value2"), vec![40, 40]);
}

#[test]
fn test_duplicate_ids_all_retained() {
    let input = Frame::from_columns(vec![
        Column::int("id", [5, 5, 2]),
        Column::int("value", [20, 30, 40]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    let ids = int_column(&result, "id");
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[2], 2); // both id=5 rows sort before id=2
    assert!(ids[0] == 5 && ids[1] == 5);
}

// ── Idempotence ─────────────────────────────────────────────────────────

#[test]
fn test_execute_is_idempotent() {
    let input = dataset::build();

    let first = query::execute(&input).unwrap();
    let second = query::execute(&input).unwrap();

    assert_eq!(first, second);
}

// ── Schema errors ───────────────────────────────────────────────────────

#[test]
fn test_missing_id_column_is_schema_error() {
    let input = Frame::from_columns(vec![Column::int("value", [20])]).unwrap();

    let result = query::execute(&input);
    assert!(matches!(result, Err(QueryError::Schema(_))));
}

#[test]
fn test_missing_value_column_is_schema_error() {
    let input = Frame::from_columns(vec![Column::int("id", [1])]).unwrap();

    let result = query::execute(&input);
    assert!(matches!(result, Err(QueryError::Schema(_))));
}

#[test]
fn test_text_value_column_is_schema_error() {
    let input = Frame::from_columns(vec![
        Column::int("id", [1]),
        Column::text("value", ["20"]),
    ])
    .unwrap();

    let result = query::execute(&input);
    assert!(matches!(result, Err(QueryError::Schema(_))));
}

// ── Extra columns ───────────────────────────────────────────────────────

#[test]
fn test_extra_input_columns_are_not_projected() {
    let input = Frame::from_columns(vec![
        Column::int("id", [1, 2]),
        Column::int("value", [20, 30]),
        Column::text("label", ["a", "b"]),
    ])
    .unwrap();

    let result = query::execute(&input).unwrap();

    assert_eq!(result.column_names(), vec!["id", "value", "value2"]);
    assert_eq!(result.num_rows(), 2);
    // First row is id=2 (descending), so value2 = 30 * 2.
    assert_eq!(result.columns()[2].values()[0], Cell::Int(60));
}
