//! The fixed sample dataset.

use crate::frame::{Column, Frame};

/// Build the sample frame: columns `id` and `value`, rows
/// `{1,10}, {2,20}, {3,30}, {4,40}`.
///
/// Deterministic and side-effect free; repeated calls return identical data.
pub fn build() -> Frame {
    Frame::from_columns(vec![
        Column::int("id", [1, 2, 3, 4]),
        Column::int("value", [10, 20, 30, 40]),
    ])
    .expect("fixed literal columns have equal length and distinct names")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Cell;

    #[test]
    fn test_build_returns_fixed_rows() {
        let frame = build();

        assert_eq!(frame.column_names(), vec!["id", "value"]);
        assert_eq!(frame.num_rows(), 4);

        let ids: Vec<i64> = frame
            .column("id")
            .unwrap()
            .values()
            .iter()
            .filter_map(Cell::as_i64)
            .collect();
        let values: Vec<i64> = frame
            .column("value")
            .unwrap()
            .values()
            .iter()
            .filter_map(Cell::as_i64)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(values, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build(), build());
    }
}
