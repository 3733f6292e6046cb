/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! Column-major routines operating on an id vector and typed column arrays

use super::compare_to_threshold;
use super::reorder_values;
use crate::ColumnData;
use crate::ColumnMetadata;
use crate::Comparison;
use crate::Scalar;
use crate::SortOrder;

/// Row indices whose value satisfies `value <comparison> threshold`.
///
/// Returns `None` if the column does not hold `T`.
pub fn matching_indices<T: Scalar>(
    data: &ColumnData,
    comparison: Comparison,
    threshold: &T,
) -> Option<Vec<usize>> {
    let values = data.values::<T>()?;
    Some(
        values
            .iter()
            .enumerate()
            .filter(|(_, value)| compare_to_threshold(comparison, threshold, *value))
            .map(|(index, _)| index)
            .collect(),
    )
}

/// Sort permutation of the rows, keyed on one column
pub fn sort_indices(key: &ColumnData, order: SortOrder) -> Vec<usize> {
    key.sorted_indices(order)
}

/// Apply one permutation to the ids and to every column
pub fn reorder_rows<'a>(
    indices: &[usize],
    ids: &mut [i64],
    columns: impl IntoIterator<Item = &'a mut ColumnData>,
) {
    reorder_values(indices.to_vec(), ids);
    for column in columns {
        column.reorder(indices);
    }
}

pub fn select_ids(ids: &[i64], indices: &[usize]) -> Vec<i64> {
    super::select_values(ids, indices)
}

pub fn render(metadata: &ColumnMetadata, ids: &[i64], columns: &[&ColumnData]) -> String {
    super::render_table(metadata, ids, |row_index, column_index| {
        columns[column_index].value_str(row_index)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_indices() {
        let lat = ColumnData::Double(vec![-65.0, -70.9, -70.0, -73.1]);
        assert_eq!(
            matching_indices(&lat, Comparison::LessThan, &-70.0),
            Some(vec![1, 3])
        );
        assert_eq!(
            matching_indices(&lat, Comparison::GreaterThanOrEqualTo, &-70.0),
            Some(vec![0, 2])
        );
        assert_eq!(matching_indices(&lat, Comparison::LessThan, &-70.0f32), None);
    }

    #[test]
    fn test_reorder_rows_keeps_columns_aligned() {
        let mut ids = vec![0, 1, 2];
        let mut lat = ColumnData::Double(vec![-65.0, -73.1, -70.9]);
        let mut station = ColumnData::String(vec!["a".into(), "b".into(), "c".into()]);
        let indices = sort_indices(&lat, SortOrder::Ascending);
        reorder_rows(&indices, &mut ids, [&mut lat, &mut station]);
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(lat, ColumnData::Double(vec![-73.1, -70.9, -65.0]));
        assert_eq!(station, ColumnData::String(vec!["b".into(), "c".into(), "a".into()]));
    }

    #[test]
    fn test_select_ids() {
        assert_eq!(select_ids(&[4, 5, 6, 7], &[1, 3]), vec![5, 7]);
    }
}
