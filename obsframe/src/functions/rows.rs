/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! Row-major routines operating on slices of [`DataRow`]

use super::apply_permutation;
use super::compare_to_threshold;
use super::sorted_indices;
use crate::ColumnMetadata;
use crate::Comparison;
use crate::DataRow;
use crate::Datum;
use crate::Scalar;
use crate::SortOrder;
use std::cmp::Ordering;

/// Reorder whole rows by a row comparator
pub fn sort_rows_with<F>(rows: &mut [DataRow], mut compare: F)
where
    F: FnMut(&DataRow, &DataRow) -> Ordering,
{
    let indices = sorted_indices(rows.len(), |i, j| compare(&rows[i], &rows[j]));
    apply_permutation(indices, |a, b| rows.swap(a, b));
}

/// Reorder whole rows by comparing the cells of one column
pub fn sort_rows_by<F>(rows: &mut [DataRow], column_index: usize, mut compare: F)
where
    F: FnMut(&Datum, &Datum) -> Ordering,
{
    sort_rows_with(rows, |a, b| match (a.cell(column_index), b.cell(column_index)) {
        (Some(a), Some(b)) => compare(&a.borrow(), &b.borrow()),
        _ => Ordering::Equal,
    });
}

pub fn sort_rows(rows: &mut [DataRow], column_index: usize, order: SortOrder) {
    match order {
        SortOrder::Ascending => sort_rows_by(rows, column_index, |a, b| a.total_cmp(b)),
        SortOrder::Descending => sort_rows_by(rows, column_index, |a, b| b.total_cmp(a)),
    }
}

/// Indices of the rows whose value in `column_index` satisfies `value <comparison> threshold`.
///
/// Rows holding another type in that column never match.
pub fn matching_rows<T: Scalar>(
    rows: &[DataRow],
    column_index: usize,
    comparison: Comparison,
    threshold: &T,
) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.value::<T>(column_index)
                .is_some_and(|value| compare_to_threshold(comparison, threshold, &value))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Values of one column in row order, or `None` if any row holds another type
pub fn column_values<T: Scalar>(rows: &[DataRow], column_index: usize) -> Option<Vec<T>> {
    rows.iter().map(|row| row.value::<T>(column_index)).collect()
}

/// Overwrite one column cell by cell; rows sharing those cells see the new values.
///
/// Callers check the type and length beforehand.
pub fn set_column_values<T: Scalar>(rows: &[DataRow], column_index: usize, values: &[T]) {
    for (row, value) in rows.iter().zip(values) {
        row.set_value(column_index, value.clone().into_datum());
    }
}

pub fn max_id(rows: &[DataRow]) -> Option<i64> {
    rows.iter().map(DataRow::id).max()
}

pub fn ids(rows: &[DataRow]) -> Vec<i64> {
    rows.iter().map(DataRow::id).collect()
}

pub fn render(metadata: &ColumnMetadata, rows: &[DataRow]) -> String {
    super::render_table(metadata, &ids(rows), |row_index, column_index| {
        rows[row_index].value_str(column_index).unwrap_or_default()
    })
}
