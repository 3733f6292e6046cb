/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Algorithms shared by both layouts
//!
//! ### Sorting
//! Sorting never moves storage while comparing. It runs in two phases:
//! 1. **Index sequencing**: an index array `[0..n)` is sorted with a comparator that looks the
//!    keys up indirectly.
//! 2. **Cycle-following permutation**: the resulting permutation is applied to the physical
//!    storage in place, swapping along each cycle exactly once. At most `n - 1` swaps are made and
//!    no copy of the storage is allocated.
//!
//! The same permutation is applied to whole rows in the row layout, and to the id vector and each
//! column vector in the column layout.
//!
//! ### Slicing and printing
//! Threshold comparison and string padding are shared so that both layouts select the same rows
//! and render byte-identical tables.

pub mod checks;
pub mod cols;
pub mod rows;

use crate::ColumnMetadata;
use crate::Comparison;
use crate::Datum;
use crate::SortOrder;
use std::cmp::Ordering;
use tracing::info;

/// Separator placed between printed columns
pub const COLUMN_SPACER: &str = "  ";

/// Log a recoverable failure and return it as an error
macro_rules! reject {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::error!("{}", message);
        anyhow::bail!(message)
    }};
}

pub(crate) use reject;

/// Ascending comparison of two cells of the same column
pub fn compare_datums(a: &Datum, b: &Datum) -> Ordering {
    a.total_cmp(b)
}

/// Whether `value <comparison> threshold` holds
pub fn compare_to_threshold<T: PartialOrd + ?Sized>(
    comparison: Comparison,
    threshold: &T,
    value: &T,
) -> bool {
    match comparison {
        Comparison::LessThan => value < threshold,
        Comparison::LessThanOrEqualTo => value <= threshold,
        Comparison::EqualTo => value == threshold,
        Comparison::GreaterThanOrEqualTo => value >= threshold,
        Comparison::GreaterThan => value > threshold,
    }
}

/// Sort `[0..len)` by comparing the keys the indices refer to
pub fn sorted_indices<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut indices: Vec<usize> = (0..len).collect();
    indices.sort_by(|&i, &j| compare(i, j));
    indices
}

/// Index permutation that orders `values` by `compare` in the requested direction
pub fn sequence_indices<T, F>(values: &[T], order: SortOrder, compare: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    sorted_indices(values.len(), |i, j| match order {
        SortOrder::Ascending => compare(&values[i], &values[j]),
        SortOrder::Descending => compare(&values[j], &values[i]),
    })
}

/// Apply the gather permutation `indices` (`new[i] = old[indices[i]]`) through a swap callback.
///
/// Each cycle of the permutation is followed once; every swap settles one position, and the index
/// array converges to the identity as positions settle.
pub fn apply_permutation<F>(mut indices: Vec<usize>, mut swap: F)
where
    F: FnMut(usize, usize),
{
    for i in 0..indices.len() {
        while indices[i] != indices[indices[i]] {
            let target = indices[i];
            swap(target, indices[target]);
            indices.swap(i, target);
        }
    }
}

pub fn reorder_values<T>(indices: Vec<usize>, values: &mut [T]) {
    apply_permutation(indices, |a, b| values.swap(a, b));
}

pub fn select_values<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&index| values[index].clone()).collect()
}

/// Left-align `text` in a field of `width` characters
pub fn pad_string(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Number of characters needed to print the largest row id
pub fn id_width(max_id: Option<i64>) -> usize {
    max_id.unwrap_or(0).to_string().chars().count()
}

/// Render a header line and one line per row id. `value_at(row, column)` supplies the cell text.
///
/// A table without columns renders as an empty string.
pub fn render_table<F>(metadata: &ColumnMetadata, ids: &[i64], mut value_at: F) -> String
where
    F: FnMut(usize, usize) -> String,
{
    if metadata.is_empty() {
        return String::new();
    }
    let id_width = metadata.id_width();
    let mut lines = Vec::with_capacity(ids.len() + 1);
    lines.push(metadata.header(id_width));
    for (row_index, id) in ids.iter().enumerate() {
        let mut line = pad_string(&id.to_string(), id_width);
        for (column_index, column) in metadata.get().iter().enumerate() {
            line.push_str(COLUMN_SPACER);
            line.push_str(&pad_string(&value_at(row_index, column_index), column.width()));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Emit every rendered line to the log
pub fn print_lines(text: &str) {
    for line in text.lines() {
        info!("{}", line);
    }
}
