/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Typed column storage
//!
//! [`ColumnData`] is the column-major counterpart of [`Datum`]: one contiguous vector per column,
//! tagged with its element type. Column frames keep each column behind a [`SharedColumn`] so that
//! column views can alias the same arrays.

use crate::DataType;
use crate::Datum;
use crate::Scalar;
use crate::SortOrder;
use crate::functions;
use std::cell::RefCell;
use std::rc::Rc;

/// Column array shared between a column frame and the views made from it
pub type SharedColumn = Rc<RefCell<ColumnData>>;

/// In-memory column data, one variant per supported scalar type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
}

/// Evaluate `$body` with `$values` bound to the inner vector, whatever its element type
macro_rules! dispatch {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ColumnData::Int8($values) => $body,
            ColumnData::Int16($values) => $body,
            ColumnData::Int32($values) => $body,
            ColumnData::Int64($values) => $body,
            ColumnData::Float($values) => $body,
            ColumnData::Double($values) => $body,
            ColumnData::String($values) => $body,
        }
    };
}

/// Like `dispatch!`, but wraps the resulting vector back into the same variant
macro_rules! map_variant {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ColumnData::Int8($values) => ColumnData::Int8($body),
            ColumnData::Int16($values) => ColumnData::Int16($body),
            ColumnData::Int32($values) => ColumnData::Int32($body),
            ColumnData::Int64($values) => ColumnData::Int64($body),
            ColumnData::Float($values) => ColumnData::Float($body),
            ColumnData::Double($values) => ColumnData::Double($body),
            ColumnData::String($values) => ColumnData::String($body),
        }
    };
}

impl ColumnData {
    pub fn empty(data_type: DataType) -> Self {
        Self::with_capacity(data_type, 0)
    }

    pub fn with_capacity(data_type: DataType, capacity: usize) -> Self {
        match data_type {
            DataType::Int8 => ColumnData::Int8(Vec::with_capacity(capacity)),
            DataType::Int16 => ColumnData::Int16(Vec::with_capacity(capacity)),
            DataType::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            DataType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            DataType::Float => ColumnData::Float(Vec::with_capacity(capacity)),
            DataType::Double => ColumnData::Double(Vec::with_capacity(capacity)),
            DataType::String => ColumnData::String(Vec::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, values => values.is_empty())
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Int8(_) => DataType::Int8,
            ColumnData::Int16(_) => DataType::Int16,
            ColumnData::Int32(_) => DataType::Int32,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Double(_) => DataType::Double,
            ColumnData::String(_) => DataType::String,
        }
    }

    /// Display string of one value.
    ///
    /// # Panics
    /// Panics if `row_index` is out of bounds; callers iterate over known row counts.
    pub fn value_str(&self, row_index: usize) -> String {
        dispatch!(self, values => values[row_index].to_string())
    }

    pub fn datum(&self, row_index: usize) -> Option<Datum> {
        match self {
            ColumnData::Int8(values) => values.get(row_index).map(|v| Datum::Int8(*v)),
            ColumnData::Int16(values) => values.get(row_index).map(|v| Datum::Int16(*v)),
            ColumnData::Int32(values) => values.get(row_index).map(|v| Datum::Int32(*v)),
            ColumnData::Int64(values) => values.get(row_index).map(|v| Datum::Int64(*v)),
            ColumnData::Float(values) => values.get(row_index).map(|v| Datum::Float(*v)),
            ColumnData::Double(values) => values.get(row_index).map(|v| Datum::Double(*v)),
            ColumnData::String(values) => values.get(row_index).map(|v| Datum::String(v.clone())),
        }
    }

    pub fn values<T: Scalar>(&self) -> Option<&[T]> {
        T::values(self).map(|values| values.as_slice())
    }

    /// Append one value. Returns `false` when the datum type differs from the column type.
    pub fn push(&mut self, datum: Datum) -> bool {
        match (self, datum) {
            (ColumnData::Int8(values), Datum::Int8(v)) => values.push(v),
            (ColumnData::Int16(values), Datum::Int16(v)) => values.push(v),
            (ColumnData::Int32(values), Datum::Int32(v)) => values.push(v),
            (ColumnData::Int64(values), Datum::Int64(v)) => values.push(v),
            (ColumnData::Float(values), Datum::Float(v)) => values.push(v),
            (ColumnData::Double(values), Datum::Double(v)) => values.push(v),
            (ColumnData::String(values), Datum::String(v)) => values.push(v),
            _ => return false,
        }
        true
    }

    /// Replace every value. Returns `false` on a type or length mismatch.
    pub fn set_values<T: Scalar>(&mut self, new_values: &[T]) -> bool {
        let current_len = self.len();
        match T::values_mut(self) {
            Some(values) if new_values.len() == current_len => {
                values.clone_from_slice(new_values);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, row_index: usize) {
        dispatch!(self, values => {
            values.remove(row_index);
        })
    }

    pub fn clear(&mut self) {
        dispatch!(self, values => values.clear())
    }

    /// New column holding the values at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> ColumnData {
        map_variant!(self, values => functions::select_values(values, indices))
    }

    /// Apply a sort permutation in place (`new[i] = old[indices[i]]`)
    pub fn reorder(&mut self, indices: &[usize]) {
        dispatch!(self, values => functions::reorder_values(indices.to_vec(), values))
    }

    /// Row indices ordered by this column's values
    pub fn sorted_indices(&self, order: SortOrder) -> Vec<usize> {
        match self {
            ColumnData::Int8(values) => functions::sequence_indices(values, order, Ord::cmp),
            ColumnData::Int16(values) => functions::sequence_indices(values, order, Ord::cmp),
            ColumnData::Int32(values) => functions::sequence_indices(values, order, Ord::cmp),
            ColumnData::Int64(values) => functions::sequence_indices(values, order, Ord::cmp),
            ColumnData::Float(values) => functions::sequence_indices(values, order, f32::total_cmp),
            ColumnData::Double(values) => functions::sequence_indices(values, order, f64::total_cmp),
            ColumnData::String(values) => functions::sequence_indices(values, order, Ord::cmp),
        }
    }

    /// Widest display string among the values
    pub fn max_width(&self) -> usize {
        dispatch!(self, values => values
            .iter()
            .map(|value| value.to_string().chars().count())
            .max()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_checks_type() {
        let mut data = ColumnData::empty(DataType::Int16);
        assert!(data.push(Datum::Int16(4)));
        assert!(!data.push(Datum::Int32(4)));
        assert_eq!(data.len(), 1);
        assert_eq!(data.values::<i16>(), Some(&[4i16][..]));
    }

    #[test]
    fn test_set_values_checks_length_and_type() {
        let mut data = ColumnData::Double(vec![1.0, 2.0]);
        assert!(!data.set_values(&[1.0f64]));
        assert!(!data.set_values(&[1.0f32, 2.0f32]));
        assert!(data.set_values(&[3.0f64, 4.0]));
        assert_eq!(data, ColumnData::Double(vec![3.0, 4.0]));
    }

    #[test]
    fn test_select_and_remove() {
        let data = ColumnData::String(vec!["a".into(), "b".into(), "c".into()]);
        let selected = data.select(&[2, 0]);
        assert_eq!(selected, ColumnData::String(vec!["c".into(), "a".into()]));

        let mut data = ColumnData::Int8(vec![1, 2, 3]);
        data.remove(1);
        assert_eq!(data, ColumnData::Int8(vec![1, 3]));
    }

    #[test]
    fn test_sort_then_reorder() {
        let mut data = ColumnData::Float(vec![2.5, -1.0, 7.0, 0.0]);
        let indices = data.sorted_indices(SortOrder::Descending);
        assert_eq!(indices, vec![2, 0, 3, 1]);
        data.reorder(&indices);
        assert_eq!(data, ColumnData::Float(vec![7.0, 2.5, 0.0, -1.0]));
    }

    #[test]
    fn test_value_strings_and_width() {
        let data = ColumnData::Int64(vec![5, -1234, 17]);
        assert_eq!(data.value_str(1), "-1234");
        assert_eq!(data.max_width(), 5);
        assert_eq!(ColumnData::empty(DataType::String).max_width(), 0);
    }

    #[test]
    fn test_datum_out_of_range_is_none() {
        let data = ColumnData::Int32(vec![1]);
        assert_eq!(data.datum(0), Some(Datum::Int32(1)));
        assert_eq!(data.datum(1), None);
    }
}
