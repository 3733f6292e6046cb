/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Row-major records
//!
//! A [`DataRow`] is one record of a row-major container: a row id and one cell per column. Cells
//! are reference counted, so a row obtained through [`DataRow::share`] aliases the values of the
//! original row. Writing through either one is visible through both; dropping or removing one
//! leaves the other intact.

use crate::DataType;
use crate::Datum;
use crate::Scalar;
use std::cell::RefCell;
use std::rc::Rc;

/// Reference-counted, mutable cell
pub type Cell = Rc<RefCell<Datum>>;

#[derive(Debug, PartialEq)]
pub struct DataRow {
    id: i64,
    cells: Vec<Cell>,
}

impl DataRow {
    pub fn new(id: i64) -> Self {
        DataRow {
            id,
            cells: Vec::new(),
        }
    }

    pub fn with_values(id: i64, values: Vec<Datum>) -> Self {
        DataRow {
            id,
            cells: values.into_iter().map(|datum| Rc::new(RefCell::new(datum))).collect(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append a cell at the end of the row
    pub fn insert(&mut self, value: Datum) {
        self.cells.push(Rc::new(RefCell::new(value)));
    }

    pub fn remove(&mut self, column_index: usize) -> Option<Cell> {
        (column_index < self.cells.len()).then(|| self.cells.remove(column_index))
    }

    pub(crate) fn cell(&self, column_index: usize) -> Option<&Cell> {
        self.cells.get(column_index)
    }

    /// Copy of the value held at `column_index`
    pub fn get(&self, column_index: usize) -> Option<Datum> {
        self.cells.get(column_index).map(|cell| cell.borrow().clone())
    }

    pub fn value<T: Scalar>(&self, column_index: usize) -> Option<T> {
        self.cells
            .get(column_index)
            .and_then(|cell| T::from_datum(&cell.borrow()))
    }

    pub fn data_type(&self, column_index: usize) -> Option<DataType> {
        self.cells
            .get(column_index)
            .map(|cell| cell.borrow().data_type())
    }

    pub fn value_str(&self, column_index: usize) -> Option<String> {
        self.cells
            .get(column_index)
            .map(|cell| cell.borrow().value_str())
    }

    /// Overwrite one cell in place; every row sharing the cell sees the new value.
    ///
    /// Returns `false` if the index is out of range or the type differs. Permissions and column
    /// widths are the owning frame's concern, so callers outside the crate go through
    /// [`crate::FrameRows::set_value`] or [`crate::ViewRows::set_value`].
    pub(crate) fn set_value(&self, column_index: usize, value: Datum) -> bool {
        match self.cells.get(column_index) {
            Some(cell) => cell.borrow_mut().set_value(value),
            None => false,
        }
    }

    /// New row with the same id whose cells alias this row's cells
    pub fn share(&self) -> DataRow {
        DataRow {
            id: self.id,
            cells: self.cells.iter().map(Rc::clone).collect(),
        }
    }

    /// New row with the same id and independent copies of every value
    pub fn deep_copy(&self) -> DataRow {
        DataRow {
            id: self.id,
            cells: self
                .cells
                .iter()
                .map(|cell| Rc::new(RefCell::new(cell.borrow().clone())))
                .collect(),
        }
    }

    pub fn values(&self) -> Vec<Datum> {
        self.cells.iter().map(|cell| cell.borrow().clone()).collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn test_shared_row_aliases_cells() {
        let original = DataRow::with_values(3, row![-73.0, "00000"]);
        let shared = original.share();
        assert!(shared.set_value(0, Datum::from(-70.5)));
        assert_eq!(original.value::<f64>(0), Some(-70.5));
        assert_eq!(shared.id(), 3);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = DataRow::with_values(1, row![11, 1710460200i64]);
        let copy = original.deep_copy();
        assert!(copy.set_value(0, Datum::from(12)));
        assert_eq!(original.value::<i32>(0), Some(11));
        assert_eq!(copy.value::<i32>(0), Some(12));
    }

    #[test]
    fn test_removing_from_one_row_keeps_shared_cells() {
        let mut original = DataRow::with_values(0, row![1i8, 2i8]);
        let shared = original.share();
        original.remove(0);
        assert_eq!(original.len(), 1);
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.value::<i8>(0), Some(1));
    }

    #[test]
    fn test_set_value_checks_type_and_bounds() {
        let row = DataRow::with_values(0, row![128.0f32]);
        assert!(!row.set_value(0, Datum::from(128.0)));
        assert!(!row.set_value(1, Datum::from(1.0f32)));
        assert_eq!(row.value_str(0), Some("128".to_string()));
        assert_eq!(row.data_type(0), Some(DataType::Float));
        assert_eq!(row.get(1), None);
    }
}
