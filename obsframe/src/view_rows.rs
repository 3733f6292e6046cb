/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Row view
//!
//! A [`ViewRows`] is made by [`crate::Frame::make_view`] on a [`crate::FrameRows`]. Its rows share
//! their cells with the frame: a value written through the view (or through the frame) is visible
//! on both sides. The set of rows is the view's own, so sorting the view, slicing it, or removing
//! rows from the frame never changes the other side's row order or membership.
//!
//! Columns and rows cannot be added to or removed from a view.

use crate::ColumnMetadata;
use crate::Comparison;
use crate::DataRow;
use crate::Datum;
use crate::Scalar;
use crate::SortOrder;
use crate::View;
use crate::frame_rows::FrameRowsData;
use crate::frame_rows::RowCopy;
use anyhow::Result;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Default)]
pub struct ViewRows {
    data: FrameRowsData,
}

impl ViewRows {
    pub(crate) fn from_data(data: FrameRowsData) -> Self {
        ViewRows { data }
    }

    pub fn data_row(&self, index: usize) -> Option<&DataRow> {
        self.data.data_row(index)
    }

    /// Write one value through the shared cells
    pub fn set_value(&mut self, row: usize, column: usize, value: Datum) -> Result<()> {
        self.data.set_value(row, column, value)
    }

    /// Write a whole column through the shared cells
    pub fn set_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        self.data.set_column(name, values)
    }

    pub fn sort_rows(&mut self, column: &str, order: SortOrder) -> Result<()> {
        self.data.sort_rows(column, order)
    }

    pub fn sort_rows_by<F>(&mut self, column: &str, compare: F) -> Result<()>
    where
        F: FnMut(&Datum, &Datum) -> Ordering,
    {
        self.data.sort_rows_by(column, compare)
    }

    pub fn sort_rows_with<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&DataRow, &DataRow) -> Ordering,
    {
        self.data.sort_rows_with(compare)
    }

    pub fn slice_rows_by<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&DataRow) -> bool,
    {
        ViewRows::from_data(self.data.slice_rows_by(predicate, RowCopy::Shared))
    }
}

impl View for ViewRows {
    fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>> {
        self.data.get_column(name)
    }

    fn slice_rows<T: Scalar>(&self, column: &str, comparison: Comparison, threshold: T) -> Self {
        ViewRows::from_data(
            self.data
                .slice_rows(column, comparison, &threshold, RowCopy::Shared),
        )
    }

    fn column_metadata(&self) -> &ColumnMetadata {
        self.data.metadata()
    }

    fn row_count(&self) -> usize {
        self.data.row_count()
    }

    fn render(&self) -> String {
        self.data.render()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl fmt::Display for ViewRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Frame;
    use crate::FrameRows;

    fn sample() -> FrameRows {
        let mut frame = FrameRows::new();
        frame.append_new_column("lat", &[-65.0, -70.9, -73.1]).unwrap();
        frame.append_new_column("channel", &[10, 11, 13]).unwrap();
        frame
    }

    #[test]
    fn test_sorting_view_leaves_frame_order() {
        let frame = sample();
        let mut view = frame.make_view();
        view.sort_rows("lat", SortOrder::Ascending).unwrap();
        assert_eq!(view.get_column::<i32>("channel").unwrap(), vec![13, 11, 10]);
        assert_eq!(frame.get_column::<i32>("channel").unwrap(), vec![10, 11, 13]);
    }

    #[test]
    fn test_sliced_view_still_aliases_frame() {
        let frame = sample();
        let view = frame.make_view();
        let mut southern = view.slice_rows("lat", Comparison::LessThan, -70.0);
        assert_eq!(southern.row_count(), 2);
        southern.set_column("channel", &[21, 23]).unwrap();
        assert_eq!(frame.get_column::<i32>("channel").unwrap(), vec![10, 21, 23]);
        assert_eq!(view.get_column::<i32>("channel").unwrap(), vec![10, 21, 23]);
    }

    #[test]
    fn test_clearing_view_keeps_frame() {
        let frame = sample();
        let mut view = frame.make_view();
        view.clear();
        assert_eq!(view.row_count(), 0);
        assert_eq!(view.render(), "");
        assert_eq!(frame.row_count(), 3);
    }
}
