/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Column view
//!
//! A [`ViewCols`] shares the column arrays of the [`crate::FrameCols`] it was made from and keeps
//! its own copy of the metadata and row ids. Values written to the frame with `set_column` show up
//! in the view. Once the frame's rows are appended, removed or sorted, the frame works on its own
//! copy and the view keeps the rows it was made with.
//!
//! A column view cannot be sorted: its arrays are the frame's arrays.

use crate::ColumnMetadata;
use crate::Comparison;
use crate::Scalar;
use crate::View;
use crate::frame_cols::FrameColsData;
use anyhow::Result;
use std::fmt;

#[derive(Debug, Default)]
pub struct ViewCols {
    data: FrameColsData,
}

impl ViewCols {
    pub(crate) fn from_data(data: FrameColsData) -> Self {
        ViewCols { data }
    }

    pub fn ids(&self) -> &[i64] {
        self.data.ids()
    }
}

impl View for ViewCols {
    fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>> {
        self.data.get_column(name)
    }

    /// The sliced view holds its own arrays with the surviving values.
    fn slice_rows<T: Scalar>(&self, column: &str, comparison: Comparison, threshold: T) -> Self {
        ViewCols::from_data(self.data.slice_rows(column, comparison, &threshold))
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

impl fmt::Display for ViewCols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Frame;
    use crate::FrameCols;
    use crate::SortOrder;

    fn sample() -> FrameCols {
        let mut frame = FrameCols::new();
        frame.append_new_column("lat", &[-65.0, -70.9, -73.1]).unwrap();
        frame.append_new_column("channel", &[10, 11, 13]).unwrap();
        frame
    }

    #[test]
    fn test_view_sees_value_writes() {
        let mut frame = sample();
        let view = frame.make_view();
        frame.set_column("channel", &[1, 2, 3]).unwrap();
        assert_eq!(view.get_column::<i32>("channel").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sorting_frame_leaves_view_intact() {
        let mut frame = sample();
        let view = frame.make_view();
        frame.sort_rows("lat", SortOrder::Ascending).unwrap();
        assert_eq!(view.get_column::<i32>("channel").unwrap(), vec![10, 11, 13]);
        assert_eq!(view.ids(), &[0, 1, 2]);
        assert_eq!(frame.get_column::<i32>("channel").unwrap(), vec![13, 11, 10]);
    }

    #[test]
    fn test_slice_view() {
        let frame = sample();
        let view = frame.make_view();
        let southern = view.slice_rows("lat", Comparison::LessThan, -70.0);
        assert_eq!(southern.ids(), &[1, 2]);
        assert_eq!(southern.column_metadata().max_id(), Some(2));
        let missing = view.slice_rows("lon", Comparison::LessThan, -70.0);
        assert_eq!(missing.row_count(), 0);
        assert_eq!(missing.column_count(), 0);
    }
}
