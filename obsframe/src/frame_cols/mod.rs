/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Column-major data frame
//!
//! [`FrameCols`] keeps one contiguous [`ColumnData`] array per column and a separate vector of row
//! ids. It implements the same [`Frame`] contract as [`crate::FrameRows`] and renders the same text
//! for the same content.
//!
//! Sorting only takes a [`SortOrder`]: each column is reordered through its own typed array, so
//! there is no cell comparator form.

mod data;

pub use data::FrameColsData;

use crate::ColumnData;
use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::Comparison;
use crate::Datum;
use crate::Frame;
use crate::Permission;
use crate::Scalar;
use crate::SortOrder;
use crate::ViewCols;
use anyhow::Result;
use std::fmt;
use tracing::debug;

#[derive(Debug, Default, PartialEq)]
pub struct FrameCols {
    data: FrameColsData,
}

impl FrameCols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(metadata: ColumnMetadata, ids: Vec<i64>, columns: Vec<ColumnData>) -> Result<Self> {
        Ok(FrameCols {
            data: FrameColsData::from_parts(metadata, ids, columns)?,
        })
    }

    pub(crate) fn from_data(data: FrameColsData) -> Self {
        FrameCols { data }
    }

    pub fn data(&self) -> &FrameColsData {
        &self.data
    }

    pub fn ids(&self) -> &[i64] {
        self.data.ids()
    }
}

impl Clone for FrameCols {
    fn clone(&self) -> Self {
        FrameCols {
            data: self.data.deep_copy(),
        }
    }
}

impl Frame for FrameCols {
    type View = ViewCols;

    fn config_columns(&mut self, columns: Vec<ColumnMetadatum>) -> Result<()> {
        self.data.config_columns(columns)
    }

    fn append_new_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        self.data.append_new_column(name, values)
    }

    fn append_new_row(&mut self, values: Vec<Datum>) -> Result<()> {
        self.data.append_new_row(values)
    }

    fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>> {
        self.data.get_column(name)
    }

    fn set_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        self.data.set_column(name, values)
    }

    fn remove_column(&mut self, name: &str) -> Result<()> {
        self.data.remove_column(name)
    }

    fn remove_column_at(&mut self, index: usize) -> Result<()> {
        self.data.remove_column_at(index)
    }

    fn remove_row(&mut self, index: usize) -> Result<()> {
        self.data.remove_row(index)
    }

    fn sort_rows(&mut self, column: &str, order: SortOrder) -> Result<()> {
        self.data.sort_rows(column, order)
    }

    fn slice_rows<T: Scalar>(&self, column: &str, comparison: Comparison, threshold: T) -> Self {
        FrameCols {
            data: self.data.slice_rows(column, comparison, &threshold),
        }
    }

    fn make_view(&self) -> ViewCols {
        debug!(rows = self.data.row_count(), "Created column view");
        ViewCols::from_data(self.data.share())
    }

    fn set_column_permission(&mut self, name: &str, permission: Permission) -> Result<()> {
        self.data.set_column_permission(name, permission)
    }

    fn rename_column(&mut self, name: &str, new_name: &str) -> Result<()> {
        self.data.rename_column(name, new_name)
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

impl fmt::Display for FrameCols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn test_clone_is_deep() {
        let mut frame = FrameCols::new();
        frame.append_new_column("station_id", &["00000".to_string(), "47".to_string()]).unwrap();
        let copy = frame.clone();
        frame
            .set_column("station_id", &["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(
            copy.get_column::<String>("station_id").unwrap(),
            vec!["00000".to_string(), "47".to_string()]
        );
    }

    #[test]
    fn test_row_append_assigns_next_id() {
        let mut frame = FrameCols::new();
        frame.append_new_column("channel", &[10i16, 11]).unwrap();
        frame.append_new_row(row![12i16]).unwrap();
        assert_eq!(frame.ids(), &[0, 1, 2]);
        assert!(frame.append_new_row(row![12]).is_err());
        assert_eq!(frame.row_count(), 3);
    }
}
