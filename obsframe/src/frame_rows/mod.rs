/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Row-major data frame
//!
//! [`FrameRows`] owns a vector of [`DataRow`] records. Besides the [`Frame`] contract it supports
//! sorting with a cell comparator ([`FrameRows::sort_rows_by`]) or a whole-row comparator
//! ([`FrameRows::sort_rows_with`]) and slicing with an arbitrary row predicate
//! ([`FrameRows::slice_rows_by`]).

mod data;

pub use data::FrameRowsData;
pub(crate) use data::RowCopy;

use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::Comparison;
use crate::DataRow;
use crate::Datum;
use crate::Frame;
use crate::Permission;
use crate::Scalar;
use crate::SortOrder;
use crate::ViewRows;
use anyhow::Result;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Row-major frame; cloning copies every value
#[derive(Debug, Default, PartialEq)]
pub struct FrameRows {
    data: FrameRowsData,
}

impl FrameRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(metadata: ColumnMetadata, rows: Vec<DataRow>) -> Result<Self> {
        Ok(FrameRows {
            data: FrameRowsData::from_parts(metadata, rows)?,
        })
    }

    pub(crate) fn from_data(data: FrameRowsData) -> Self {
        FrameRows { data }
    }

    pub fn data(&self) -> &FrameRowsData {
        &self.data
    }

    pub fn data_row(&self, index: usize) -> Option<&DataRow> {
        self.data.data_row(index)
    }

    /// Overwrite the cell at (`row`, `column`). Views sharing the row see the new value.
    pub fn set_value(&mut self, row: usize, column: usize, value: Datum) -> Result<()> {
        self.data.set_value(row, column, value)
    }

    /// Sort rows by comparing the cells of `column` with `compare`
    pub fn sort_rows_by<F>(&mut self, column: &str, compare: F) -> Result<()>
    where
        F: FnMut(&Datum, &Datum) -> Ordering,
    {
        self.data.sort_rows_by(column, compare)
    }

    /// Sort rows by comparing whole rows with `compare`
    pub fn sort_rows_with<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&DataRow, &DataRow) -> Ordering,
    {
        self.data.sort_rows_with(compare)
    }

    /// Deep copy holding the rows accepted by `predicate`
    pub fn slice_rows_by<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&DataRow) -> bool,
    {
        FrameRows::from_data(self.data.slice_rows_by(predicate, RowCopy::Deep))
    }
}

impl Clone for FrameRows {
    fn clone(&self) -> Self {
        FrameRows::from_data(self.data.deep_copy())
    }
}

impl Frame for FrameRows {
    type View = ViewRows;

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
        FrameRows::from_data(
            self.data
                .slice_rows(column, comparison, &threshold, RowCopy::Deep),
        )
    }

    fn make_view(&self) -> ViewRows {
        debug!(rows = self.data.row_count(), "Created row view");
        ViewRows::from_data(self.data.share())
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

impl fmt::Display for FrameRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;
    use crate::row;

    #[test]
    fn test_clone_is_deep() {
        let mut frame = FrameRows::new();
        frame.append_new_column("channel", &[10, 11]).unwrap();
        let copy = frame.clone();
        frame.set_column("channel", &[1, 2]).unwrap();
        assert_eq!(copy.get_column::<i32>("channel").unwrap(), vec![10, 11]);
    }

    #[test]
    fn test_configured_columns_accept_rows() {
        let mut frame = FrameRows::new();
        frame
            .config_columns(vec![
                ColumnMetadatum::new("lat", DataType::Double),
                ColumnMetadatum::new("station_id", DataType::String),
            ])
            .unwrap();
        assert_eq!(frame.row_count(), 0);
        frame.append_new_row(row![-73.0, "00000"]).unwrap();
        frame.append_new_row(row![-71.5, "00001"]).unwrap();
        assert_eq!(frame.max_id(), Some(1));
        assert_eq!(
            frame.get_column::<String>("station_id").unwrap(),
            vec!["00000".to_string(), "00001".to_string()]
        );
    }

    #[test]
    fn test_slice_rows_by_predicate() {
        let mut frame = FrameRows::new();
        frame.append_new_column("channel", &[10, 11, 12, 13]).unwrap();
        let odd = frame.slice_rows_by(|row| row.value::<i32>(0).is_some_and(|v| v % 2 == 1));
        assert_eq!(odd.get_column::<i32>("channel").unwrap(), vec![11, 13]);
        assert_eq!(odd.max_id(), Some(3));
    }

    #[test]
    fn test_set_value_respects_permission_and_width() {
        let mut frame = FrameRows::new();
        frame.append_new_column("qc", &[1i8, 2]).unwrap();
        frame.set_value(1, 0, Datum::from(-100i8)).unwrap();
        assert_eq!(frame.get_column::<i8>("qc").unwrap(), vec![1, -100]);
        assert_eq!(frame.render(), "   qc  \n0  1   \n1  -100");

        assert!(frame.set_value(0, 0, Datum::from(5i32)).is_err());
        assert!(frame.set_value(2, 0, Datum::from(5i8)).is_err());
        assert!(frame.set_value(0, 1, Datum::from(5i8)).is_err());

        frame.set_column_permission("qc", Permission::ReadOnly).unwrap();
        assert!(frame.set_value(0, 0, Datum::from(99i8)).is_err());
        assert_eq!(frame.get_column::<i8>("qc").unwrap(), vec![1, -100]);
    }

    #[test]
    fn test_display_matches_render() {
        let mut frame = FrameRows::new();
        frame.append_new_column("ch", &[7i8]).unwrap();
        assert_eq!(frame.to_string(), frame.render());
        assert_eq!(frame.render(), "   ch\n0  7 ");
    }
}
