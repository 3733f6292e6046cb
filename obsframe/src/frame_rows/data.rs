/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! Row-major storage shared by [`super::FrameRows`] and [`crate::ViewRows`].
//!
//! The owning frame holds rows whose cells are private to it; a view holds rows produced by
//! [`DataRow::share`], whose cells alias the frame's cells.

use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::Comparison;
use crate::DataRow;
use crate::Datum;
use crate::Permission;
use crate::Scalar;
use crate::SortOrder;
use crate::functions::checks;
use crate::functions::rows;
use anyhow::Result;
use anyhow::bail;
use std::cmp::Ordering;
use tracing::debug;

/// How a slice holds the rows it keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowCopy {
    /// Private cells and column settings
    Deep,
    /// Cells and column settings aliasing the source
    Shared,
}

impl RowCopy {
    fn row(self, row: &DataRow) -> DataRow {
        match self {
            RowCopy::Deep => row.deep_copy(),
            RowCopy::Shared => row.share(),
        }
    }

    fn metadata(self, metadata: &ColumnMetadata) -> ColumnMetadata {
        match self {
            RowCopy::Deep => metadata.clone(),
            RowCopy::Shared => metadata.share(),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct FrameRowsData {
    metadata: ColumnMetadata,
    rows: Vec<DataRow>,
}

impl FrameRowsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a container from explicit metadata and rows.
    ///
    /// Every row must hold one cell per column with the declared type, and ids must be unique.
    /// The max id and the column widths are recomputed from the rows.
    pub fn from_parts(mut metadata: ColumnMetadata, rows: Vec<DataRow>) -> Result<Self> {
        let mut ids = std::collections::HashSet::new();
        for row in &rows {
            if row.len() != metadata.column_count() {
                bail!(
                    "Row {} holds {} cells but the data frame has {} columns.",
                    row.id(),
                    row.len(),
                    metadata.column_count()
                );
            }
            for (index, column) in metadata.get().iter().enumerate() {
                if row.data_type(index) != Some(column.data_type()) {
                    bail!(
                        "Row {} does not hold a {} value for column \"{}\".",
                        row.id(),
                        column.data_type(),
                        column.name()
                    );
                }
            }
            if !ids.insert(row.id()) {
                bail!("Row id {} appears more than once.", row.id());
            }
        }
        for row in &rows {
            metadata.update_max_id(row.id());
            for index in 0..row.len() {
                let width = row.value_str(index).map_or(0, |value| value.chars().count());
                metadata.update_column_width(index, width);
            }
        }
        Ok(FrameRowsData { metadata, rows })
    }

    pub fn metadata(&self) -> &ColumnMetadata {
        &self.metadata
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn data_row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Rows aliasing this container's cells; column widths and permissions are shared too
    pub fn share(&self) -> Self {
        FrameRowsData {
            metadata: self.metadata.share(),
            rows: self.rows.iter().map(DataRow::share).collect(),
        }
    }

    pub fn deep_copy(&self) -> Self {
        FrameRowsData {
            metadata: self.metadata.clone(),
            rows: self.rows.iter().map(DataRow::deep_copy).collect(),
        }
    }

    pub fn config_columns(&mut self, columns: Vec<ColumnMetadatum>) -> Result<()> {
        checks::config_columns(&self.metadata, &columns, self.rows.len())?;
        let count = columns.len();
        self.metadata.add_all(columns);
        debug!(columns = count, "Configured columns");
        Ok(())
    }

    pub fn append_new_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        checks::new_column(&self.metadata, name, values.len(), self.rows.len())?;

        let mut column = ColumnMetadatum::new(name, T::DATA_TYPE);
        if self.rows.is_empty() {
            let first_id = self.metadata.next_id();
            for offset in 0..values.len() {
                let id = first_id + offset as i64;
                self.rows.push(DataRow::new(id));
                self.metadata.update_max_id(id);
            }
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            let datum = value.clone().into_datum();
            column.update_width(datum.value_str().chars().count());
            row.insert(datum);
        }
        self.metadata.add(column);
        let data_type = T::DATA_TYPE;
        debug!(column = %name, data_type = %data_type, rows = self.rows.len(), "Appended column");
        Ok(())
    }

    pub fn append_new_row(&mut self, values: Vec<Datum>) -> Result<()> {
        checks::new_row(&self.metadata, &values)?;

        let id = self.metadata.next_id();
        for (index, value) in values.iter().enumerate() {
            self.metadata
                .update_column_width(index, value.value_str().chars().count());
        }
        self.rows.push(DataRow::with_values(id, values));
        self.metadata.update_max_id(id);
        debug!(id, "Appended row");
        Ok(())
    }

    pub fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::column_type(&self.metadata, index, T::DATA_TYPE)?;
        match rows::column_values(&self.rows, index) {
            Some(values) => Ok(values),
            None => bail!("Column \"{}\" holds cells of another type.", name),
        }
    }

    /// Overwrite a column in place. Rows sharing these cells see the new values.
    pub fn set_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::writable(&self.metadata, index)?;
        checks::column_type(&self.metadata, index, T::DATA_TYPE)?;
        checks::column_size(name, self.rows.len(), values.len())?;

        rows::set_column_values(&self.rows, index, values);
        let width = values
            .iter()
            .map(|value| value.to_string().chars().count())
            .max()
            .unwrap_or(0);
        self.metadata.update_column_width(index, width);
        Ok(())
    }

    /// Overwrite one cell in place, checking the column permission and type
    pub fn set_value(&mut self, row: usize, column: usize, value: Datum) -> Result<()> {
        checks::row_index(row, self.rows.len())?;
        checks::column_at(&self.metadata, column)?;
        checks::writable(&self.metadata, column)?;
        checks::column_type(&self.metadata, column, value.data_type())?;

        let width = value.value_str().chars().count();
        let data_row = &self.rows[row];
        if !data_row.set_value(column, value) {
            bail!("Row {} has no cell for column {}.", data_row.id(), column);
        }
        self.metadata.update_column_width(column, width);
        debug!(id = data_row.id(), column, "Set value");
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        self.remove_column_at(index)
    }

    pub fn remove_column_at(&mut self, index: usize) -> Result<()> {
        checks::column_at(&self.metadata, index)?;
        checks::writable(&self.metadata, index)?;

        for row in &mut self.rows {
            row.remove(index);
        }
        if let Some(column) = self.metadata.remove(index) {
            debug!(column = %column.name(), "Removed column");
        }
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        checks::all_writable(&self.metadata)?;
        checks::row_index(index, self.rows.len())?;

        let row = self.rows.remove(index);
        debug!(id = row.id(), "Removed row");
        Ok(())
    }

    pub fn sort_rows(&mut self, name: &str, order: SortOrder) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::all_writable(&self.metadata)?;

        rows::sort_rows(&mut self.rows, index, order);
        debug!(column = %name, order = ?order, "Sorted rows");
        Ok(())
    }

    pub fn sort_rows_by<F>(&mut self, name: &str, compare: F) -> Result<()>
    where
        F: FnMut(&Datum, &Datum) -> Ordering,
    {
        let index = checks::column_index(&self.metadata, name)?;
        checks::all_writable(&self.metadata)?;

        rows::sort_rows_by(&mut self.rows, index, compare);
        debug!(column = %name, "Sorted rows with a cell comparator");
        Ok(())
    }

    pub fn sort_rows_with<F>(&mut self, compare: F) -> Result<()>
    where
        F: FnMut(&DataRow, &DataRow) -> Ordering,
    {
        checks::all_writable(&self.metadata)?;

        rows::sort_rows_with(&mut self.rows, compare);
        debug!("Sorted rows with a row comparator");
        Ok(())
    }

    /// Rows matching the threshold, held as `copy` says.
    ///
    /// Returns an empty container (after logging) if the column is unknown or `T` is not its type.
    pub(crate) fn slice_rows<T: Scalar>(
        &self,
        name: &str,
        comparison: Comparison,
        threshold: &T,
        copy: RowCopy,
    ) -> Self {
        let indices = match self.matching_rows(name, comparison, threshold) {
            Ok(indices) => indices,
            Err(_) => return Self::new(),
        };
        let sliced = self.select(&indices, copy);
        debug!(column = %name, comparison = %comparison, rows = sliced.row_count(), "Sliced rows");
        sliced
    }

    pub(crate) fn slice_rows_by<P>(&self, mut predicate: P, copy: RowCopy) -> Self
    where
        P: FnMut(&DataRow) -> bool,
    {
        let indices: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(index, _)| index)
            .collect();
        self.select(&indices, copy)
    }

    fn matching_rows<T: Scalar>(
        &self,
        name: &str,
        comparison: Comparison,
        threshold: &T,
    ) -> Result<Vec<usize>> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::threshold_type(&self.metadata, index, T::DATA_TYPE)?;
        Ok(rows::matching_rows(&self.rows, index, comparison, threshold))
    }

    /// Keep the rows at `indices`; the max id is recomputed over the kept rows only.
    fn select(&self, indices: &[usize], copy: RowCopy) -> Self {
        let rows: Vec<DataRow> = indices.iter().map(|&index| copy.row(&self.rows[index])).collect();
        let mut metadata = copy.metadata(&self.metadata);
        metadata.reset_max_id();
        if let Some(max_id) = rows::max_id(&rows) {
            metadata.update_max_id(max_id);
        }
        FrameRowsData { metadata, rows }
    }

    pub fn set_column_permission(&mut self, name: &str, permission: Permission) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::writable(&self.metadata, index)?;
        self.metadata.set_permission(index, permission);
        debug!(column = %name, permission = ?permission, "Changed column permission");
        Ok(())
    }

    pub fn rename_column(&mut self, name: &str, new_name: &str) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::rename(&self.metadata, index, new_name)?;
        self.metadata.rename(index, new_name);
        debug!(column = %name, new_name = %new_name, "Renamed column");
        Ok(())
    }

    pub fn render(&self) -> String {
        rows::render(&self.metadata, &self.rows)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.metadata.clear();
    }
}
