/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! Column-major storage shared by [`super::FrameCols`] and [`crate::ViewCols`].
//!
//! Columns sit behind [`SharedColumn`] handles. A view made from a frame holds clones of the
//! handles, so value writes through `set_column` reach both. Structural row changes (append,
//! remove, sort) go through `Rc::make_mut`, which gives the frame its own copy of any column still
//! referenced by a view before changing it.

use crate::ColumnData;
use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::Comparison;
use crate::Datum;
use crate::Permission;
use crate::Scalar;
use crate::SharedColumn;
use crate::SortOrder;
use crate::functions::checks;
use crate::functions::cols;
use anyhow::Result;
use anyhow::bail;
use std::cell::Ref;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Default, PartialEq)]
pub struct FrameColsData {
    metadata: ColumnMetadata,
    ids: Vec<i64>,
    columns: Vec<SharedColumn>,
}

fn share_column(data: ColumnData) -> SharedColumn {
    Rc::new(RefCell::new(data))
}

/// Exclusive access to a column, detaching it from any view first
fn detach(column: &mut SharedColumn) -> &mut ColumnData {
    Rc::make_mut(column).get_mut()
}

impl FrameColsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a container from explicit metadata, row ids and one column per descriptor.
    ///
    /// Column types and lengths must agree with the metadata and ids, and ids must be unique.
    pub fn from_parts(mut metadata: ColumnMetadata, ids: Vec<i64>, columns: Vec<ColumnData>) -> Result<Self> {
        if columns.len() != metadata.column_count() {
            bail!(
                "{} columns supplied for a data frame with {} column descriptors.",
                columns.len(),
                metadata.column_count()
            );
        }
        for (column, data) in metadata.get().iter().zip(&columns) {
            if data.data_type() != column.data_type() {
                bail!(
                    "Column \"{}\" is declared {} but holds {} values.",
                    column.name(),
                    column.data_type(),
                    data.data_type()
                );
            }
            if data.len() != ids.len() {
                bail!(
                    "Column \"{}\" holds {} values for {} row ids.",
                    column.name(),
                    data.len(),
                    ids.len()
                );
            }
        }
        let mut seen = HashSet::new();
        for &id in &ids {
            if !seen.insert(id) {
                bail!("Row id {} appears more than once.", id);
            }
            metadata.update_max_id(id);
        }
        for (index, data) in columns.iter().enumerate() {
            metadata.update_column_width(index, data.max_width());
        }
        Ok(FrameColsData {
            metadata,
            ids,
            columns: columns.into_iter().map(share_column).collect(),
        })
    }

    pub fn metadata(&self) -> &ColumnMetadata {
        &self.metadata
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    pub fn column(&self, index: usize) -> Option<Ref<'_, ColumnData>> {
        self.columns.get(index).map(|column| column.borrow())
    }

    /// Same ids, columns aliasing this container's arrays; widths and permissions are shared too
    pub fn share(&self) -> Self {
        FrameColsData {
            metadata: self.metadata.share(),
            ids: self.ids.clone(),
            columns: self.columns.iter().map(Rc::clone).collect(),
        }
    }

    pub fn deep_copy(&self) -> Self {
        FrameColsData {
            metadata: self.metadata.clone(),
            ids: self.ids.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| share_column(column.borrow().clone()))
                .collect(),
        }
    }

    pub fn config_columns(&mut self, columns: Vec<ColumnMetadatum>) -> Result<()> {
        checks::config_columns(&self.metadata, &columns, self.ids.len())?;
        let count = columns.len();
        for column in columns {
            self.columns.push(share_column(ColumnData::empty(column.data_type())));
            self.metadata.add(column);
        }
        debug!(columns = count, "Configured columns");
        Ok(())
    }

    pub fn append_new_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        checks::new_column(&self.metadata, name, values.len(), self.ids.len())?;

        if self.ids.is_empty() {
            let first_id = self.metadata.next_id();
            for offset in 0..values.len() {
                let id = first_id + offset as i64;
                self.ids.push(id);
                self.metadata.update_max_id(id);
            }
        }
        let data = T::into_data(values.to_vec());
        let mut column = ColumnMetadatum::new(name, T::DATA_TYPE);
        column.update_width(data.max_width());
        self.columns.push(share_column(data));
        self.metadata.add(column);
        let data_type = T::DATA_TYPE;
        debug!(column = %name, data_type = %data_type, rows = self.ids.len(), "Appended column");
        Ok(())
    }

    pub fn append_new_row(&mut self, values: Vec<Datum>) -> Result<()> {
        checks::new_row(&self.metadata, &values)?;

        let id = self.metadata.next_id();
        for (index, (column, value)) in self.columns.iter_mut().zip(values).enumerate() {
            self.metadata
                .update_column_width(index, value.value_str().chars().count());
            detach(column).push(value);
        }
        self.ids.push(id);
        self.metadata.update_max_id(id);
        debug!(id, "Appended row");
        Ok(())
    }

    pub fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::column_type(&self.metadata, index, T::DATA_TYPE)?;
        match self.columns[index].borrow().values::<T>() {
            Some(values) => Ok(values.to_vec()),
            None => bail!("Column \"{}\" holds values of another type.", name),
        }
    }

    /// Overwrite a column in place. Views sharing the column see the new values.
    pub fn set_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::writable(&self.metadata, index)?;
        checks::column_type(&self.metadata, index, T::DATA_TYPE)?;
        checks::column_size(name, self.ids.len(), values.len())?;

        let width = {
            let mut column = self.columns[index].borrow_mut();
            if !column.set_values(values) {
                bail!("Column \"{}\" does not hold {} values.", name, T::DATA_TYPE);
            }
            column.max_width()
        };
        self.metadata.update_column_width(index, width);
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        self.remove_column_at(index)
    }

    pub fn remove_column_at(&mut self, index: usize) -> Result<()> {
        checks::column_at(&self.metadata, index)?;
        checks::writable(&self.metadata, index)?;

        self.columns.remove(index);
        if let Some(column) = self.metadata.remove(index) {
            debug!(column = %column.name(), "Removed column");
        }
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        checks::all_writable(&self.metadata)?;
        checks::row_index(index, self.ids.len())?;

        let id = self.ids.remove(index);
        for column in &mut self.columns {
            detach(column).remove(index);
        }
        debug!(id, "Removed row");
        Ok(())
    }

    pub fn sort_rows(&mut self, name: &str, order: SortOrder) -> Result<()> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::all_writable(&self.metadata)?;

        let indices = cols::sort_indices(&self.columns[index].borrow(), order);
        cols::reorder_rows(&indices, &mut self.ids, self.columns.iter_mut().map(detach));
        debug!(column = %name, order = ?order, "Sorted rows");
        Ok(())
    }

    /// Rows matching the threshold, copied into fresh column arrays.
    ///
    /// Returns an empty container (after logging) if the column is unknown or `T` is not its type.
    pub fn slice_rows<T: Scalar>(&self, name: &str, comparison: Comparison, threshold: &T) -> Self {
        let indices = match self.matching_rows(name, comparison, threshold) {
            Ok(indices) => indices,
            Err(_) => return Self::new(),
        };
        let sliced = self.select(&indices);
        debug!(column = %name, comparison = %comparison, rows = sliced.row_count(), "Sliced rows");
        sliced
    }

    fn matching_rows<T: Scalar>(&self, name: &str, comparison: Comparison, threshold: &T) -> Result<Vec<usize>> {
        let index = checks::column_index(&self.metadata, name)?;
        checks::threshold_type(&self.metadata, index, T::DATA_TYPE)?;
        match cols::matching_indices(&self.columns[index].borrow(), comparison, threshold) {
            Some(indices) => Ok(indices),
            None => bail!("Column \"{}\" holds values of another type.", name),
        }
    }

    /// Keep the rows at `indices`; the max id is recomputed over the kept rows only.
    fn select(&self, indices: &[usize]) -> Self {
        let ids = cols::select_ids(&self.ids, indices);
        let mut metadata = self.metadata.clone();
        metadata.reset_max_id();
        if let Some(&max_id) = ids.iter().max() {
            metadata.update_max_id(max_id);
        }
        let columns = self
            .columns
            .iter()
            .map(|column| share_column(column.borrow().select(indices)))
            .collect();
        FrameColsData { metadata, ids, columns }
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
        let borrowed: Vec<Ref<'_, ColumnData>> = self.columns.iter().map(|column| column.borrow()).collect();
        let columns: Vec<&ColumnData> = borrowed.iter().map(|column| &**column).collect();
        cols::render(&self.metadata, &self.ids, &columns)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.columns.clear();
        self.metadata.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;
    use crate::row;

    fn sample() -> FrameColsData {
        let mut data = FrameColsData::new();
        data.append_new_column("lat", &[-65.0, -70.9, -73.1]).unwrap();
        data.append_new_column("channel", &[10, 11, 13]).unwrap();
        data
    }

    #[test]
    fn test_set_column_is_visible_through_shared_columns() {
        let mut data = sample();
        let shared = data.share();
        data.set_column("channel", &[1, 2, 3]).unwrap();
        assert_eq!(shared.get_column::<i32>("channel").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_columns_share_widths() {
        let mut data = sample();
        let mut shared = data.share();
        data.set_column("channel", &[123456789, 2, 3]).unwrap();
        assert_eq!(shared.metadata().get_at(1).map(ColumnMetadatum::width), Some(9));
        assert_eq!(shared.render(), data.render());

        shared.set_column("lat", &[-1234.5678, 0.0, 0.0]).unwrap();
        assert_eq!(data.metadata().get_at(0).map(ColumnMetadatum::width), Some(10));
        assert_eq!(shared.render(), data.render());
    }

    #[test]
    fn test_structural_changes_detach_shared_columns() {
        let mut data = sample();
        let shared = data.share();

        data.sort_rows("lat", SortOrder::Ascending).unwrap();
        data.append_new_row(row![-60.0, 9]).unwrap();
        data.remove_row(0).unwrap();

        assert_eq!(data.get_column::<i32>("channel").unwrap(), vec![11, 10, 9]);
        assert_eq!(shared.get_column::<i32>("channel").unwrap(), vec![10, 11, 13]);
        assert_eq!(shared.ids(), &[0, 1, 2]);
    }

    #[test]
    fn test_sort_keeps_ids_with_values() {
        let mut data = sample();
        data.sort_rows("lat", SortOrder::Ascending).unwrap();
        assert_eq!(data.ids(), &[2, 1, 0]);
        assert_eq!(data.get_column::<f64>("lat").unwrap(), vec![-73.1, -70.9, -65.0]);
    }

    #[test]
    fn test_from_parts_validates_columns() {
        let mut metadata = ColumnMetadata::new();
        metadata.add(ColumnMetadatum::new("channel", DataType::Int32));

        let data = FrameColsData::from_parts(metadata.clone(), vec![4, 8], vec![ColumnData::Int32(vec![1, 200])]).unwrap();
        assert_eq!(data.metadata().max_id(), Some(8));
        assert_eq!(data.metadata().get_at(0).map(ColumnMetadatum::width), Some(7));

        assert!(FrameColsData::from_parts(metadata.clone(), vec![0], vec![ColumnData::Int64(vec![1])]).is_err());
        assert!(FrameColsData::from_parts(metadata.clone(), vec![0, 1], vec![ColumnData::Int32(vec![1])]).is_err());
        assert!(FrameColsData::from_parts(metadata.clone(), vec![0, 0], vec![ColumnData::Int32(vec![1, 2])]).is_err());
        assert!(FrameColsData::from_parts(metadata, vec![], vec![]).is_err());
    }
}
