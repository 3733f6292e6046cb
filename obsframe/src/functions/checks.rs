/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! Request validation shared by every frame and view.
//!
//! Each check logs an `error` event and returns `Err` when the request cannot be honoured, so the
//! caller can bail out before touching its storage.

use super::reject;
use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::DataType;
use crate::Datum;
use anyhow::Result;
use anyhow::bail;
use std::collections::HashSet;

pub fn column_index(metadata: &ColumnMetadata, name: &str) -> Result<usize> {
    match metadata.index(name) {
        Some(index) => Ok(index),
        None => reject!("Column named \"{}\" not found in current data frame.", name),
    }
}

pub fn column_at(metadata: &ColumnMetadata, index: usize) -> Result<&ColumnMetadatum> {
    match metadata.get_at(index) {
        Some(column) => Ok(column),
        None => reject!("Column index \"{}\" is incompatible with current data frame.", index),
    }
}

pub fn writable(metadata: &ColumnMetadata, index: usize) -> Result<()> {
    if let Some(column) = metadata.get_at(index)
        && column.is_read_only()
    {
        reject!("Column named \"{}\" is set to read-only.", column.name());
    }
    Ok(())
}

/// Row-level mutations need every column to be writable
pub fn all_writable(metadata: &ColumnMetadata) -> Result<()> {
    if let Some(column) = metadata.first_read_only() {
        reject!("Column named \"{}\" is set to read-only.", column.name());
    }
    Ok(())
}

pub fn column_type(metadata: &ColumnMetadata, index: usize, data_type: DataType) -> Result<()> {
    if let Some(column) = metadata.get_at(index)
        && column.data_type() != data_type
    {
        reject!(
            "Input vector for column \"{}\" is not the required data type.",
            column.name()
        );
    }
    Ok(())
}

pub fn column_size(name: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        reject!("Input vector for column \"{}\" is not the required size.", name);
    }
    Ok(())
}

pub fn row_index(index: usize, row_count: usize) -> Result<()> {
    if index >= row_count {
        reject!("Row index \"{}\" is incompatible with current data frame.", index);
    }
    Ok(())
}

/// A new column needs a free name and, once rows exist, exactly one value per row.
///
/// Columns cannot be appended while configured columns exist without rows.
pub fn new_column(
    metadata: &ColumnMetadata,
    name: &str,
    value_count: usize,
    row_count: usize,
) -> Result<()> {
    if value_count == 0 {
        reject!("No values present in data vector.");
    }
    if metadata.exists(name) {
        reject!("A column named \"{}\" already exists.", name);
    }
    if row_count == 0 && !metadata.is_empty() {
        reject!(
            "Cannot append column \"{}\" to a data frame whose columns hold no rows.",
            name
        );
    }
    if row_count != 0 && value_count != row_count {
        reject!("Number of rows in new column incompatible with current data frame.");
    }
    Ok(())
}

/// Values of a new row are checked left to right against the column types
pub fn new_row(metadata: &ColumnMetadata, values: &[Datum]) -> Result<()> {
    if metadata.is_empty() {
        reject!("Cannot insert a new row without first setting column headings.");
    }
    if values.len() != metadata.column_count() {
        reject!("Number of columns in new row are incompatible with this data frame.");
    }
    all_writable(metadata)?;
    for (column, value) in metadata.get().iter().zip(values) {
        if column.data_type() != value.data_type() {
            reject!(
                "Data type for column \"{}\" is incompatible with current data frame",
                column.name()
            );
        }
    }
    Ok(())
}

pub fn threshold_type(metadata: &ColumnMetadata, index: usize, data_type: DataType) -> Result<()> {
    if let Some(column) = metadata.get_at(index)
        && column.data_type() != data_type
    {
        reject!(
            "Threshold for column \"{}\" is not the required data type.",
            column.name()
        );
    }
    Ok(())
}

pub fn rename(metadata: &ColumnMetadata, index: usize, new_name: &str) -> Result<()> {
    writable(metadata, index)?;
    if metadata.exists(new_name) {
        reject!("A column named \"{}\" already exists.", new_name);
    }
    Ok(())
}

/// Structural check for `config_columns`: fails without logging.
pub fn config_columns(metadata: &ColumnMetadata, columns: &[ColumnMetadatum], row_count: usize) -> Result<()> {
    if row_count != 0 {
        bail!("Cannot configure columns on a data frame that already holds rows.");
    }
    let mut seen = HashSet::new();
    for column in columns {
        if metadata.exists(column.name()) || !seen.insert(column.name()) {
            bail!("A column named \"{}\" already exists.", column.name());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;
    use crate::row;

    fn sample() -> ColumnMetadata {
        let mut metadata = ColumnMetadata::new();
        metadata.add(ColumnMetadatum::new("lat", DataType::Double));
        metadata.add(ColumnMetadatum::new("channel", DataType::Int32));
        metadata
    }

    #[test]
    fn test_new_column_rules() {
        let empty = ColumnMetadata::new();
        assert!(new_column(&empty, "lat", 10, 0).is_ok());
        assert!(new_column(&empty, "lat", 0, 0).is_err());

        let metadata = sample();
        assert!(new_column(&metadata, "lat", 3, 3).is_err());
        assert!(new_column(&metadata, "lon", 2, 3).is_err());
        assert!(new_column(&metadata, "lon", 3, 0).is_err());
        assert!(new_column(&metadata, "lon", 3, 3).is_ok());
    }

    #[test]
    fn test_new_row_rules() {
        assert!(new_row(&ColumnMetadata::new(), &row![-73.0]).is_err());

        let metadata = sample();
        assert!(new_row(&metadata, &row![-73.0]).is_err());
        assert!(new_row(&metadata, &row![-73.0, 11i64]).is_err());
        assert!(new_row(&metadata, &row![11, -73.0]).is_err());
        assert!(new_row(&metadata, &row![-73.0, 11]).is_ok());

        let mut read_only = sample();
        read_only.add(ColumnMetadatum::with_permission("qc", DataType::Int8, Permission::ReadOnly));
        let error = new_row(&read_only, &row![-73.0, 11, 0i8]).unwrap_err();
        assert!(error.to_string().contains("read-only"));
    }

    #[test]
    fn test_config_columns_rejects_duplicates() {
        let metadata = sample();
        let fresh = vec![
            ColumnMetadatum::new("lon", DataType::Double),
            ColumnMetadatum::new("lon", DataType::Double),
        ];
        assert!(config_columns(&metadata, &fresh, 0).is_err());
        assert!(config_columns(&metadata, &[ColumnMetadatum::new("lat", DataType::Double)], 0).is_err());
        assert!(config_columns(&metadata, &[ColumnMetadatum::new("lon", DataType::Double)], 0).is_ok());
        assert!(config_columns(&metadata, &[ColumnMetadatum::new("lon", DataType::Double)], 2).is_err());
    }

    #[test]
    fn test_error_messages() {
        let metadata = sample();
        let error = column_index(&metadata, "lon").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Column named \"lon\" not found in current data frame."
        );
        let error = column_type(&metadata, 1, DataType::Int64).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Input vector for column \"channel\" is not the required data type."
        );
        assert!(row_index(3, 3).is_err());
        assert!(row_index(2, 3).is_ok());
    }
}
