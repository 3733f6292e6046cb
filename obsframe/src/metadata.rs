/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Column metadata
//!
//! A [`ColumnMetadata`] is the ordered schema shared by every frame and view: one
//! [`ColumnMetadatum`] per column (insertion order is column order and display order) plus the
//! largest row id ever assigned in the container.
//!
//! Lookups by index or name return `Option`, so an unknown column is never an error at this level.
//! The frames turn a `None` into a logged failure.
//!
//! ## Shared column settings
//! The permission and display width of a column live behind a reference-counted handle. A view
//! made with [`ColumnMetadata::share`] holds the same handles as its frame, so a value written
//! through either side widens the column for both, and a column made read-only on the frame is
//! read-only in its views too. `Clone` gives independent settings.

use crate::DataType;
use crate::Permission;
use crate::functions;
use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

#[derive(Debug, PartialEq, Eq)]
struct Settings {
    permission: Cell<Permission>,
    width: Cell<usize>,
}

impl Settings {
    fn new(permission: Permission, width: usize) -> Rc<Self> {
        Rc::new(Settings {
            permission: Cell::new(permission),
            width: Cell::new(width),
        })
    }
}

/// Descriptor of a single column
#[derive(Debug, PartialEq, Eq)]
pub struct ColumnMetadatum {
    name: String,
    data_type: DataType,
    settings: Rc<Settings>,
}

impl ColumnMetadatum {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self::with_permission(name, data_type, Permission::ReadWrite)
    }

    pub fn with_permission(name: impl Into<String>, data_type: DataType, permission: Permission) -> Self {
        let name = name.into();
        let width = name.chars().count();
        ColumnMetadatum {
            name,
            data_type,
            settings: Settings::new(permission, width),
        }
    }

    /// Build a descriptor from raw type and permission tags.
    ///
    /// Unrecognised tags are a construction error.
    pub fn from_tags(name: impl Into<String>, type_tag: i8, permission_tag: i8) -> Result<Self> {
        let data_type = DataType::try_from(type_tag)?;
        let permission = Permission::try_from(permission_tag)?;
        Ok(Self::with_permission(name, data_type, permission))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn permission(&self) -> Permission {
        self.settings.permission.get()
    }

    pub fn is_read_only(&self) -> bool {
        self.permission() == Permission::ReadOnly
    }

    /// Display width: never below the name length, never decreases
    pub fn width(&self) -> usize {
        self.settings.width.get()
    }

    /// Rename the column. Returns `false` for a read-only column.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        if self.is_read_only() {
            return false;
        }
        self.name = name.into();
        self.update_width(self.name.chars().count());
        true
    }

    /// Returns `false` for a read-only column, which stays read-only.
    pub fn set_permission(&mut self, permission: Permission) -> bool {
        if self.is_read_only() {
            return false;
        }
        self.settings.permission.set(permission);
        true
    }

    /// Widen the column for every holder of these settings
    pub fn update_width(&self, width: usize) {
        let settings = &self.settings;
        settings.width.set(settings.width.get().max(width));
    }

    /// Descriptor holding the same settings handle
    pub fn share(&self) -> Self {
        ColumnMetadatum {
            name: self.name.clone(),
            data_type: self.data_type,
            settings: Rc::clone(&self.settings),
        }
    }

    /// Same name, type and width, but writable
    pub fn to_read_write(&self) -> Self {
        ColumnMetadatum {
            name: self.name.clone(),
            data_type: self.data_type,
            settings: Settings::new(Permission::ReadWrite, self.width()),
        }
    }
}

impl Clone for ColumnMetadatum {
    fn clone(&self) -> Self {
        ColumnMetadatum {
            name: self.name.clone(),
            data_type: self.data_type,
            settings: Settings::new(self.permission(), self.width()),
        }
    }
}

/// Ordered set of uniquely named columns plus the row id counter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMetadata {
    columns: Vec<ColumnMetadatum>,
    max_id: Option<i64>,
}

impl ColumnMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.index(name).is_some()
    }

    /// Register a column. Returns its index, or `None` (without any change) if the name is taken.
    pub fn add(&mut self, column: ColumnMetadatum) -> Option<usize> {
        if self.exists(column.name()) {
            return None;
        }
        self.columns.push(column);
        Some(self.columns.len() - 1)
    }

    /// Register columns in order, stopping at the first duplicate.
    ///
    /// Returns the index of the last column added, or `None` if nothing was added.
    pub fn add_all(&mut self, columns: impl IntoIterator<Item = ColumnMetadatum>) -> Option<usize> {
        let mut last = None;
        for column in columns {
            match self.add(column) {
                Some(index) => last = Some(index),
                None => break,
            }
        }
        last
    }

    pub fn get(&self) -> &[ColumnMetadatum] {
        &self.columns
    }

    pub fn get_at(&self, index: usize) -> Option<&ColumnMetadatum> {
        self.columns.get(index)
    }

    /// Returns `false` if the index is out of range or the column is read-only
    pub fn set_permission(&mut self, index: usize, permission: Permission) -> bool {
        self.columns
            .get_mut(index)
            .is_some_and(|column| column.set_permission(permission))
    }

    /// Returns `false` if the index is out of range, the column is read-only or the name is taken
    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        if self.exists(name) {
            return false;
        }
        self.columns
            .get_mut(index)
            .is_some_and(|column| column.set_name(name))
    }

    pub fn remove(&mut self, index: usize) -> Option<ColumnMetadatum> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.get_at(index).map(ColumnMetadatum::name)
    }

    pub fn data_type(&self, index: usize) -> Option<DataType> {
        self.get_at(index).map(ColumnMetadatum::data_type)
    }

    pub fn permission(&self, index: usize) -> Option<Permission> {
        self.get_at(index).map(ColumnMetadatum::permission)
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name() == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// First read-only column, if any
    pub fn first_read_only(&self) -> Option<&ColumnMetadatum> {
        self.columns.iter().find(|column| column.is_read_only())
    }

    pub fn max_id(&self) -> Option<i64> {
        self.max_id
    }

    /// Id the next appended row receives
    pub fn next_id(&self) -> i64 {
        self.max_id.map_or(0, |id| id + 1)
    }

    pub fn update_max_id(&mut self, id: i64) {
        self.max_id = Some(self.max_id.map_or(id, |max_id| max_id.max(id)));
    }

    pub fn reset_max_id(&mut self) {
        self.max_id = None;
    }

    pub fn update_column_width(&mut self, index: usize, width: usize) {
        if let Some(column) = self.columns.get_mut(index) {
            column.update_width(width);
        }
    }

    /// Display width of the row id column
    pub fn id_width(&self) -> usize {
        functions::id_width(self.max_id)
    }

    /// Same columns and ids, with settings shared with this schema
    pub fn share(&self) -> Self {
        ColumnMetadata {
            columns: self.columns.iter().map(ColumnMetadatum::share).collect(),
            max_id: self.max_id,
        }
    }

    /// Copy of the schema with every column writable
    pub fn to_read_write(&self) -> Self {
        ColumnMetadata {
            columns: self.columns.iter().map(ColumnMetadatum::to_read_write).collect(),
            max_id: self.max_id,
        }
    }

    /// Header line: a blank id column followed by every padded column name
    pub fn header(&self, id_width: usize) -> String {
        let mut line = functions::pad_string("", id_width);
        for column in &self.columns {
            line.push_str(functions::COLUMN_SPACER);
            line.push_str(&functions::pad_string(column.name(), column.width()));
        }
        line
    }

    pub fn print(&self, id_width: usize) {
        info!("{}", self.header(id_width));
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.max_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColumnMetadata {
        let mut metadata = ColumnMetadata::new();
        metadata.add(ColumnMetadatum::new("lat", DataType::Double));
        metadata.add(ColumnMetadatum::new("station_id", DataType::String));
        metadata
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut metadata = sample();
        assert_eq!(metadata.add(ColumnMetadatum::new("lat", DataType::Float)), None);
        assert_eq!(metadata.column_count(), 2);
        assert_eq!(metadata.data_type(0), Some(DataType::Double));
    }

    #[test]
    fn test_add_all_stops_at_first_duplicate() {
        let mut metadata = sample();
        let last = metadata.add_all(vec![
            ColumnMetadatum::new("lon", DataType::Double),
            ColumnMetadatum::new("lat", DataType::Double),
            ColumnMetadatum::new("channel", DataType::Int32),
        ]);
        assert_eq!(last, Some(2));
        assert_eq!(metadata.column_count(), 3);
        assert!(!metadata.exists("channel"));

        assert_eq!(metadata.add_all(vec![ColumnMetadatum::new("lat", DataType::Int8)]), None);
    }

    #[test]
    fn test_lookups_out_of_range() {
        let metadata = sample();
        assert_eq!(metadata.name(1), Some("station_id"));
        assert_eq!(metadata.name(2), None);
        assert_eq!(metadata.data_type(5), None);
        assert_eq!(metadata.permission(2), None);
        assert_eq!(metadata.index("lon"), None);
        assert_eq!(metadata.index("station_id"), Some(1));
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut metadata = sample();
        assert_eq!(metadata.remove(0).map(|c| c.name().to_string()), Some("lat".into()));
        assert_eq!(metadata.index("station_id"), Some(0));
        assert!(metadata.remove(3).is_none());
    }

    #[test]
    fn test_shared_settings_follow_the_source() {
        let mut metadata = ColumnMetadata::new();
        metadata.add(ColumnMetadatum::new("qc", DataType::Int8));
        let shared = metadata.share();
        let copy = metadata.clone();

        metadata.update_column_width(0, 6);
        metadata.set_permission(0, Permission::ReadOnly);
        assert_eq!(shared.get_at(0).map(ColumnMetadatum::width), Some(6));
        assert_eq!(shared.permission(0), Some(Permission::ReadOnly));
        assert_eq!(copy.get_at(0).map(ColumnMetadatum::width), Some(2));
        assert_eq!(copy.permission(0), Some(Permission::ReadWrite));
    }

    #[test]
    fn test_width_is_monotonic() {
        let mut metadata = sample();
        assert_eq!(metadata.get_at(0).map(ColumnMetadatum::width), Some(3));
        metadata.update_column_width(0, 8);
        metadata.update_column_width(0, 2);
        assert_eq!(metadata.get_at(0).map(ColumnMetadatum::width), Some(8));
    }

    #[test]
    fn test_max_id_is_monotonic() {
        let mut metadata = ColumnMetadata::new();
        assert_eq!(metadata.next_id(), 0);
        metadata.update_max_id(4);
        metadata.update_max_id(2);
        assert_eq!(metadata.max_id(), Some(4));
        assert_eq!(metadata.next_id(), 5);
        metadata.reset_max_id();
        assert_eq!(metadata.max_id(), None);
    }

    #[test]
    fn test_read_only_column_refuses_edits() {
        let mut column = ColumnMetadatum::with_permission("qc", DataType::Int8, Permission::ReadOnly);
        assert!(!column.set_name("quality"));
        assert!(!column.set_permission(Permission::ReadWrite));
        assert_eq!(column.name(), "qc");
        assert!(column.is_read_only());

        let mut column = ColumnMetadatum::new("qc", DataType::Int8);
        assert!(column.set_name("quality"));
        assert_eq!(column.width(), 7);
        assert!(column.set_permission(Permission::ReadOnly));
        assert!(column.is_read_only());
    }

    #[test]
    fn test_rename_keeps_names_unique() {
        let mut metadata = sample();
        assert!(!metadata.rename(0, "station_id"));
        assert!(metadata.rename(0, "latitude"));
        assert_eq!(metadata.index("latitude"), Some(0));
        assert!(metadata.set_permission(0, Permission::ReadOnly));
        assert!(!metadata.rename(0, "lat"));
        assert!(!metadata.set_permission(7, Permission::ReadOnly));
    }

    #[test]
    fn test_from_tags_validates() {
        let column = ColumnMetadatum::from_tags("channel", 2, 0).unwrap();
        assert_eq!(column.data_type(), DataType::Int32);
        assert_eq!(column.permission(), Permission::ReadOnly);
        assert!(ColumnMetadatum::from_tags("channel", 9, 0).is_err());
        assert!(ColumnMetadatum::from_tags("channel", 2, 5).is_err());
    }

    #[test]
    fn test_header_layout() {
        let mut metadata = sample();
        metadata.update_max_id(12);
        assert_eq!(metadata.header(metadata.id_width()), "    lat  station_id");
    }
}
