/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # OBSFRAME - A Dual-Layout Observation Data Frame Library
//!
//! This library provides strongly-typed, in-memory tabular containers for observation data.
//! The same logical table can be held in two interchangeable physical layouts:
//!
//! - **Row-major** ([`FrameRows`]): a vector of [`DataRow`] records, each holding one cell per column.
//! - **Column-major** ([`FrameCols`]): one contiguous typed [`ColumnData`] array per column plus a
//!   separate vector of row ids.
//!
//! Both layouts implement the [`Frame`] trait and render identical text for identical content.
//! Read-only projections ([`ViewRows`], [`ViewCols`]) alias the storage of the frame they were made
//! from instead of copying it.
//!
//! ## Usage Examples
//!
//! ```rust
//! use obsframe::{Comparison, Frame, FrameRows, SortOrder, row};
//!
//! let mut frame = FrameRows::new();
//! frame.append_new_column("lat", &[-65.0, -71.5, -73.1]).unwrap();
//! frame.append_new_column("channel", &[10, 11, 12]).unwrap();
//! frame.append_new_row(row![-70.2, 13]).unwrap();
//!
//! frame.sort_rows("lat", SortOrder::Ascending).unwrap();
//! let southern = frame.slice_rows("lat", Comparison::LessThan, -70.0);
//! assert_eq!(southern.get_column::<i32>("channel").unwrap(), vec![12, 11, 13]);
//! ```

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

pub mod config;
pub mod convert;
pub mod data;
pub mod data_row;
pub mod datum;
pub mod frame;
pub mod frame_cols;
pub mod frame_rows;
pub mod functions;
pub mod metadata;
pub mod scalar;
pub mod view_cols;
pub mod view_rows;

pub use data::ColumnData;
pub use data::SharedColumn;
pub use data_row::Cell;
pub use data_row::DataRow;
pub use datum::Datum;
pub use frame::Frame;
pub use frame::View;
pub use frame_cols::FrameCols;
pub use frame_rows::FrameRows;
pub use metadata::ColumnMetadata;
pub use metadata::ColumnMetadatum;
pub use scalar::Scalar;
pub use view_cols::ViewCols;
pub use view_rows::ViewRows;

/// Scalar data types a column can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
}

impl DataType {
    pub const ALL: [DataType; 7] = [
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::Float,
        DataType::Double,
        DataType::String,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }

    /// Raw tag used by hosts that exchange column types as small integers
    pub fn tag(&self) -> i8 {
        match self {
            DataType::Int8 => 0,
            DataType::Int16 => 1,
            DataType::Int32 => 2,
            DataType::Int64 => 3,
            DataType::Float => 4,
            DataType::Double => 5,
            DataType::String => 6,
        }
    }
}

impl TryFrom<i8> for DataType {
    type Error = anyhow::Error;

    fn try_from(tag: i8) -> Result<Self> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.tag() == tag)
            .ok_or_else(|| anyhow::anyhow!("Unrecognised column data type tag: {}", tag))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column access permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadOnly,
    #[default]
    ReadWrite,
}

impl Permission {
    pub fn tag(&self) -> i8 {
        match self {
            Permission::ReadOnly => 0,
            Permission::ReadWrite => 1,
        }
    }
}

impl TryFrom<i8> for Permission {
    type Error = anyhow::Error;

    fn try_from(tag: i8) -> Result<Self> {
        match tag {
            0 => Ok(Permission::ReadOnly),
            1 => Ok(Permission::ReadWrite),
            _ => anyhow::bail!("Unrecognised column permission tag: {}", tag),
        }
    }
}

/// Row ordering requested from `sort_rows`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Comparison applied between a column value and a slicing threshold (`value <op> threshold`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    LessThanOrEqualTo,
    EqualTo,
    GreaterThanOrEqualTo,
    GreaterThan,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparison::LessThan => "<",
            Comparison::LessThanOrEqualTo => "<=",
            Comparison::EqualTo => "==",
            Comparison::GreaterThanOrEqualTo => ">=",
            Comparison::GreaterThan => ">",
        };
        f.write_str(symbol)
    }
}

/// Build the value list for `append_new_row` from heterogeneous scalars.
///
/// Each argument is converted with `Datum::from`, so string literals become string cells and
/// unsuffixed literals follow Rust's defaults (`i32` / `f64`).
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Datum::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_round_trip() {
        for data_type in DataType::ALL {
            assert_eq!(DataType::try_from(data_type.tag()).unwrap(), data_type);
        }
        assert!(DataType::try_from(7).is_err());
        assert!(DataType::try_from(-1).is_err());
    }

    #[test]
    fn test_permission_tags() {
        assert_eq!(Permission::try_from(0).unwrap(), Permission::ReadOnly);
        assert_eq!(Permission::try_from(1).unwrap(), Permission::ReadWrite);
        assert!(Permission::try_from(2).is_err());
        assert_eq!(Permission::default(), Permission::ReadWrite);
    }

    #[test]
    fn test_row_macro_infers_cell_types() {
        let values = row![-73.0, 128.0f32, "00000", 11, 1710460200i64, 3i8];
        let types: Vec<DataType> = values.iter().map(|datum| datum.data_type()).collect();
        assert_eq!(
            types,
            vec![
                DataType::Double,
                DataType::Float,
                DataType::String,
                DataType::Int32,
                DataType::Int64,
                DataType::Int8,
            ]
        );
    }
}
