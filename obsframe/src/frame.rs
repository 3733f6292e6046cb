/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Common frame and view interfaces
//!
//! [`Frame`] is the contract shared by the owning containers ([`crate::FrameRows`] and
//! [`crate::FrameCols`]); [`View`] is the read, sort and slice subset exposed by the aliasing views.
//! Code written against these traits behaves identically for either layout.
//!
//! ## Failure handling
//! Recoverable failures (unknown column, type or size mismatch, read-only column, row index out of
//! range) are logged at `error` level and returned as `Err`; the container is left unmodified.
//! `slice_rows` returns an empty container instead of an error.

use crate::ColumnMetadata;
use crate::ColumnMetadatum;
use crate::Comparison;
use crate::Datum;
use crate::Permission;
use crate::Scalar;
use crate::SortOrder;
use crate::functions;
use anyhow::Result;

pub trait Frame {
    /// Aliasing projection returned by [`Frame::make_view`]
    type View: View;

    /// Register columns before any row exists. Duplicate names abort the whole call.
    fn config_columns(&mut self, columns: Vec<ColumnMetadatum>) -> Result<()>;

    /// Add a column whose type is inferred from `T`.
    ///
    /// On an empty container the values also create the rows; otherwise their count must match
    /// the current row count.
    fn append_new_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()>;

    /// Add a row with one value per column, in column order
    fn append_new_row(&mut self, values: Vec<Datum>) -> Result<()>;

    fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>>;

    fn set_column<T: Scalar>(&mut self, name: &str, values: &[T]) -> Result<()>;

    fn remove_column(&mut self, name: &str) -> Result<()>;

    fn remove_column_at(&mut self, index: usize) -> Result<()>;

    /// Remove the row at position `index` (not the row with id `index`)
    fn remove_row(&mut self, index: usize) -> Result<()>;

    fn sort_rows(&mut self, column: &str, order: SortOrder) -> Result<()>;

    /// Deep copy holding the rows where `value <comparison> threshold`
    fn slice_rows<T: Scalar>(&self, column: &str, comparison: Comparison, threshold: T) -> Self
    where
        Self: Sized;

    fn make_view(&self) -> Self::View;

    fn set_column_permission(&mut self, name: &str, permission: Permission) -> Result<()>;

    fn rename_column(&mut self, name: &str, new_name: &str) -> Result<()>;

    fn column_metadata(&self) -> &ColumnMetadata;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize {
        self.column_metadata().column_count()
    }

    fn max_id(&self) -> Option<i64> {
        self.column_metadata().max_id()
    }

    /// Table text: a header line, then one line per row
    fn render(&self) -> String;

    fn print(&self) {
        functions::print_lines(&self.render());
    }

    /// Drop every row and column; the container stays usable
    fn clear(&mut self);
}

pub trait View {
    fn get_column<T: Scalar>(&self, name: &str) -> Result<Vec<T>>;

    /// New view over the rows where `value <comparison> threshold`
    fn slice_rows<T: Scalar>(&self, column: &str, comparison: Comparison, threshold: T) -> Self
    where
        Self: Sized;

    fn column_metadata(&self) -> &ColumnMetadata;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize {
        self.column_metadata().column_count()
    }

    fn render(&self) -> String;

    fn print(&self) {
        functions::print_lines(&self.render());
    }

    /// Detach the view from its rows; the source frame is untouched
    fn clear(&mut self);
}
