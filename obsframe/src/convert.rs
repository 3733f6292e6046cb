/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Conversion between layouts
//!
//! Converting a frame to the other layout copies every value. Row ids, column order, types and
//! widths carry over; every column of the new frame is writable, and the max id is recomputed over
//! the copied rows.

use crate::ColumnData;
use crate::DataRow;
use crate::Frame;
use crate::FrameCols;
use crate::FrameRows;
use crate::frame_cols::FrameColsData;
use crate::frame_rows::FrameRowsData;
use tracing::debug;
use tracing::error;

impl From<&FrameRows> for FrameCols {
    fn from(source: &FrameRows) -> Self {
        let rows = source.data().rows();
        let mut metadata = source.column_metadata().to_read_write();
        metadata.reset_max_id();

        let ids: Vec<i64> = rows.iter().map(DataRow::id).collect();
        let columns: Vec<ColumnData> = metadata
            .get()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let mut data = ColumnData::with_capacity(column.data_type(), rows.len());
                for value in rows.iter().filter_map(|row| row.get(index)) {
                    data.push(value);
                }
                data
            })
            .collect();

        debug!(rows = ids.len(), columns = columns.len(), "Converted row frame to column frame");
        // Every cell of a row frame already matches its column type and count.
        match FrameColsData::from_parts(metadata, ids, columns) {
            Ok(data) => FrameCols::from_data(data),
            Err(e) => {
                error!(error = %e, "Failed to assemble column frame, returning an empty one");
                FrameCols::new()
            }
        }
    }
}

impl From<&FrameCols> for FrameRows {
    fn from(source: &FrameCols) -> Self {
        let data = source.data();
        let mut metadata = source.column_metadata().to_read_write();
        metadata.reset_max_id();

        let rows: Vec<DataRow> = data
            .ids()
            .iter()
            .enumerate()
            .map(|(row_index, &id)| {
                let values = (0..data.metadata().column_count())
                    .filter_map(|column_index| data.column(column_index)?.datum(row_index))
                    .collect();
                DataRow::with_values(id, values)
            })
            .collect();

        debug!(rows = rows.len(), columns = metadata.column_count(), "Converted column frame to row frame");
        match FrameRowsData::from_parts(metadata, rows) {
            Ok(data) => FrameRows::from_data(data),
            Err(e) => {
                error!(error = %e, "Failed to assemble row frame, returning an empty one");
                FrameRows::new()
            }
        }
    }
}
