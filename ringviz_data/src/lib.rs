// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input tables and view-model aggregation for ring charts.
//!
//! This crate provides:
//! - an owned, role-tagged table model handed over by the host data layer, and
//! - a full-recompute aggregation that folds it into a [`ViewModel`].
//!
//! Aggregation always runs from scratch: each update builds a fresh view model, and only the
//! [`ColorPalette`] carries state from one update to the next so category colours stay stable.

#![no_std]

extern crate alloc;

mod aggregate;
mod palette;
mod table;

pub use aggregate::{
    Accumulator, DataPoint, LegendSummary, MeasureInfo, NULL_CATEGORY_KEY, SelectionKey,
    TooltipEntries, TooltipEntry, ViewModel, aggregate,
};
pub use palette::{ColorPalette, DEFAULT_COLORS};
pub use table::{CategoryColumn, CellValue, ColumnRole, DataTable, MeasureColumn, TableError};
