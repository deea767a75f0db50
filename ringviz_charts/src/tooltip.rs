// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice tooltips.

extern crate alloc;

use alloc::string::String;

use ringviz_data::{CellValue, DataPoint};
use smallvec::SmallVec;

use crate::format::{BLANK, ValueFormatter};

/// One `name: value` line of a tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipItem {
    /// Column display name.
    pub name: String,
    /// Display text of the value.
    pub value: String,
}

/// Tooltip lines of one data point, in column order.
pub type TooltipItems = SmallVec<[TooltipItem; 4]>;

/// Turns the tooltip entries of `point` into display lines.
///
/// Empty values read `"(Blank)"`; numbers use the column's format string.
pub fn tooltip_items(point: &DataPoint) -> TooltipItems {
    point
        .tooltip_entries
        .iter()
        .map(|entry| {
            let value = match &entry.value {
                CellValue::Null => String::from(BLANK),
                CellValue::Text(text) if text.is_empty() => String::from(BLANK),
                CellValue::Text(text) => text.clone(),
                CellValue::Number(n) => ValueFormatter::new(entry.format.as_deref()).format(*n),
            };
            TooltipItem {
                name: entry.name.clone(),
                value,
            }
        })
        .collect()
}
