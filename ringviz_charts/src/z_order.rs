// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for ring chart directives.
//!
//! Every directive in a [`crate::RingFrame`] carries an explicit `z_index`. Renderers should sort
//! by `(z_index, index)` for a deterministic tie-break.

/// Ring slices.
pub const RING_SLICES: i32 = 0;
/// Guide lines from slices to their labels.
pub const GUIDE_LINES: i32 = 10;
/// Detail labels (both rows).
pub const DETAIL_LABELS: i32 = 20;
/// The centred summary block.
pub const SUMMARY: i32 = 30;
/// Legend swatches and rows.
pub const LEGEND: i32 = 60;
/// The ring title.
pub const TITLES: i32 = 80;
