// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dual-ring (donut) chart layout.
//!
//! This crate turns an aggregated [`ringviz_data::ViewModel`] into drawing directives:
//! - **Slices** sized by magnitude, with pop-out / drop-in styling for negative values.
//! - **Labels** with guide lines, ellipsis truncation and collision culling.
//! - **Legend data** and a **summary panel** with up/down threshold indicators.
//!
//! [`RingChart`] runs the whole pipeline per update. Drawing the directives (SVG, a GPU scene,
//! DOM) is left to the host; every directive carries plain `kurbo` geometry and `peniko` colours.

#![no_std]

extern crate alloc;

mod chart;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod indicator;
mod label;
mod layout;
mod legend;
mod ring_layout;
mod selection;
mod settings;
mod summary;
mod title;
mod tooltip;
mod z_order;

pub use chart::{Frame, MISSING_ROLES_MESSAGE, RenderError, RenderEvents, RingChart, RingFrame};
pub use format::{
    BLANK, DisplayUnit, Locale, MAX_PRECISION, NumberFormat, ValueFormatter, clamp_precision,
    format_percent, is_percent_format, percent_of_total, scale_unit,
};
pub use indicator::{Direction, IndicatorScope, IndicatorSettings, ThresholdIndicator};
pub use label::{
    BASELINE_SHIFT_EM, CLIP_FACTOR, DetailLabelSettings, GUIDE_BEND_OFFSET, LABEL_OFFSET,
    LabelParts, LabelPlacement, LabelStyle, MIN_TRUNCATED_CHARS, SECOND_ROW_GAP, SecondRow,
    TextAnchor, compose, overlaps, place_labels, text_bounds,
};
pub use layout::{LegendPosition, LegendSide, RingChartLayout, RingChartLayoutSpec, Size};
pub use legend::{
    ArrangedLegend, LegendData, LegendItemBox, LegendMode, LegendRow, LegendSecondary,
    LegendSettings, LegendText, build_legend,
};
pub use ring_layout::{
    ArcPosition, ArcSlice, GUIDE_FACTOR, HOVER_FACTOR, HatchPattern, NegativeArcSettings,
    RADII_WITH_LABELS, RADII_WITHOUT_LABELS, RingGeometry, SliceFill, layout_slices, polar,
};
pub use ringviz_text::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use selection::{DIMMED_OPACITY, SELECTED_OPACITY, SelectionState};
pub use settings::{AnimationSettings, DEFAULT_NO_DATA_MESSAGE, RingChartSettings};
pub use summary::{
    MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH, SUMMARY_RADIUS_FACTOR, SecondarySummarySettings,
    SummaryBlock, SummaryCaption, SummaryPanel, SummaryPlacement, SummarySettings, SummaryValue,
    build_summary,
};
pub use title::{
    DEFAULT_TITLE_TOOLTIP, RingTitleSettings, TITLE_MARGIN, TOOLTIP_MARKER, TitleBlock,
    build_title,
};
pub use tooltip::{TooltipItem, TooltipItems, tooltip_items};
pub use z_order::*;
