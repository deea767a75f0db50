// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update pipeline: table in, frame out.
//!
//! Each [`RingChart::update`] recomputes everything from scratch. Only the colour palette and
//! the selection carry over between updates. Interaction (selecting a slice or legend row)
//! refreshes opacities on the current frame and never re-runs aggregation or layout.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use ringviz_data::{ColorPalette, DataTable, SelectionKey, TableError, ViewModel, aggregate};
use ringviz_text::TextMeasurer;
use thiserror::Error;

use crate::label::{LabelPlacement, place_labels};
use crate::layout::{RingChartLayout, RingChartLayoutSpec, Size};
use crate::legend::{LegendData, build_legend};
use crate::ring_layout::{ArcSlice, RingGeometry, layout_slices};
use crate::selection::SelectionState;
use crate::settings::RingChartSettings;
use crate::summary::{SummaryPanel, SummaryPlacement, build_summary};
use crate::title::{TitleBlock, build_title};
use crate::tooltip::{TooltipItems, tooltip_items};

/// Message shown when a required role is unbound.
pub const MISSING_ROLES_MESSAGE: &str = "Please select \"Primary Measure\" and \"Legend\" values";

/// Errors that abort an update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The viewport is not a finite, non-negative size.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
    },
    /// The input table failed validation.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Host notifications around an update.
///
/// All methods default to no-ops.
pub trait RenderEvents {
    /// An update started.
    fn rendering_started(&mut self) {}
    /// An update produced a frame.
    fn rendering_finished(&mut self) {}
    /// An update failed; the previous frame is kept.
    fn rendering_failed(&mut self, error: &RenderError) {
        let _ = error;
    }
}

impl RenderEvents for () {}

/// A laid-out ring chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RingFrame {
    /// Viewport the frame was laid out for.
    pub viewport: Size,
    /// Title, legend and ring rectangles.
    pub layout: RingChartLayout,
    /// Title, when shown.
    pub title: Option<TitleBlock>,
    /// Ring centre and radii.
    pub geometry: RingGeometry,
    /// One slice per category, in input order.
    pub slices: Vec<ArcSlice>,
    /// One label per category, in input order (empty when labels are off).
    pub labels: Vec<LabelPlacement>,
    /// Legend rows, when shown.
    pub legend: Option<LegendData>,
    /// Summary panel, when shown.
    pub summary: Option<SummaryPanel>,
    /// The aggregated input.
    pub view_model: ViewModel,
}

impl RingFrame {
    /// Recomputes slice, legend row and data point state from `selection`.
    pub fn apply_selection(&mut self, selection: &SelectionState) {
        for (slice, point) in self.slices.iter_mut().zip(&mut self.view_model.data_points) {
            slice.opacity = selection.opacity(&point.selection_key);
            point.selected = selection.is_selected(&point.selection_key);
        }
        if let Some(legend) = &mut self.legend {
            for row in &mut legend.rows {
                row.opacity = selection.opacity(&row.selection_key);
            }
        }
    }

    /// Tooltip lines of the slice at `index`.
    pub fn tooltip(&self, index: usize) -> Option<TooltipItems> {
        self.view_model.data_points.get(index).map(tooltip_items)
    }

    /// Selection key of the slice at `index`.
    pub fn selection_key(&self, index: usize) -> Option<&SelectionKey> {
        self.view_model
            .data_points
            .get(index)
            .map(|p| &p.selection_key)
    }
}

/// Output of an update.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// A single centred message instead of a chart.
    Message(String),
    /// A chart.
    Chart(RingFrame),
}

impl Frame {
    /// The chart, if this frame is not a message.
    pub fn as_chart(&self) -> Option<&RingFrame> {
        match self {
            Self::Chart(frame) => Some(frame),
            Self::Message(_) => None,
        }
    }

    /// The message, if this frame is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(text) => Some(text),
            Self::Chart(_) => None,
        }
    }
}

/// A ring chart across updates.
#[derive(Debug, Default)]
pub struct RingChart {
    settings: RingChartSettings,
    palette: ColorPalette,
    selection: SelectionState,
    frame: Option<Frame>,
}

impl RingChart {
    /// Creates a chart with the given settings and the default palette.
    pub fn new(settings: RingChartSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Replaces the palette.
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &RingChartSettings {
        &self.settings
    }

    /// Replaces the settings; they apply from the next update.
    pub fn set_settings(&mut self, settings: RingChartSettings) {
        self.settings = settings;
    }

    /// The last successfully built frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Toggles `key` (slice or legend row click) and refreshes opacities.
    pub fn select(&mut self, key: &SelectionKey) -> bool {
        let selected = self.selection.select(key);
        self.refresh_selection();
        selected
    }

    /// Clears the selection (background click) and refreshes opacities.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        if let Some(Frame::Chart(frame)) = &mut self.frame {
            frame.apply_selection(&self.selection);
        }
    }

    /// Rebuilds the frame for `table` in `viewport`.
    ///
    /// On error the host is notified once and the previous frame stays in place.
    pub fn update(
        &mut self,
        table: &DataTable,
        viewport: Size,
        measurer: &dyn TextMeasurer,
        events: &mut dyn RenderEvents,
    ) -> Result<&Frame, RenderError> {
        events.rendering_started();
        match self.build(table, viewport, measurer) {
            Ok(frame) => {
                events.rendering_finished();
                Ok(self.frame.insert(frame))
            }
            Err(error) => {
                log::error!("ring chart update failed: {error}");
                events.rendering_failed(&error);
                Err(error)
            }
        }
    }

    fn build(
        &mut self,
        table: &DataTable,
        viewport: Size,
        measurer: &dyn TextMeasurer,
    ) -> Result<Frame, RenderError> {
        if !viewport.is_valid() {
            return Err(RenderError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let view_model = aggregate(table, &mut self.palette)?;
        if !view_model.has_required_roles() {
            self.selection.clear();
            return Ok(Frame::Message(String::from(MISSING_ROLES_MESSAGE)));
        }
        if view_model.primary_measure_sum == 0.0 {
            self.selection.clear();
            return Ok(Frame::Message(self.settings.no_data_message.clone()));
        }

        let settings = &self.settings;
        let title = build_title(&settings.title, &view_model, viewport.width, measurer);
        let title_height = title.as_ref().map_or(0.0, |t| t.height);
        let legend = build_legend(
            &view_model,
            &settings.legend,
            &settings.primary_indicator,
            &settings.secondary_indicator,
        );
        let legend_box = legend
            .as_ref()
            .map(|l| (l.measure(measurer), l.position));

        let layout = RingChartLayout::arrange(&RingChartLayoutSpec {
            viewport,
            title_height,
            legend: legend_box,
        });
        let geometry = RingGeometry::new(layout.ring, settings.detail_labels.show);
        let slices = layout_slices(
            &view_model,
            &geometry,
            &settings.negative_arcs,
            settings.animation.show,
        );
        let labels = place_labels(
            &view_model,
            &slices,
            &geometry,
            layout.ring,
            &settings.detail_labels,
            measurer,
        );
        let summary = build_summary(
            &view_model,
            &settings.summary,
            &settings.secondary_summary,
            &settings.primary_indicator,
            &settings.secondary_indicator,
            &SummaryPlacement {
                viewport,
                radius: geometry.radius,
                title_height,
                legend: legend_box,
            },
            measurer,
        );

        log::debug!(
            "ring chart update: {} slices, {} visible labels, sum {}",
            slices.len(),
            labels.iter().filter(|l| l.visible).count(),
            view_model.primary_measure_sum
        );

        self.selection
            .retain_existing(view_model.data_points.iter().map(|p| &p.selection_key));
        let mut frame = RingFrame {
            viewport,
            layout,
            title,
            geometry,
            slices,
            labels,
            legend,
            summary,
            view_model,
        };
        frame.apply_selection(&self.selection);
        Ok(Frame::Chart(frame))
    }
}
