// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The summary panel inside the ring hole: measure totals with indicators.

extern crate alloc;

use alloc::string::String;
use core::f64::consts::SQRT_2;

use kurbo::{Point, Rect};
use peniko::Color;
use ringviz_data::{MeasureInfo, ViewModel};
use ringviz_text::{TextMeasurer, TextStyle, tailor_text};

use crate::format::{DisplayUnit, MAX_PRECISION, ValueFormatter, scale_unit};
use crate::indicator::{IndicatorScope, IndicatorSettings, ThresholdIndicator};
use crate::layout::{LegendPosition, LegendSide, Size};
use crate::z_order;

/// Share of the ring radius the panel's inscribed circle spans.
pub const SUMMARY_RADIUS_FACTOR: f64 = 0.5;
/// The panel is only drawn in viewports wider than this.
pub const MIN_VIEWPORT_WIDTH: f64 = 150.0;
/// The panel is only drawn in viewports taller than this.
pub const MIN_VIEWPORT_HEIGHT: f64 = 100.0;
/// Glyphs narrower than this are hidden once the value is squeezed.
const MIN_INDICATOR_ROOM: f64 = 2.0;
/// Reference text whose width is reserved for the indicator glyph.
const INDICATOR_ROOM_TEXT: &str = "ABC";

/// Settings of the primary total.
#[derive(Clone, Debug, PartialEq)]
pub struct SummarySettings {
    /// Whether the panel is shown.
    pub show: bool,
    /// Text colour.
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Display unit; `None` picks one from the total.
    pub display_units: Option<DisplayUnit>,
    /// Decimals, clamped to `[0, 4]`.
    pub precision: u8,
    /// Caption above the total.
    pub text: String,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            show: true,
            color: Color::from_rgb8(0x77, 0x77, 0x77),
            font_size: 12.0,
            display_units: None,
            precision: 0,
            text: String::from("Total"),
        }
    }
}

impl SummarySettings {
    /// Shows or hides the panel.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Sets the caption.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the display unit (`None` for auto).
    pub fn with_display_units(mut self, units: Option<DisplayUnit>) -> Self {
        self.display_units = units;
        self
    }

    /// Sets the precision, clamped to `[0, 4]`.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Settings of the secondary total.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondarySummarySettings {
    /// Text colour.
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Display unit; `None` picks one from the total.
    pub display_units: Option<DisplayUnit>,
    /// Decimals, clamped to `[0, 4]`.
    pub precision: u8,
}

impl Default for SecondarySummarySettings {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x77, 0x77, 0x77),
            font_size: 12.0,
            display_units: None,
            precision: 0,
        }
    }
}

impl SecondarySummarySettings {
    /// Sets the display unit (`None` for auto).
    pub fn with_display_units(mut self, units: Option<DisplayUnit>) -> Self {
        self.display_units = units;
        self
    }

    /// Sets the precision, clamped to `[0, 4]`.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }
}

/// A caption line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryCaption {
    /// Text.
    pub text: String,
    /// Whether the line survived height overflow.
    pub visible: bool,
}

/// A total with its indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryValue {
    /// Formatted total, ellipsized when squeezed.
    pub text: String,
    /// Full-format hover text.
    pub tooltip: String,
    /// Indicator, when indicators are on.
    pub indicator: Option<ThresholdIndicator>,
    /// Whether the indicator survived width overflow.
    pub indicator_visible: bool,
    /// Width the value was squeezed to, if it overflowed.
    pub max_width: Option<f64>,
    /// Whether the line survived height overflow.
    pub visible: bool,
}

/// Caption plus total, with their text styling.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryBlock {
    /// Caption line.
    pub caption: SummaryCaption,
    /// Value line.
    pub value: SummaryValue,
    /// Text colour.
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
}

/// The summary panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryPanel {
    /// Square box inscribed in the ring hole.
    pub bounds: Rect,
    /// Whether the viewport is large enough to draw the panel.
    pub visible: bool,
    /// Primary total.
    pub total: SummaryBlock,
    /// Secondary total, when the secondary sum is non-zero.
    pub secondary: Option<SummaryBlock>,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Where the panel goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryPlacement {
    /// Outer viewport size.
    pub viewport: Size,
    /// Base ring radius.
    pub radius: f64,
    /// Height reserved for the title.
    pub title_height: f64,
    /// Legend size and position, when a legend is shown.
    pub legend: Option<(Size, LegendPosition)>,
}

impl SummaryPlacement {
    /// Side of the square panel.
    pub fn box_side(&self) -> f64 {
        self.radius * SUMMARY_RADIUS_FACTOR * SQRT_2
    }

    /// Centre of the panel: the viewport centre shifted by half the title height and, depending
    /// on the legend side, by half the legend extent.
    pub fn center(&self) -> Point {
        let (dx, dy) = match self.legend {
            Some((size, position)) => match position.side() {
                LegendSide::Top => (0.0, size.height * 0.5),
                LegendSide::Bottom => (0.0, -size.height * 0.5),
                LegendSide::Left => (size.width * 0.5, 0.0),
                LegendSide::Right => (-size.width * 0.5, 0.0),
            },
            None => (0.0, 0.0),
        };
        Point::new(
            self.viewport.width * 0.5 + dx,
            self.viewport.height * 0.5 + dy + self.title_height * 0.5,
        )
    }

    /// The panel box.
    pub fn bounds(&self) -> Rect {
        let side = self.box_side();
        Rect::from_center_size(self.center(), (side, side))
    }
}

struct Measure<'a> {
    info: Option<&'a MeasureInfo>,
    sum: f64,
    kpi: Option<f64>,
    units: Option<DisplayUnit>,
    precision: u8,
}

fn value_line(
    measure: &Measure<'_>,
    indicator: &IndicatorSettings,
    style: &TextStyle,
    box_width: f64,
    measurer: &dyn TextMeasurer,
) -> SummaryValue {
    let format = measure.info.and_then(|m| m.format.as_deref());
    let percent = measure.info.is_some_and(MeasureInfo::is_percent);
    let mut text = ValueFormatter::new(format)
        .with_precision(measure.precision)
        .with_unit(scale_unit(measure.sum, measure.units))
        .format(measure.sum);
    let tooltip = ValueFormatter::new(format).format(measure.sum);
    let indicator = indicator.evaluate(measure.sum, measure.kpi, percent, IndicatorScope::Total);

    let mut indicator_visible = indicator.is_some();
    let mut max_width = None;
    if let Some(ind) = &indicator {
        let needed = measurer.width(&text, style) + 2.0 * measurer.width(ind.glyph(), style);
        if needed > box_width {
            let available = (box_width - measurer.width(INDICATOR_ROOM_TEXT, style)).max(0.0);
            if available < MIN_INDICATOR_ROOM {
                indicator_visible = false;
            }
            text = tailor_text(measurer, &text, style, available).text;
            max_width = Some(available);
        }
    }

    SummaryValue {
        text,
        tooltip,
        indicator,
        indicator_visible,
        max_width,
        visible: true,
    }
}

/// Builds the summary panel, or `None` when it is disabled or the primary total is zero.
///
/// Height overflow hides lines in order: the total caption when the content is taller than the
/// box, the secondary caption when it is taller than `box × 1.2`, and the secondary value when it
/// is taller than `box × 2`.
pub fn build_summary(
    view_model: &ViewModel,
    settings: &SummarySettings,
    secondary_settings: &SecondarySummarySettings,
    primary_indicator: &IndicatorSettings,
    secondary_indicator: &IndicatorSettings,
    placement: &SummaryPlacement,
    measurer: &dyn TextMeasurer,
) -> Option<SummaryPanel> {
    if !settings.show || view_model.primary_measure_sum == 0.0 {
        return None;
    }
    let bounds = placement.bounds();
    let visible = placement.viewport.width > MIN_VIEWPORT_WIDTH
        && placement.viewport.height > MIN_VIEWPORT_HEIGHT;

    let style = TextStyle::from_points(settings.font_size);
    let mut total = SummaryBlock {
        caption: SummaryCaption {
            text: settings.text.clone(),
            visible: true,
        },
        value: value_line(
            &Measure {
                info: view_model.primary_measure.as_ref(),
                sum: view_model.primary_measure_sum,
                kpi: view_model.primary_kpi_sum,
                units: settings.display_units,
                precision: settings.precision,
            },
            primary_indicator,
            &style,
            bounds.width(),
            measurer,
        ),
        color: settings.color,
        font_size: settings.font_size,
    };
    let mut content_height = 2.0 * measurer.measure(&total.caption.text, &style).line_height();

    let secondary_style = TextStyle::from_points(secondary_settings.font_size);
    let mut secondary = view_model
        .secondary_measure
        .as_ref()
        .filter(|_| view_model.has_secondary_measure && view_model.secondary_measure_sum != 0.0)
        .map(|info| SummaryBlock {
            caption: SummaryCaption {
                text: info.display_name.clone(),
                visible: true,
            },
            value: value_line(
                &Measure {
                    info: Some(info),
                    sum: view_model.secondary_measure_sum,
                    kpi: view_model.secondary_kpi_sum,
                    units: secondary_settings.display_units,
                    precision: secondary_settings.precision,
                },
                secondary_indicator,
                &secondary_style,
                bounds.width(),
                measurer,
            ),
            color: secondary_settings.color,
            font_size: secondary_settings.font_size,
        });
    if let Some(block) = &secondary {
        content_height += 2.0
            * measurer
                .measure(&block.caption.text, &secondary_style)
                .line_height();
    }

    let box_height = bounds.height();
    if box_height < content_height {
        total.caption.visible = false;
        if let Some(block) = &mut secondary {
            if box_height < content_height / 1.2 {
                block.caption.visible = false;
                if box_height < content_height / 2.0 {
                    block.value.visible = false;
                }
            }
        }
    }
    log::debug!(
        "build_summary: box {:.1}px, content {:.1}px, secondary {}",
        box_height,
        content_height,
        secondary.is_some()
    );

    Some(SummaryPanel {
        bounds,
        visible,
        total,
        secondary,
        z_index: z_order::SUMMARY,
    })
}
