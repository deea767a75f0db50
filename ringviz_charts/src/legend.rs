// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend data: one row per category with measure text, indicators and identity.
//!
//! The legend widget itself is drawn by the host. This module produces its rows and supports a
//! measure/arrange pass so a layout can reserve space for it:
//! - Measure: call [`LegendData::measure`] to get a desired size.
//! - Arrange: call [`LegendData::arrange`] once the origin is known.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use ringviz_data::{DataPoint, MeasureInfo, SelectionKey, ViewModel};
use ringviz_text::{TextMeasurer, TextStyle};

use crate::format::{
    BLANK, DisplayUnit, MAX_PRECISION, ValueFormatter, format_percent, percent_of_total,
    scale_unit,
};
use crate::indicator::{IndicatorScope, IndicatorSettings, ThresholdIndicator};
use crate::label::{TextAnchor, text_bounds};
use crate::layout::{LegendPosition, LegendSide, Size};
use crate::z_order;

/// What the legend shows next to each category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendMode {
    /// The value, unit-scaled.
    Value,
    /// The percent of total.
    Percentage,
    /// Value followed by percent of total.
    Both,
    /// Category only.
    #[default]
    None,
}

impl LegendMode {
    /// Parses a host mode name; unknown names fall back to [`LegendMode::None`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Value" => Self::Value,
            "Percentage" => Self::Percentage,
            "Both" => Self::Both,
            _ => Self::None,
        }
    }
}

/// Legend settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendSettings {
    /// Whether the legend is shown.
    pub show: bool,
    /// Whether the title is shown.
    pub show_title: bool,
    /// Title text; `None` uses the category column name.
    pub title: Option<String>,
    /// Measure text mode.
    pub mode: LegendMode,
    /// Display unit; `None` picks one per row from its own value.
    pub display_units: Option<DisplayUnit>,
    /// Decimal places, clamped to `[0, 4]`.
    pub decimal_places: u8,
    /// Position around the ring.
    pub position: LegendPosition,
    /// Font size in points.
    pub font_size: f64,
    /// Label colour.
    pub label_color: Color,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self {
            show: true,
            show_title: true,
            title: None,
            mode: LegendMode::None,
            display_units: None,
            decimal_places: 0,
            position: LegendPosition::Top,
            font_size: 8.0,
            label_color: css::BLACK,
        }
    }
}

impl LegendSettings {
    /// Shows or hides the legend.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Shows or hides the title.
    pub fn with_show_title(mut self, show_title: bool) -> Self {
        self.show_title = show_title;
        self
    }

    /// Overrides the title text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the measure text mode.
    pub fn with_mode(mut self, mode: LegendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the display unit (`None` for auto).
    pub fn with_display_units(mut self, units: Option<DisplayUnit>) -> Self {
        self.display_units = units;
        self
    }

    /// Sets the decimal places, clamped to `[0, 4]`.
    pub fn with_decimal_places(mut self, decimals: u8) -> Self {
        self.decimal_places = decimals.min(MAX_PRECISION);
        self
    }

    /// Sets the position.
    pub fn with_position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the label colour.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }
}

/// Secondary-measure part of a legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendSecondary {
    /// Raw secondary value.
    pub value: Option<f64>,
    /// Unit-scaled text.
    pub text: String,
    /// Full-format hover text.
    pub tooltip: String,
    /// Indicator, when secondary indicators are on.
    pub indicator: Option<ThresholdIndicator>,
}

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    /// Category text, `"(Blank)"` for empty categories.
    pub label: String,
    /// Swatch colour, shared with the slice.
    pub color: Color,
    /// Row identity, shared with the slice.
    pub selection_key: SelectionKey,
    /// Raw primary value.
    pub measure: Option<f64>,
    /// Measure text per [`LegendMode`].
    pub measure_text: String,
    /// Full-format hover text (no unit).
    pub measure_tooltip: String,
    /// Primary indicator, when primary indicators are on.
    pub indicator: Option<ThresholdIndicator>,
    /// Secondary block, when a secondary measure exists.
    pub secondary: Option<LegendSecondary>,
    /// Current opacity; see [`crate::SelectionState`].
    pub opacity: f64,
}

impl LegendRow {
    /// Single-line text shown next to the swatch.
    pub fn display_text(&self, show_measure: bool) -> String {
        let mut out = self.label.clone();
        if show_measure {
            out.push(' ');
            out.push_str(&self.measure_text);
        }
        if let Some(indicator) = &self.indicator {
            out.push(' ');
            out.push_str(indicator.glyph());
        }
        if let Some(secondary) = &self.secondary {
            out.push(' ');
            out.push_str(&secondary.text);
            if let Some(indicator) = &secondary.indicator {
                out.push(' ');
                out.push_str(indicator.glyph());
            }
        }
        out
    }
}

/// Everything the host legend widget needs.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendData {
    /// Title, when shown.
    pub title: Option<String>,
    /// Primary measure display name.
    pub primary_title: String,
    /// Secondary measure display name.
    pub secondary_title: Option<String>,
    /// Rows in input order.
    pub rows: Vec<LegendRow>,
    /// Whether rows show their measure text.
    pub show_measure: bool,
    /// Position around the ring.
    pub position: LegendPosition,
    /// Font size in points.
    pub font_size: f64,
    /// Label colour.
    pub label_color: Color,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Swatch square size.
const SWATCH_SIZE: f64 = 10.0;
/// Gap between swatch and label.
const LABEL_DX: f64 = 6.0;
/// Gap between stacked rows.
const ROW_GAP: f64 = 6.0;
/// Gap between flowed items.
const ITEM_GAP: f64 = 12.0;

/// A positioned line of legend text.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendText {
    /// Text.
    pub text: String,
    /// Start of the baseline.
    pub baseline: Point,
    /// Analytic bounds.
    pub bounds: Rect,
}

/// A positioned legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItemBox {
    /// Index into [`LegendData::rows`].
    pub row: usize,
    /// Swatch rectangle.
    pub swatch: Rect,
    /// Row text.
    pub label: LegendText,
}

/// A legend arranged at an origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrangedLegend {
    /// Positioned title.
    pub title: Option<LegendText>,
    /// Positioned rows.
    pub items: Vec<LegendItemBox>,
}

impl ArrangedLegend {
    /// Union of every swatch and text box; an empty legend yields a zero rect at `origin`.
    pub fn bounds(&self, origin: Point) -> Rect {
        let mut bounds: Option<Rect> = None;
        let rects = self
            .title
            .iter()
            .map(|t| t.bounds)
            .chain(self.items.iter().flat_map(|i| [i.swatch, i.label.bounds]));
        for r in rects {
            bounds = Some(match bounds {
                None => r,
                Some(b) => b.union(r),
            });
        }
        bounds.unwrap_or_else(|| Rect::from_origin_size(origin, (0.0, 0.0)))
    }
}

impl LegendData {
    /// Text style of titles and rows.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::from_points(self.font_size)
    }

    /// Lays the legend out from `origin`: flowed left to right for top/bottom positions,
    /// stacked for left/right positions.
    pub fn arrange(&self, origin: Point, measurer: &dyn TextMeasurer) -> ArrangedLegend {
        let style = self.text_style();
        let metrics = measurer.measure("", &style);
        let line_height = metrics.line_height();
        let row_height = SWATCH_SIZE.max(line_height);
        let baseline_dy = (row_height - line_height) * 0.5 + metrics.ascent;
        let horizontal = matches!(self.position.side(), LegendSide::Top | LegendSide::Bottom);

        let mut x = origin.x;
        let mut y = origin.y;
        let title = self.title.as_ref().map(|text| {
            let baseline = Point::new(x, y + baseline_dy);
            let bounds = text_bounds(measurer, text, &style, baseline.x, baseline.y, TextAnchor::Start);
            if horizontal {
                x = bounds.x1 + ITEM_GAP;
            } else {
                y += row_height + ROW_GAP;
            }
            LegendText {
                text: text.clone(),
                baseline,
                bounds,
            }
        });

        let mut items = Vec::with_capacity(self.rows.len());
        for (row, data) in self.rows.iter().enumerate() {
            let swatch = Rect::from_origin_size(
                (x, y + (row_height - SWATCH_SIZE) * 0.5),
                (SWATCH_SIZE, SWATCH_SIZE),
            );
            let text = data.display_text(self.show_measure);
            let baseline = Point::new(swatch.x1 + LABEL_DX, y + baseline_dy);
            let bounds = text_bounds(measurer, &text, &style, baseline.x, baseline.y, TextAnchor::Start);
            if horizontal {
                x = bounds.x1 + ITEM_GAP;
            } else {
                y += row_height + ROW_GAP;
            }
            items.push(LegendItemBox {
                row,
                swatch,
                label: LegendText {
                    text,
                    baseline,
                    bounds,
                },
            });
        }

        ArrangedLegend { title, items }
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let origin = Point::ORIGIN;
        let b = self.arrange(origin, measurer).bounds(origin);
        Size::new(b.x1 - origin.x, b.y1 - origin.y)
    }
}

fn measure_format(info: Option<&MeasureInfo>) -> Option<&str> {
    info.and_then(|m| m.format.as_deref())
}

fn is_percent(info: Option<&MeasureInfo>) -> bool {
    info.is_some_and(MeasureInfo::is_percent)
}

fn scaled_text(
    value: Option<f64>,
    format: Option<&str>,
    decimals: u8,
    units: Option<DisplayUnit>,
) -> String {
    ValueFormatter::new(format)
        .with_precision(decimals)
        .with_unit(scale_unit(value.unwrap_or(0.0), units))
        .format_option(value)
}

fn measure_text(
    point: &DataPoint,
    settings: &LegendSettings,
    format: Option<&str>,
    total: f64,
) -> String {
    let decimals = settings.decimal_places;
    let percent = || {
        let pct = percent_of_total(point.value_or_zero(), total);
        format!("{}%", format_percent(pct, decimals))
    };
    match settings.mode {
        LegendMode::Value => scaled_text(point.value, format, decimals, settings.display_units),
        LegendMode::Percentage => percent(),
        LegendMode::Both => format!(
            "{} {}",
            scaled_text(point.value, format, decimals, settings.display_units),
            percent()
        ),
        LegendMode::None => ValueFormatter::new(format)
            .with_precision(decimals)
            .format_option(point.value),
    }
}

/// Builds legend data, or `None` when the legend is hidden or has no category column.
pub fn build_legend(
    view_model: &ViewModel,
    settings: &LegendSettings,
    primary_indicator: &IndicatorSettings,
    secondary_indicator: &IndicatorSettings,
) -> Option<LegendData> {
    if !settings.show || !view_model.is_legend_available {
        return None;
    }
    let primary = view_model.primary_measure.as_ref();
    let secondary = view_model
        .secondary_measure
        .as_ref()
        .filter(|_| view_model.has_secondary_measure);
    let primary_format = measure_format(primary);
    let secondary_format = measure_format(secondary);

    let rows = view_model
        .data_points
        .iter()
        .map(|point| {
            let secondary = secondary.map(|_| LegendSecondary {
                value: point.secondary_value,
                text: scaled_text(
                    point.secondary_value,
                    secondary_format,
                    settings.decimal_places,
                    settings.display_units,
                ),
                tooltip: ValueFormatter::new(secondary_format).format_option(point.secondary_value),
                indicator: point.secondary_value.and_then(|v| {
                    secondary_indicator.evaluate(
                        v,
                        point.secondary_kpi_value,
                        is_percent(view_model.secondary_measure.as_ref()),
                        IndicatorScope::Row,
                    )
                }),
            });
            LegendRow {
                label: if point.category.is_empty() {
                    String::from(BLANK)
                } else {
                    point.category.clone()
                },
                color: point.color,
                selection_key: point.selection_key.clone(),
                measure: point.value,
                measure_text: measure_text(
                    point,
                    settings,
                    primary_format,
                    view_model.primary_measure_sum,
                ),
                measure_tooltip: ValueFormatter::new(primary_format).format_option(point.value),
                indicator: point.value.and_then(|v| {
                    primary_indicator.evaluate(
                        v,
                        point.primary_kpi_value,
                        is_percent(primary),
                        IndicatorScope::Row,
                    )
                }),
                secondary,
                opacity: 1.0,
            }
        })
        .collect();

    let summary = &view_model.legend_summary;
    let title = settings
        .show_title
        .then(|| settings.title.clone().unwrap_or_else(|| summary.title.clone()));

    Some(LegendData {
        title,
        primary_title: summary.primary_title.clone(),
        secondary_title: summary.secondary_title.clone(),
        rows,
        show_measure: settings.mode != LegendMode::None,
        position: settings.position,
        font_size: settings.font_size,
        label_color: settings.label_color,
        z_index: z_order::LEGEND,
    })
}
