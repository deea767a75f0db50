// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ring title.
//!
//! The title reserves a strip at the top of the viewport (see [`crate::RingChartLayout`]). Its
//! text is ellipsized to the viewport width minus a fixed margin.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;
use ringviz_data::ViewModel;
use ringviz_text::{TextMeasurer, TextStyle, tailor_text};

use crate::z_order;

/// Horizontal room kept free beside the title text.
pub const TITLE_MARGIN: f64 = 70.0;
/// Marker appended to titles that carry a tooltip.
pub const TOOLTIP_MARKER: &str = " (?)";
/// Default tooltip text.
pub const DEFAULT_TITLE_TOOLTIP: &str = "Your tooltip text goes here";

/// Ring title settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RingTitleSettings {
    /// Whether the title is shown.
    pub show: bool,
    /// Title text; `None` derives `"{primary} by {category}"`.
    pub text: Option<String>,
    /// Text colour.
    pub color: Color,
    /// Background colour of the title strip.
    pub background: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Hover text; blank disables the marker.
    pub tooltip: String,
    /// Padding above and below the text.
    pub padding: f64,
}

impl Default for RingTitleSettings {
    fn default() -> Self {
        Self {
            show: true,
            text: None,
            color: Color::from_rgb8(0x33, 0x33, 0x33),
            background: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            font_size: 12.0,
            tooltip: String::from(DEFAULT_TITLE_TOOLTIP),
            padding: 6.0,
        }
    }
}

impl RingTitleSettings {
    /// Shows or hides the title.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Sets the title text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the tooltip text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets text and background colours.
    pub fn with_colors(mut self, color: Color, background: Color) -> Self {
        self.color = color;
        self.background = background;
        self
    }
}

/// A resolved, measured title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    /// Text to draw, possibly ellipsized.
    pub text: String,
    /// Untruncated text.
    pub full_text: String,
    /// Whether `text` was ellipsized.
    pub truncated: bool,
    /// Tooltip text, when non-blank; draw [`TOOLTIP_MARKER`] after the text.
    pub tooltip: Option<String>,
    /// Height reserved in layout.
    pub height: f64,
    /// Text colour.
    pub color: Color,
    /// Background colour.
    pub background: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Padding above the text.
    pub padding: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Resolves the title for `view_model`, or `None` when it is hidden.
pub fn build_title(
    settings: &RingTitleSettings,
    view_model: &ViewModel,
    viewport_width: f64,
    measurer: &dyn TextMeasurer,
) -> Option<TitleBlock> {
    if !settings.show {
        return None;
    }
    let full_text = settings.text.clone().unwrap_or_else(|| {
        let summary = &view_model.legend_summary;
        format!("{} by {}", summary.primary_title, summary.title)
    });
    let style = TextStyle::from_points(settings.font_size);
    let tailored = tailor_text(
        measurer,
        &full_text,
        &style,
        (viewport_width - TITLE_MARGIN).max(0.0),
    );
    let pad = settings.padding.max(0.0);
    let height = 2.0 * pad + measurer.measure(&full_text, &style).line_height();
    let tooltip = (!settings.tooltip.trim().is_empty()).then(|| settings.tooltip.clone());

    Some(TitleBlock {
        text: tailored.text,
        full_text,
        truncated: tailored.truncated,
        tooltip,
        height,
        color: settings.color,
        background: settings.background,
        font_size: settings.font_size,
        padding: pad,
        z_index: z_order::TITLES,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use ringviz_data::{
        CategoryColumn, CellValue, ColorPalette, ColumnRole, DataTable, MeasureColumn, aggregate,
    };
    use ringviz_text::HeuristicTextMeasurer;

    use super::*;

    fn view_model() -> ViewModel {
        let table = DataTable::new()
            .with_category(CategoryColumn::new("Fruit", [CellValue::from("Apple")].into()))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                [Some(1.0)].into(),
            ));
        aggregate(&table, &mut ColorPalette::default()).unwrap()
    }

    #[test]
    fn default_text_names_both_roles() {
        let title =
            build_title(&RingTitleSettings::default(), &view_model(), 400.0, &HeuristicTextMeasurer)
                .unwrap();
        assert_eq!(title.text, "Sales by Fruit");
        assert!(!title.truncated);
        assert_eq!(title.tooltip.as_deref(), Some(DEFAULT_TITLE_TOOLTIP));
        // 12pt is 16px; padding 6 above and below.
        assert!((title.height - 28.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_viewports_ellipsize() {
        // 100 - 70 leaves 30px: three 9.6px glyphs, i.e. the bare ellipsis.
        let title =
            build_title(&RingTitleSettings::default(), &view_model(), 100.0, &HeuristicTextMeasurer)
                .unwrap();
        assert!(title.truncated);
        assert_eq!(title.text, "...");
        assert_eq!(title.full_text, "Sales by Fruit");
    }

    #[test]
    fn blank_tooltip_drops_the_marker() {
        let settings = RingTitleSettings::default()
            .with_text("Revenue")
            .with_tooltip("  ");
        let title = build_title(&settings, &view_model(), 400.0, &HeuristicTextMeasurer).unwrap();
        assert_eq!(title.text, "Revenue");
        assert_eq!(title.tooltip, None);
    }

    #[test]
    fn hidden_title_reserves_nothing() {
        let settings = RingTitleSettings::default().with_show(false);
        assert_eq!(
            build_title(&settings, &view_model(), 400.0, &HeuristicTextMeasurer),
            None
        );
    }
}
