// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detail labels: text composition, guide lines, truncation and collision culling.
//!
//! Placement runs in two phases. First every label gets its text, anchor and analytic bounds
//! (from font metrics, no rendering round-trip). Then two culling passes demote visibility:
//! pairwise overlap (`i < j` hides `j`) and vertical clipping against the ring area.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::PI;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use ringviz_data::{DataPoint, ViewModel};
use ringviz_text::{TextMeasurer, TextStyle, tailor_text};

use crate::format::{
    DisplayUnit, ValueFormatter, format_percent, percent_of_total, scale_unit,
};
use crate::ring_layout::{ArcSlice, RingGeometry, polar};
use crate::z_order;

/// Horizontal push of the label anchor beyond the guide circle.
pub const LABEL_OFFSET: f64 = 20.0;
/// Horizontal push of the guide-line bend beyond the guide circle.
pub const GUIDE_BEND_OFFSET: f64 = 14.0;
/// Gap between the first and second label rows, on top of half a line height.
pub const SECOND_ROW_GAP: f64 = 5.0;
/// Baseline shift of both rows, in ems.
pub const BASELINE_SHIFT_EM: f64 = 0.2;
/// Fraction of the half-height labels must stay within.
pub const CLIP_FACTOR: f64 = 0.9;
/// Truncated text shorter than this many characters is suppressed.
pub const MIN_TRUNCATED_CHARS: usize = 4;

/// Decimals used for percentages inside composite label styles.
const COMPOSITE_PERCENT_PRECISION: u8 = 2;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Bounds of a single line of text whose baseline sits at `baseline`.
pub fn text_bounds(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    x: f64,
    baseline: f64,
    anchor: TextAnchor,
) -> Rect {
    let m = measurer.measure(text, style);
    let w = m.advance_width;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + w),
        TextAnchor::Middle => (x - 0.5 * w, x + 0.5 * w),
        TextAnchor::End => (x - w, x),
    };
    Rect::new(x0, baseline - m.ascent, x1, baseline + m.descent)
}

/// Inclusive AABB overlap: touching edges count as overlapping.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(b.x0 > a.x1 || b.x1 < a.x0 || b.y0 > a.y1 || b.y1 < a.y0)
}

/// What a detail label says.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    /// The formatted value.
    Data,
    /// The category.
    #[default]
    Category,
    /// Percent of total at the configured precision.
    PercentOfTotal,
    /// `"{category} {percent}%"`.
    CategoryPercent,
    /// `"{value} ({percent}%)"`.
    DataPercent,
    /// `"{category} {value}"`.
    Both,
    /// `"{category} {value} ({percent}%)"`.
    All,
}

impl LabelStyle {
    /// Parses a host setting; unknown names select [`LabelStyle::All`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Data" => Self::Data,
            "Category" => Self::Category,
            "Percent of total" => Self::PercentOfTotal,
            "Category, percent of total" => Self::CategoryPercent,
            "Data value, percent of total" => Self::DataPercent,
            "Both" => Self::Both,
            _ => Self::All,
        }
    }

    /// Whether labels of this style carry a second row.
    pub fn has_second_row(self) -> bool {
        !matches!(self, Self::Data | Self::Category | Self::PercentOfTotal)
    }
}

/// Detail label settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailLabelSettings {
    /// Whether labels are drawn.
    pub show: bool,
    /// Text colour.
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Display unit; `None` picks one per label from its own value.
    pub display_units: Option<DisplayUnit>,
    /// Decimals of the value text (and of `PercentOfTotal`).
    pub precision: u8,
    /// Text policy.
    pub style: LabelStyle,
}

impl Default for DetailLabelSettings {
    fn default() -> Self {
        Self {
            show: true,
            color: Color::from_rgb8(0x80, 0x80, 0x80),
            font_size: 9.0,
            display_units: None,
            precision: 0,
            style: LabelStyle::Category,
        }
    }
}

impl DetailLabelSettings {
    /// Shows or hides labels.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Sets the text policy.
    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the value precision, clamped to `[0, 4]`.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.min(crate::format::MAX_PRECISION);
        self
    }

    /// Sets the display unit (`None` for auto).
    pub fn with_display_units(mut self, units: Option<DisplayUnit>) -> Self {
        self.display_units = units;
        self
    }

    /// Text style used to measure labels.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::from_points(self.font_size)
    }
}

/// The pieces a label is composed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelParts {
    /// Category text.
    pub category: String,
    /// Formatted value.
    pub value: String,
    /// Percent of total at the label precision (`PercentOfTotal` only).
    pub percent: String,
    /// Percent of total with two decimals (composite styles).
    pub percent2: String,
}

/// Composes the first row and, for two-row styles, the second row.
pub fn compose(style: LabelStyle, parts: &LabelParts) -> (String, Option<String>) {
    let LabelParts {
        category,
        value,
        percent,
        percent2,
    } = parts;
    match style {
        LabelStyle::Data => (value.clone(), None),
        LabelStyle::Category => (category.clone(), None),
        LabelStyle::PercentOfTotal => (format!("{percent}%"), None),
        LabelStyle::CategoryPercent => (
            format!("{category} {percent2}%"),
            Some(format!("{percent2}%")),
        ),
        LabelStyle::DataPercent => (
            format!("{value} ({percent2}%)"),
            Some(format!("({percent2}%)")),
        ),
        LabelStyle::Both => (format!("{category} {value}"), Some(value.clone())),
        LabelStyle::All => (
            format!("{category} {value} ({percent2}%)"),
            Some(format!("{value} ({percent2}%)")),
        ),
    }
}

/// The second row of a two-row label.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondRow {
    /// Text anchor position (before the baseline shift).
    pub anchor: Point,
    /// Possibly truncated text.
    pub text: String,
    /// Text bounds.
    pub bounds: Rect,
    /// Visibility.
    pub visible: bool,
}

/// Placement of one detail label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Index of the owning slice.
    pub index: usize,
    /// Text anchor position (before the baseline shift).
    pub anchor: Point,
    /// Horizontal anchoring: `Start` on the right half, `End` on the left.
    pub text_anchor: TextAnchor,
    /// Text to draw; empty when suppressed.
    pub text: String,
    /// Whether the first row is not showing its full composed text.
    pub truncated: bool,
    /// Untruncated text for a hover title.
    pub full_text: String,
    /// Bounds of the first row.
    pub bounds: Rect,
    /// Visibility of the first row and its guide line.
    pub visible: bool,
    /// Guide polyline: inside the slice, on the guide circle, at the bend.
    pub guide_line: [Point; 3],
    /// Second row, for two-row styles.
    pub second_row: Option<SecondRow>,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text colour.
    pub color: Color,
    /// Baseline shift in pixels, applied to both rows.
    pub baseline_shift: f64,
    /// Rendering order of the text rows; guide lines use [`crate::GUIDE_LINES`].
    pub z_index: i32,
}

impl LabelPlacement {
    fn hide(&mut self) {
        self.visible = false;
        if let Some(second) = &mut self.second_row {
            second.visible = false;
        }
    }

    fn visible_second(&self) -> Option<Rect> {
        self.second_row
            .as_ref()
            .filter(|s| s.visible)
            .map(|s| s.bounds)
    }

    fn has_content(&self) -> bool {
        !self.text.is_empty()
    }
}

struct RowFitter<'a> {
    measurer: &'a dyn TextMeasurer,
    style: &'a TextStyle,
    half_width: f64,
}

impl RowFitter<'_> {
    /// Fits `text` anchored at `x` (relative to the centre) inside the half-width on its side.
    ///
    /// Returns the text to draw and whether it differs from the input.
    fn fit(&self, text: &str, x: f64, right: bool) -> (String, bool) {
        let w = self.measurer.width(text, self.style);
        let overflow = if right {
            x + w > self.half_width
        } else {
            x - w < -self.half_width
        };
        if !overflow {
            return (String::from(text), false);
        }
        let tailored = tailor_text(self.measurer, text, self.style, self.half_width - x.abs());
        if tailored.char_count() < MIN_TRUNCATED_CHARS {
            return (String::new(), true);
        }
        (tailored.text, tailored.truncated)
    }
}

fn label_formatter(
    format: Option<&str>,
    value: f64,
    settings: &DetailLabelSettings,
) -> ValueFormatter {
    ValueFormatter::new(format)
        .with_precision(settings.precision)
        .with_unit(scale_unit(value, settings.display_units))
}

fn parts_for(
    point: &DataPoint,
    format: Option<&str>,
    sum: f64,
    settings: &DetailLabelSettings,
) -> (LabelParts, String) {
    let value = point.value_or_zero();
    let formatter = label_formatter(format, value, settings);
    let pct = percent_of_total(value, sum);
    let parts = LabelParts {
        category: point.category.clone(),
        value: formatter.format_option(point.value),
        percent: format_percent(pct, settings.precision),
        percent2: format_percent(pct, COMPOSITE_PERCENT_PRECISION),
    };
    let title_parts = LabelParts {
        value: ValueFormatter::new(format)
            .with_precision(0)
            .format_option(point.value),
        percent: format_percent(pct, COMPOSITE_PERCENT_PRECISION),
        ..parts.clone()
    };
    let (full_text, _) = compose(settings.style, &title_parts);
    (parts, full_text)
}

/// Places one label per slice, then culls overlapping and clipped labels.
///
/// `ring_area` is the rectangle the ring was fitted into; its half-width bounds label text and
/// its half-height (× [`CLIP_FACTOR`]) bounds label rows vertically.
pub fn place_labels(
    view_model: &ViewModel,
    slices: &[ArcSlice],
    geometry: &RingGeometry,
    ring_area: Rect,
    settings: &DetailLabelSettings,
    measurer: &dyn TextMeasurer,
) -> Vec<LabelPlacement> {
    if !settings.show {
        return Vec::new();
    }
    let style = settings.text_style();
    let fitter = RowFitter {
        measurer,
        style: &style,
        half_width: 0.5 * ring_area.width(),
    };
    let format = view_model
        .primary_measure
        .as_ref()
        .and_then(|m| m.format.as_deref());
    let sum = view_model.primary_measure_sum;
    let center = geometry.center;
    let shift = BASELINE_SHIFT_EM * style.font_size;
    let mean_radius = 0.5 * (geometry.inner_radius + geometry.outer_radius);

    let mut labels: Vec<LabelPlacement> = Vec::with_capacity(slices.len());
    for slice in slices {
        let Some(point) = view_model.data_points.get(slice.index) else {
            continue;
        };
        let (parts, full_text) = parts_for(point, format, sum, settings);
        let (first_text, second_text) = compose(settings.style, &parts);

        let mid = slice.mid_angle();
        let right = mid < PI;
        let side = if right { 1.0 } else { -1.0 };
        let text_anchor = if right {
            TextAnchor::Start
        } else {
            TextAnchor::End
        };
        let on_guide = polar(mid, geometry.guide_radius);
        let x = (on_guide.x.abs() + LABEL_OFFSET) * side;
        let y = on_guide.y;

        let (mut text, truncated) = fitter.fit(&first_text, x, right);
        if truncated && settings.style.has_second_row() {
            let fallback = match settings.style {
                LabelStyle::DataPercent => parts.value.clone(),
                _ => parts.category.clone(),
            };
            text = fitter.fit(&fallback, x, right).0;
        }

        let line_height = measurer.measure(&parts.category, &style).line_height();
        let anchor = center + Vec2::new(x, y);
        let bounds = text_bounds(measurer, &text, &style, anchor.x, anchor.y + shift, text_anchor);

        let second_row = second_text.map(|second| {
            let y2 = y + 0.5 * line_height + SECOND_ROW_GAP;
            let (text2, _) = fitter.fit(&second, x, right);
            let anchor2 = center + Vec2::new(x, y2);
            SecondRow {
                bounds: text_bounds(measurer, &text2, &style, anchor2.x, anchor2.y + shift, text_anchor),
                anchor: anchor2,
                visible: truncated && !text.is_empty() && !text2.is_empty(),
                text: text2,
            }
        });

        let inside = polar(mid, mean_radius);
        let between = 0.5 * (inside + on_guide);
        let near = 0.5 * (between + on_guide);
        let bend = Vec2::new((on_guide.x.abs() + GUIDE_BEND_OFFSET) * side, on_guide.y);

        labels.push(LabelPlacement {
            index: slice.index,
            anchor,
            text_anchor,
            visible: !text.is_empty(),
            text,
            truncated,
            full_text,
            bounds,
            guide_line: [center + near, center + on_guide, center + bend],
            second_row,
            font_size: style.font_size,
            color: settings.color,
            baseline_shift: shift,
            z_index: z_order::DETAIL_LABELS,
        });
    }

    cull_overlaps(&mut labels);
    cull_clipped(&mut labels, center, 0.5 * ring_area.height() * CLIP_FACTOR);

    log::debug!(
        "place_labels: {} of {} labels visible",
        labels.iter().filter(|l| l.visible).count(),
        labels.len()
    );
    labels
}

/// Hides `j` whenever it overlaps an earlier visible label `i`, row against row.
///
/// A label that is already hidden blocks nothing.
fn cull_overlaps(labels: &mut [LabelPlacement]) {
    for i in 0..labels.len() {
        if !labels[i].visible || !labels[i].has_content() {
            continue;
        }
        let first_i = labels[i].bounds;
        let second_i = labels[i].visible_second();
        for j in (i + 1)..labels.len() {
            if !labels[j].has_content() {
                continue;
            }
            let first_j = labels[j].bounds;
            let second_j = labels[j].visible_second();
            let hit = overlaps(first_i, first_j)
                || second_i.is_some_and(|s| overlaps(s, first_j))
                || second_j.is_some_and(|s| overlaps(first_i, s))
                || second_i.zip(second_j).is_some_and(|(a, b)| overlaps(a, b));
            if hit {
                log::trace!("label {j} hidden: overlaps label {i}");
                labels[j].hide();
            }
        }
    }
}

/// Hides labels whose first row, or visible second row, leaves `±limit` around the centre.
fn cull_clipped(labels: &mut [LabelPlacement], center: Point, limit: f64) {
    let reach = |r: Rect| (r.y0 - center.y).abs().max((r.y1 - center.y).abs());
    for label in labels.iter_mut() {
        let first = reach(label.bounds) > limit;
        let second = label.visible_second().is_some_and(|r| reach(r) > limit);
        if label.visible && (first || second) {
            log::trace!("label {} hidden: clipped vertically", label.index);
            label.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use ringviz_data::{
        CategoryColumn, CellValue, ColorPalette, ColumnRole, DataTable, MeasureColumn, aggregate,
    };
    use ringviz_text::HeuristicTextMeasurer;

    use super::*;
    use crate::ring_layout::{NegativeArcSettings, layout_slices};

    fn parts() -> LabelParts {
        LabelParts {
            category: "Apple".into(),
            value: "50".into(),
            percent: "125".into(),
            percent2: "125.00".into(),
        }
    }

    fn place(
        rows: &[(&str, f64)],
        area: Rect,
        settings: &DetailLabelSettings,
    ) -> Vec<LabelPlacement> {
        let table = DataTable::new()
            .with_category(CategoryColumn::new(
                "Fruit",
                rows.iter().map(|(c, _)| CellValue::from(*c)).collect(),
            ))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                rows.iter().map(|(_, v)| Some(*v)).collect(),
            ));
        let vm = aggregate(&table, &mut ColorPalette::default()).unwrap();
        let geometry = RingGeometry::new(area, settings.show);
        let slices = layout_slices(&vm, &geometry, &NegativeArcSettings::default(), false);
        place_labels(&vm, &slices, &geometry, area, settings, &HeuristicTextMeasurer)
    }

    #[test]
    fn text_policy_per_style() {
        let p = parts();
        assert_eq!(compose(LabelStyle::Data, &p), ("50".into(), None));
        assert_eq!(compose(LabelStyle::Category, &p), ("Apple".into(), None));
        assert_eq!(compose(LabelStyle::PercentOfTotal, &p), ("125%".into(), None));
        assert_eq!(
            compose(LabelStyle::CategoryPercent, &p),
            ("Apple 125.00%".into(), Some("125.00%".into()))
        );
        assert_eq!(
            compose(LabelStyle::DataPercent, &p),
            ("50 (125.00%)".into(), Some("(125.00%)".into()))
        );
        assert_eq!(
            compose(LabelStyle::Both, &p),
            ("Apple 50".into(), Some("50".into()))
        );
        assert_eq!(
            compose(LabelStyle::All, &p),
            ("Apple 50 (125.00%)".into(), Some("50 (125.00%)".into()))
        );
    }

    #[test]
    fn style_names_parse_with_all_as_fallback() {
        assert_eq!(
            LabelStyle::from_name("Category, percent of total"),
            LabelStyle::CategoryPercent
        );
        assert_eq!(LabelStyle::from_name("Percent of total"), LabelStyle::PercentOfTotal);
        assert_eq!(LabelStyle::from_name("anything else"), LabelStyle::All);
        assert!(!LabelStyle::Category.has_second_row());
        assert!(LabelStyle::Both.has_second_row());
    }

    #[test]
    fn labels_anchor_by_half() {
        let labels = place(
            &[("Apple", 50.0), ("Berry", 50.0)],
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &DetailLabelSettings::default(),
        );
        assert_eq!(labels.len(), 2);
        // radius 150, guide circle at 123; the anchor is pushed 20 px further out.
        assert_eq!(labels[0].text_anchor, TextAnchor::Start);
        assert!((labels[0].anchor.x - (200.0 + 143.0)).abs() < 1e-9);
        assert!((labels[0].anchor.y - 150.0).abs() < 1e-9);
        assert_eq!(labels[1].text_anchor, TextAnchor::End);
        assert!((labels[1].anchor.x - (200.0 - 143.0)).abs() < 1e-9);
        assert!(labels.iter().all(|l| l.visible));
        assert_eq!(labels[0].text, "Apple");
        assert_eq!(labels[0].full_text, "Apple");

        let [near, on_guide, bend] = labels[0].guide_line;
        assert!((on_guide.x - 323.0).abs() < 1e-9);
        assert!((bend.x - 337.0).abs() < 1e-9);
        assert!(near.x < on_guide.x);
    }

    #[test]
    fn long_text_is_truncated_against_the_half_width() {
        let labels = place(
            &[("Strawberries", 50.0), ("Berry", 50.0)],
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &DetailLabelSettings::default(),
        );
        // 57 px budget at 7.2 px per char keeps 4 chars plus the ellipsis.
        assert_eq!(labels[0].text, "Stra...");
        assert!(labels[0].truncated);
        assert!(labels[0].visible);
        assert_eq!(labels[0].full_text, "Strawberries");
    }

    #[test]
    fn too_short_truncations_are_suppressed() {
        let labels = place(
            &[("Strawberries", 50.0), ("Berry", 50.0)],
            Rect::new(0.0, 0.0, 300.0, 300.0),
            &DetailLabelSettings::default(),
        );
        assert_eq!(labels[0].text, "");
        assert!(!labels[0].visible);
        // Nothing shorter than four characters is left visible.
        for l in &labels {
            if l.visible && l.truncated {
                assert!(l.text.chars().count() >= MIN_TRUNCATED_CHARS);
            }
        }
    }

    #[test]
    fn truncated_two_row_labels_fall_back_and_show_the_second_row() {
        let settings = DetailLabelSettings::default().with_style(LabelStyle::All);
        // 250 px half-width: the composed first row overflows, the second row fits.
        let labels = place(
            &[("Apple", 50.0), ("Berry", 50.0)],
            Rect::new(0.0, 0.0, 500.0, 300.0),
            &settings,
        );
        let first = &labels[0];
        assert!(first.truncated);
        assert_eq!(first.text, "Apple");
        let Some(second) = &first.second_row else {
            panic!("expected a second row");
        };
        assert!(second.visible);
        assert_eq!(second.text, "50 (50.00%)");
        assert!((second.anchor.y - (first.anchor.y + 0.5 * 12.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn fitting_two_row_labels_hide_the_second_row() {
        let settings = DetailLabelSettings::default().with_style(LabelStyle::Both);
        let labels = place(
            &[("A", 50.0), ("B", 50.0)],
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &settings,
        );
        assert_eq!(labels[0].text, "A 50");
        assert!(!labels[0].truncated);
        let Some(second) = &labels[0].second_row else {
            panic!("expected a second row");
        };
        assert!(!second.visible);
    }

    #[test]
    fn later_overlapping_label_is_hidden() {
        let labels = place(
            &[("Apple", 1.0), ("Berry", 1.0), ("Cherry", 100.0)],
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &DetailLabelSettings::default(),
        );
        assert!(overlaps(labels[0].bounds, labels[1].bounds));
        assert!(labels[0].visible);
        assert!(!labels[1].visible);
        assert!(labels[2].visible);
    }

    #[test]
    fn labels_leaving_the_half_height_are_clipped() {
        let area = Rect::new(0.0, 0.0, 400.0, 100.0);
        let single = place(&[("Apple", 10.0)], area, &DetailLabelSettings::default());
        assert!(!single[0].visible);

        let pair = place(
            &[("Apple", 10.0), ("Berry", 10.0)],
            area,
            &DetailLabelSettings::default(),
        );
        assert!(pair.iter().all(|l| l.visible));
    }

    fn placed(index: usize, bounds: Rect, second: Option<(Rect, bool)>) -> LabelPlacement {
        LabelPlacement {
            index,
            anchor: Point::new(bounds.x0, bounds.y1),
            text_anchor: TextAnchor::Start,
            text: "Label".into(),
            truncated: second.is_some_and(|(_, visible)| visible),
            full_text: "Label 50".into(),
            bounds,
            visible: true,
            guide_line: [Point::ORIGIN; 3],
            second_row: second.map(|(bounds, visible)| SecondRow {
                anchor: Point::new(bounds.x0, bounds.y1),
                text: "50".into(),
                bounds,
                visible,
            }),
            font_size: 12.0,
            color: Color::BLACK,
            baseline_shift: 0.0,
            z_index: z_order::DETAIL_LABELS,
        }
    }

    fn visibility(labels: &[LabelPlacement]) -> Vec<bool> {
        labels.iter().map(|l| l.visible).collect()
    }

    #[test]
    fn hidden_labels_do_not_hide_later_ones() {
        // 0 overlaps 1 and 1 overlaps 2, but 0 and 2 are apart.
        let mut labels = [
            placed(0, Rect::new(0.0, 0.0, 50.0, 12.0), None),
            placed(1, Rect::new(0.0, 10.0, 50.0, 22.0), None),
            placed(2, Rect::new(0.0, 20.0, 50.0, 32.0), None),
        ];
        cull_overlaps(&mut labels);
        assert_eq!(visibility(&labels), [true, false, true]);
    }

    #[test]
    fn visible_second_row_hides_a_later_first_row() {
        let mut labels = [
            placed(
                0,
                Rect::new(0.0, 0.0, 50.0, 12.0),
                Some((Rect::new(0.0, 20.0, 50.0, 32.0), true)),
            ),
            placed(
                1,
                Rect::new(0.0, 26.0, 50.0, 38.0),
                Some((Rect::new(0.0, 44.0, 50.0, 56.0), true)),
            ),
        ];
        assert!(!overlaps(labels[0].bounds, labels[1].bounds));
        cull_overlaps(&mut labels);
        assert_eq!(visibility(&labels), [true, false]);
        // Hiding a label hides its second row too.
        assert!(!labels[1].second_row.as_ref().unwrap().visible);
    }

    #[test]
    fn hidden_second_row_blocks_nothing() {
        let mut labels = [
            placed(
                0,
                Rect::new(0.0, 0.0, 50.0, 12.0),
                Some((Rect::new(0.0, 20.0, 50.0, 32.0), false)),
            ),
            placed(1, Rect::new(0.0, 26.0, 50.0, 38.0), None),
        ];
        cull_overlaps(&mut labels);
        assert_eq!(visibility(&labels), [true, true]);
    }

    #[test]
    fn second_row_alone_can_clip_a_label() {
        let first = Rect::new(0.0, -6.0, 50.0, 6.0);
        let second = Rect::new(0.0, 20.0, 50.0, 35.0);
        let mut shown = [placed(0, first, Some((second, true)))];
        cull_clipped(&mut shown, Point::ORIGIN, 30.0);
        assert!(!shown[0].visible);

        // The same row stays out of the check while it is hidden.
        let mut folded = [placed(0, first, Some((second, false)))];
        cull_clipped(&mut folded, Point::ORIGIN, 30.0);
        assert!(folded[0].visible);
    }

    #[test]
    fn hidden_settings_place_nothing() {
        let labels = place(
            &[("Apple", 1.0)],
            Rect::new(0.0, 0.0, 400.0, 300.0),
            &DetailLabelSettings::default().with_show(false),
        );
        assert!(labels.is_empty());
    }
}
