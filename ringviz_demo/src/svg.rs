// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a ring chart [`Frame`].

use std::fmt::Write as _;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use ringviz_charts::{
    ArcSlice, Frame, GUIDE_LINES, HeuristicTextMeasurer, LabelPlacement, LegendData, RingFrame,
    SliceFill, SummaryBlock, SummaryPanel, TOOLTIP_MARKER, TextAnchor, TextStyle, TitleBlock,
};

/// Flattening tolerance for slice outlines.
const TOLERANCE: f64 = 0.1;

/// SVG elements collected with their z-order; sorted by `(z, insertion order)` on output.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    defs: Vec<String>,
    elements: Vec<(i32, String)>,
    view_box: Rect,
}

impl SvgScene {
    pub(crate) fn from_frame(frame: &Frame, viewport: Rect) -> Self {
        let mut scene = Self {
            view_box: viewport,
            ..Self::default()
        };
        match frame {
            Frame::Message(text) => {
                let c = viewport.center();
                let grey = Color::from_rgb8(0x66, 0x66, 0x66);
                scene.text(0, c, 16.0, TextAnchor::Middle, grey, text);
            }
            Frame::Chart(chart) => scene.push_chart(chart),
        }
        scene
    }

    fn push_chart(&mut self, chart: &RingFrame) {
        if let (Some(title), Some(rect)) = (&chart.title, chart.layout.title) {
            self.push_title(title, rect);
        }
        for slice in &chart.slices {
            self.push_slice(chart, slice);
        }
        for label in chart.labels.iter().filter(|l| l.visible) {
            self.push_label(label);
        }
        if let (Some(legend), Some(rect)) = (&chart.legend, chart.layout.legend) {
            self.push_legend(legend, rect);
        }
        if let Some(summary) = chart.summary.as_ref().filter(|s| s.visible) {
            self.push_summary(summary);
        }
    }

    fn push_title(&mut self, title: &TitleBlock, rect: Rect) {
        self.elements.push((
            title.z_index,
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height(),
                hex(title.background)
            ),
        ));
        let mut text = title.text.clone();
        if title.tooltip.is_some() {
            text.push_str(TOOLTIP_MARKER);
        }
        let px = TextStyle::from_points(title.font_size).font_size;
        let baseline = Point::new(rect.center().x, rect.y0 + title.padding + 0.8 * px);
        self.text(title.z_index, baseline, px, TextAnchor::Middle, title.color, &text);
    }

    fn push_slice(&mut self, chart: &RingFrame, slice: &ArcSlice) {
        let path = slice.path(chart.geometry.center, TOLERANCE);
        let fill = match slice.fill {
            SliceFill::Solid(color) => hex(color),
            SliceFill::Hatch(hatch) => {
                let id = format!("hatch-{}", slice.index);
                self.defs.push(format!(
                    r#"<pattern id="{id}" width="{}" height="{}" patternUnits="userSpaceOnUse"><line x1="0" y1="0" x2="{}" y2="0" stroke="{}" stroke-width="{}"/></pattern>"#,
                    hatch.tile_width,
                    hatch.tile_height,
                    hatch.tile_width,
                    hex(hatch.color),
                    hatch.stroke_width
                ));
                format!("url(#{id})")
            }
        };
        let mut el = format!(r#"<path d="{}" fill="{fill}""#, path.to_svg());
        if slice.negative {
            let _ = write!(el, r#" stroke="{}""#, hex(slice.color));
        }
        if slice.opacity < 1.0 {
            let _ = write!(el, r#" fill-opacity="{}""#, slice.opacity);
        }
        el.push_str("/>");
        self.elements.push((slice.z_index, el));
    }

    fn push_label(&mut self, label: &LabelPlacement) {
        let points = label
            .guide_line
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push((
            GUIDE_LINES,
            format!(
                r#"<polyline points="{points}" fill="none" stroke="{}"/>"#,
                hex(label.color)
            ),
        ));
        let shift = label.baseline_shift;
        self.text(
            label.z_index,
            label.anchor + Vec2::new(0.0, shift),
            label.font_size,
            label.text_anchor,
            label.color,
            &label.text,
        );
        if let Some(second) = label.second_row.as_ref().filter(|s| s.visible) {
            self.text(
                label.z_index,
                second.anchor + Vec2::new(0.0, shift),
                label.font_size,
                label.text_anchor,
                label.color,
                &second.text,
            );
        }
    }

    fn push_legend(&mut self, legend: &LegendData, rect: Rect) {
        let arranged = legend.arrange(rect.origin(), &HeuristicTextMeasurer);
        let px = legend.text_style().font_size;
        if let Some(title) = &arranged.title {
            self.text(
                legend.z_index,
                title.baseline,
                px,
                TextAnchor::Start,
                legend.label_color,
                &title.text,
            );
        }
        for item in &arranged.items {
            let row = &legend.rows[item.row];
            let mut swatch = format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                item.swatch.x0,
                item.swatch.y0,
                item.swatch.width(),
                item.swatch.height(),
                hex(row.color)
            );
            if row.opacity < 1.0 {
                let _ = write!(swatch, r#" fill-opacity="{}""#, row.opacity);
            }
            swatch.push_str("/>");
            self.elements.push((legend.z_index, swatch));
            self.text(
                legend.z_index,
                item.label.baseline,
                px,
                TextAnchor::Start,
                legend.label_color,
                &item.label.text,
            );
        }
    }

    fn push_summary(&mut self, summary: &SummaryPanel) {
        let blocks = std::iter::once(&summary.total).chain(summary.secondary.as_ref());
        let lines: Vec<(&SummaryBlock, String)> = blocks
            .flat_map(|block| {
                let caption = block
                    .caption
                    .visible
                    .then(|| (block, block.caption.text.clone()));
                let value = block.value.visible.then(|| {
                    let mut text = block.value.text.clone();
                    let indicator = block.value.indicator;
                    if let Some(ind) = indicator.filter(|_| block.value.indicator_visible) {
                        text.push(' ');
                        text.push_str(ind.glyph());
                    }
                    (block, text)
                });
                caption.into_iter().chain(value)
            })
            .collect();

        let heights: Vec<f64> = lines
            .iter()
            .map(|(b, _)| TextStyle::from_points(b.font_size).font_size)
            .collect();
        let total: f64 = heights.iter().sum();
        let center = summary.bounds.center();
        let mut y = center.y - 0.5 * total;
        for ((block, text), h) in lines.iter().zip(&heights) {
            y += h;
            self.text(
                summary.z_index,
                Point::new(center.x, y - 0.2 * h),
                *h,
                TextAnchor::Middle,
                block.color,
                text,
            );
        }
    }

    fn text(&mut self, z: i32, at: Point, px: f64, anchor: TextAnchor, color: Color, text: &str) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.elements.push((
            z,
            format!(
                r#"<text x="{}" y="{}" font-size="{px}" text-anchor="{anchor}" fill="{}">{}</text>"#,
                at.x,
                at.y,
                hex(color),
                escape_xml(text)
            ),
        ));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let vb = self.view_box;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            vb.width(),
            vb.height()
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for def in &self.defs {
                out.push_str(def);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }

        let mut order: Vec<usize> = (0..self.elements.len()).collect();
        order.sort_by_key(|&i| (self.elements[i].0, i));
        for i in order {
            out.push_str(&self.elements[i].1);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
