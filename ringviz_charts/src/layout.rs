// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small measure/arrange layout for the ring chart.
//!
//! - **Measure**: the title reports its height, the legend its desired size.
//! - **Arrange**: [`RingChartLayout::arrange`] splits the viewport into title, legend and ring
//!   rectangles based on the legend position.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Side of the viewport a legend sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendSide {
    /// Above the ring.
    Top,
    /// Below the ring.
    Bottom,
    /// Left of the ring.
    Left,
    /// Right of the ring.
    Right,
}

/// Legend position, matching the host's legend orientation names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPosition {
    /// Top, left-aligned.
    #[default]
    Top,
    /// Top, centred.
    TopCenter,
    /// Bottom, left-aligned.
    Bottom,
    /// Bottom, centred.
    BottomCenter,
    /// Left, top-aligned.
    Left,
    /// Left, centred.
    LeftCenter,
    /// Right, top-aligned.
    Right,
    /// Right, centred.
    RightCenter,
}

impl LegendPosition {
    /// Parses a host position name; unknown names fall back to [`LegendPosition::Top`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "TopCenter" => Self::TopCenter,
            "Bottom" => Self::Bottom,
            "BottomCenter" => Self::BottomCenter,
            "Left" => Self::Left,
            "LeftCenter" => Self::LeftCenter,
            "Right" => Self::Right,
            "RightCenter" => Self::RightCenter,
            _ => Self::Top,
        }
    }

    /// The side this position occupies.
    pub fn side(self) -> LegendSide {
        match self {
            Self::Top | Self::TopCenter => LegendSide::Top,
            Self::Bottom | Self::BottomCenter => LegendSide::Bottom,
            Self::Left | Self::LeftCenter => LegendSide::Left,
            Self::Right | Self::RightCenter => LegendSide::Right,
        }
    }

    /// Whether the legend is centred along its side.
    pub fn is_centered(self) -> bool {
        matches!(
            self,
            Self::TopCenter | Self::BottomCenter | Self::LeftCenter | Self::RightCenter
        )
    }
}

/// Layout inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingChartLayoutSpec {
    /// Outer viewport size.
    pub viewport: Size,
    /// Height reserved for the title (zero when hidden).
    pub title_height: f64,
    /// Desired legend size and position, when a legend is shown.
    pub legend: Option<(Size, LegendPosition)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Title strip along the top, if any.
    pub title: Option<Rect>,
    /// Legend rectangle, if any.
    pub legend: Option<Rect>,
    /// Area left for the ring and its labels.
    pub ring: Rect,
}

impl RingChartLayout {
    /// Computes a layout from the provided specification.
    ///
    /// Legends never claim more than the space left under the title; the ring area may collapse
    /// to zero size but never inverts.
    pub fn arrange(spec: &RingChartLayoutSpec) -> Self {
        let w = spec.viewport.width.max(0.0);
        let h = spec.viewport.height.max(0.0);
        let view = Rect::new(0.0, 0.0, w, h);

        let title_h = spec.title_height.max(0.0).min(h);
        let title = (title_h > 0.0).then(|| Rect::new(0.0, 0.0, w, title_h));
        let body = Rect::new(0.0, title_h, w, h);

        let Some((size, position)) = spec.legend else {
            return Self {
                view,
                title,
                legend: None,
                ring: body,
            };
        };

        let lw = size.width.max(0.0).min(body.width());
        let lh = size.height.max(0.0).min(body.height());
        let centered = position.is_centered();
        let along_x = if centered { (w - lw) * 0.5 } else { 0.0 };
        let along_y = if centered {
            body.y0 + (body.height() - lh) * 0.5
        } else {
            body.y0
        };

        let (legend, ring) = match position.side() {
            LegendSide::Top => (
                Rect::new(along_x, body.y0, along_x + lw, body.y0 + lh),
                Rect::new(0.0, body.y0 + lh, w, h),
            ),
            LegendSide::Bottom => (
                Rect::new(along_x, h - lh, along_x + lw, h),
                Rect::new(0.0, body.y0, w, h - lh),
            ),
            LegendSide::Left => (
                Rect::new(0.0, along_y, lw, along_y + lh),
                Rect::new(lw, body.y0, w, h),
            ),
            LegendSide::Right => (
                Rect::new(w - lw, along_y, w, along_y + lh),
                Rect::new(0.0, body.y0, w - lw, h),
            ),
        };

        Self {
            view,
            title,
            legend: Some(legend),
            ring,
        }
    }
}
