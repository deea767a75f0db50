// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring slice layout.
//!
//! Slices partition a full turn in input order, each sized by the magnitude of its value.
//! Angles follow the usual donut convention: `0` at 12 o'clock, increasing clockwise. Slices with
//! a negative signed value can be pushed out or pulled in radially and drawn with a hatch pattern.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{BezPath, Circle, Point, Rect, Shape, Vec2};
use peniko::Color;
use ringviz_data::ViewModel;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::z_order;

/// Radius factor applied to every slice while hovered, when animation is enabled.
pub const HOVER_FACTOR: f64 = 1.10;

/// Outer/inner radius multipliers when detail labels are hidden.
pub const RADII_WITHOUT_LABELS: (f64, f64) = (0.85, 0.55);
/// Outer/inner radius multipliers when detail labels are shown.
pub const RADII_WITH_LABELS: (f64, f64) = (0.75, 0.45);
/// Radius multiplier of the invisible guide circle labels attach to.
pub const GUIDE_FACTOR: f64 = 0.82;

/// Radial placement policy for slices with a negative value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArcPosition {
    /// Same radii as every other slice.
    #[default]
    Normal,
    /// Pushed outward.
    PopOut,
    /// Pulled inward.
    DropIn,
}

impl ArcPosition {
    /// Radius factor applied to both radii of a negative slice.
    pub fn factor(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::PopOut => 1.05,
            Self::DropIn => 0.93,
        }
    }

    /// Parses a host setting; unknown names are [`ArcPosition::Normal`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "popOut" | "PopOut" => Self::PopOut,
            "dropIn" | "DropIn" => Self::DropIn,
            _ => Self::Normal,
        }
    }
}

/// Settings for slices whose signed value is negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NegativeArcSettings {
    /// Radial policy.
    pub position: ArcPosition,
    /// Draw negative slices with a hatch pattern instead of a flat colour.
    pub pattern_fill: bool,
}

impl Default for NegativeArcSettings {
    fn default() -> Self {
        Self {
            position: ArcPosition::Normal,
            pattern_fill: true,
        }
    }
}

impl NegativeArcSettings {
    /// Sets the radial policy.
    pub fn with_position(mut self, position: ArcPosition) -> Self {
        self.position = position;
        self
    }

    /// Enables or disables the hatch fill.
    pub fn with_pattern_fill(mut self, pattern_fill: bool) -> Self {
        self.pattern_fill = pattern_fill;
        self
    }
}

/// A hatch pattern: a horizontal stroke repeated on a user-space tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HatchPattern {
    /// Tile width.
    pub tile_width: f64,
    /// Tile height.
    pub tile_height: f64,
    /// Width of the stroke along the top edge of each tile.
    pub stroke_width: f64,
    /// Stroke colour.
    pub color: Color,
}

impl HatchPattern {
    /// The 10×5 tile with a 5 px stroke in `color`.
    pub fn new(color: Color) -> Self {
        Self {
            tile_width: 10.0,
            tile_height: 5.0,
            stroke_width: 5.0,
            color,
        }
    }
}

/// How a slice is filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SliceFill {
    /// Flat colour.
    Solid(Color),
    /// Hatch pattern.
    Hatch(HatchPattern),
}

/// Centre and radii of the ring inside its area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    /// Ring centre.
    pub center: Point,
    /// Base radius: half the shorter side of the ring area.
    pub radius: f64,
    /// Outer radius of un-scaled slices.
    pub outer_radius: f64,
    /// Inner radius of un-scaled slices.
    pub inner_radius: f64,
    /// Radius of the label guide circle.
    pub guide_radius: f64,
}

impl RingGeometry {
    /// Fits the ring into `area`, leaving room for labels when they are shown.
    pub fn new(area: Rect, show_labels: bool) -> Self {
        let radius = (0.5 * area.width().min(area.height())).max(0.0);
        let (outer, inner) = if show_labels {
            RADII_WITH_LABELS
        } else {
            RADII_WITHOUT_LABELS
        };
        Self {
            center: area.center(),
            radius,
            outer_radius: radius * outer,
            inner_radius: radius * inner,
            guide_radius: radius * GUIDE_FACTOR,
        }
    }
}

/// Offset from the ring centre at `angle` (donut convention) and distance `r`.
pub fn polar(angle: f64, r: f64) -> Vec2 {
    Vec2::new(angle.sin() * r, -angle.cos() * r)
}

/// One ring slice.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSlice {
    /// Index of the owning data point.
    pub index: usize,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Resting inner radius (policy factor applied).
    pub inner_radius: f64,
    /// Resting outer radius (policy factor applied).
    pub outer_radius: f64,
    /// Radii while hovered, when animation is enabled.
    pub hover_radii: Option<(f64, f64)>,
    /// Fill directive.
    pub fill: SliceFill,
    /// Series colour of the data point.
    pub color: Color,
    /// Whether the signed value is negative.
    pub negative: bool,
    /// Opacity derived from the selection state.
    pub opacity: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl ArcSlice {
    /// Angular width.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway through the slice.
    pub fn mid_angle(&self) -> f64 {
        0.5 * (self.start_angle + self.end_angle)
    }

    /// Centroid offset from the ring centre: mid angle at the mean radius.
    pub fn centroid(&self) -> Vec2 {
        polar(self.mid_angle(), 0.5 * (self.inner_radius + self.outer_radius))
    }

    /// The slice outline at its resting radii.
    pub fn path(&self, center: Point, tolerance: f64) -> BezPath {
        sector_path(
            center,
            self.inner_radius,
            self.outer_radius,
            self.start_angle,
            self.sweep(),
            tolerance,
        )
    }

    /// The slice outline while hovered, when animation is enabled.
    pub fn hover_path(&self, center: Point, tolerance: f64) -> Option<BezPath> {
        self.hover_radii.map(|(inner, outer)| {
            sector_path(center, inner, outer, self.start_angle, self.sweep(), tolerance)
        })
    }
}

fn sector_path(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    sweep: f64,
    tolerance: f64,
) -> BezPath {
    // kurbo measures angles from the +x axis; the ring starts at 12 o'clock.
    let circle = Circle::new(center, outer_radius);
    let segment = circle.segment(inner_radius, start_angle - FRAC_PI_2, sweep);
    segment.path_elements(tolerance).collect()
}

/// Lays out one slice per data point of `view_model`.
///
/// Widths come from the magnitude variant; sign-dependent styling comes from the signed one. When
/// every magnitude is zero the turn is split evenly.
pub fn layout_slices(
    view_model: &ViewModel,
    geometry: &RingGeometry,
    negative: &NegativeArcSettings,
    animation: bool,
) -> Vec<ArcSlice> {
    let magnitudes: Vec<f64> = view_model
        .magnitude_points
        .iter()
        .map(|p| p.value.unwrap_or(0.0).abs())
        .collect();
    let total: f64 = magnitudes.iter().sum();
    let n = magnitudes.len();
    if n > 0 && total == 0.0 {
        log::warn!("layout_slices: all magnitudes are zero, splitting the ring evenly");
    }

    let mut slices = Vec::with_capacity(n);
    let mut angle = 0.0;
    for (index, magnitude) in magnitudes.iter().enumerate() {
        let sweep = if total > 0.0 {
            magnitude / total * TAU
        } else {
            TAU / n as f64
        };
        // The last slice closes the turn exactly.
        let end_angle = if index + 1 == n { TAU } else { angle + sweep };

        let signed = &view_model.data_points[index];
        let is_negative = signed.value.is_some_and(|v| v < 0.0);
        let factor = if is_negative {
            negative.position.factor()
        } else {
            1.0
        };
        let fill = if is_negative && negative.pattern_fill {
            SliceFill::Hatch(HatchPattern::new(signed.color))
        } else {
            SliceFill::Solid(signed.color)
        };

        slices.push(ArcSlice {
            index,
            start_angle: angle,
            end_angle,
            inner_radius: geometry.inner_radius * factor,
            outer_radius: geometry.outer_radius * factor,
            hover_radii: animation.then(|| {
                (
                    geometry.inner_radius * HOVER_FACTOR,
                    geometry.outer_radius * HOVER_FACTOR,
                )
            }),
            fill,
            color: signed.color,
            negative: is_negative,
            opacity: 1.0,
            z_index: z_order::RING_SLICES,
        });
        angle = end_angle;
    }
    slices
}

#[cfg(test)]
mod tests {
    extern crate std;

    use ringviz_data::{
        CategoryColumn, ColorPalette, ColumnRole, DataTable, MeasureColumn, aggregate,
    };

    use super::*;

    fn view_model(values: &[Option<f64>]) -> ViewModel {
        let categories = (0..values.len())
            .map(|i| ringviz_data::CellValue::Text(alloc::format!("c{i}")))
            .collect();
        let table = DataTable::new()
            .with_category(CategoryColumn::new("Cat", categories))
            .with_measure(MeasureColumn::new(
                "Val",
                ColumnRole::PrimaryMeasure,
                values.to_vec(),
            ));
        aggregate(&table, &mut ColorPalette::default()).unwrap()
    }

    fn geometry() -> RingGeometry {
        RingGeometry::new(Rect::new(0.0, 0.0, 200.0, 100.0), false)
    }

    #[test]
    fn geometry_uses_the_shorter_side() {
        let g = geometry();
        assert_eq!(g.center, Point::new(100.0, 50.0));
        assert!((g.radius - 50.0).abs() < 1e-12);
        assert!((g.outer_radius - 42.5).abs() < 1e-12);
        assert!((g.inner_radius - 27.5).abs() < 1e-12);
        assert!((g.guide_radius - 41.0).abs() < 1e-12);

        let labelled = RingGeometry::new(Rect::new(0.0, 0.0, 200.0, 100.0), true);
        assert!((labelled.outer_radius - 37.5).abs() < 1e-12);
        assert!((labelled.inner_radius - 22.5).abs() < 1e-12);
    }

    #[test]
    fn sweeps_cover_a_full_turn_in_input_order() {
        let vm = view_model(&[Some(50.0), Some(-30.0), Some(20.0)]);
        let slices = layout_slices(&vm, &geometry(), &NegativeArcSettings::default(), false);
        assert_eq!(slices.len(), 3);
        let total: f64 = slices.iter().map(ArcSlice::sweep).sum();
        assert!((total - TAU).abs() < 1e-9);
        assert!((slices[0].sweep() - 0.5 * TAU).abs() < 1e-9);
        assert!((slices[1].sweep() - 0.3 * TAU).abs() < 1e-9);
        for (i, s) in slices.iter().enumerate() {
            assert_eq!(s.index, i);
        }
        assert_eq!(slices[1].start_angle, slices[0].end_angle);
    }

    #[test]
    fn negative_factors_scale_both_radii() {
        let vm = view_model(&[Some(50.0), Some(-30.0)]);
        let g = geometry();
        for (position, factor) in [
            (ArcPosition::Normal, 1.0),
            (ArcPosition::PopOut, 1.05),
            (ArcPosition::DropIn, 0.93),
        ] {
            let settings = NegativeArcSettings {
                position,
                pattern_fill: false,
            };
            let slices = layout_slices(&vm, &g, &settings, false);
            assert!((slices[1].outer_radius - g.outer_radius * factor).abs() < 1e-12);
            assert!((slices[1].inner_radius - g.inner_radius * factor).abs() < 1e-12);
            assert!((slices[0].outer_radius - g.outer_radius).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_rows_keep_their_index_and_zero_width() {
        let vm = view_model(&[Some(10.0), Some(0.0), None, Some(10.0)]);
        let slices = layout_slices(&vm, &geometry(), &NegativeArcSettings::default(), false);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[1].sweep(), 0.0);
        assert_eq!(slices[2].sweep(), 0.0);
        assert_eq!(slices[2].index, 2);
    }

    #[test]
    fn all_zero_magnitudes_split_evenly() {
        let vm = view_model(&[Some(0.0), Some(0.0)]);
        let slices = layout_slices(&vm, &geometry(), &NegativeArcSettings::default(), false);
        assert!((slices[0].sweep() - 0.5 * TAU).abs() < 1e-12);
        assert!((slices[1].end_angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn pattern_fill_and_hover_radii() {
        let vm = view_model(&[Some(5.0), Some(-5.0)]);
        let g = geometry();
        let slices = layout_slices(&vm, &g, &NegativeArcSettings::default(), true);
        assert!(matches!(slices[0].fill, SliceFill::Solid(_)));
        let SliceFill::Hatch(hatch) = slices[1].fill else {
            panic!("expected a hatch fill");
        };
        assert_eq!(hatch.color, slices[1].color);
        assert_eq!((hatch.tile_width, hatch.tile_height), (10.0, 5.0));
        let Some((inner, outer)) = slices[1].hover_radii else {
            panic!("expected hover radii");
        };
        assert!((outer - g.outer_radius * HOVER_FACTOR).abs() < 1e-12);
        assert!((inner - g.inner_radius * HOVER_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn centroid_and_path_follow_the_clockwise_convention() {
        let vm = view_model(&[Some(1.0), Some(1.0)]);
        let g = geometry();
        let slices = layout_slices(&vm, &g, &NegativeArcSettings::default(), false);
        // First half of the turn lies right of centre.
        let c = slices[0].centroid();
        assert!(c.x > 0.0);
        assert!(c.y.abs() < 1e-9);

        let bounds = slices[0].path(g.center, 0.1).bounding_box();
        assert!(bounds.x0 >= g.center.x - 1e-6);
        assert!(bounds.x1 <= g.center.x + g.outer_radius + 1e-6);
        assert!(slices[0].hover_path(g.center, 0.1).is_none());
    }
}
