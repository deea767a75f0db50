// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for ring chart layout.
//!
//! Ring charts need to measure text to place and clip **labels** (detail labels,
//! legend rows, the centred summary block and the title). Shaping and glyph layout
//! stay downstream, so layout code depends on a tiny text measurement interface.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for tailored strings), and
//! - renderer-agnostic (native shaping engines and web canvas measurement can
//!   both implement the same trait).
//!
//! It also owns [`tailor_text`], the ellipsis truncation used whenever a label has
//! to fit a width budget.

#![no_std]

extern crate alloc;

use alloc::string::String;

/// The ellipsis appended by [`tailor_text`].
pub const ELLIPSIS: &str = "...";

/// A minimal text measurement interface used by label and guide layout.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine, or
/// - backed by web platform text measurement (e.g. HTML canvas).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Convenience for the advance width of `text`.
    fn width(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).advance_width
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Converts a font size in typographic points into pixels (`96 / 72`).
#[must_use]
pub fn points_to_px(points: f64) -> f64 {
    points * 4.0 / 3.0
}

/// Text styling inputs relevant to measurement.
///
/// Ring chart settings only ever vary the size, so that is all a style carries. Font family and
/// weight are left to the host's measurer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (pixels).
    pub font_size: f64,
}

impl TextStyle {
    /// Creates a `TextStyle` with the given pixel `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }

    /// Creates a `TextStyle` from a size in points.
    ///
    /// Settings express font sizes in points; layout works in pixels.
    #[must_use]
    pub fn from_points(points: f64) -> Self {
        Self::new(points_to_px(points))
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A tiny heuristic text measurer suitable for demos, tests and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        }
    }
}

/// Result of [`tailor_text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TailoredText {
    /// The text to display: either the input unchanged, or a prefix followed by [`ELLIPSIS`].
    pub text: String,
    /// Whether an ellipsis was applied.
    pub truncated: bool,
}

impl TailoredText {
    /// Number of characters (not bytes) in the tailored text.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fits `text` into `max_width`, replacing the tail with [`ELLIPSIS`] when it does not fit.
///
/// The longest character prefix whose `prefix + "..."` still fits is kept. When not even one
/// character fits, the result is the bare ellipsis; callers decide whether that is worth showing.
pub fn tailor_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> TailoredText {
    if measurer.width(text, style) <= max_width {
        return TailoredText {
            text: String::from(text),
            truncated: false,
        };
    }

    // Byte offsets of every char boundary after the first char; `cuts[k]` keeps `k + 1` chars.
    let cuts: alloc::vec::Vec<usize> = text
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(core::iter::once(text.len()))
        .collect();

    let fits = |end: usize| {
        let mut candidate = String::with_capacity(end + ELLIPSIS.len());
        candidate.push_str(&text[..end]);
        candidate.push_str(ELLIPSIS);
        measurer.width(&candidate, style) <= max_width
    };

    // Binary search for the number of kept chars; widths grow monotonically with the prefix.
    let (mut lo, mut hi) = (0_usize, cuts.len());
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if fits(cuts[mid - 1]) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let end = if lo == 0 { 0 } else { cuts[lo - 1] };
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&text[..end]);
    out.push_str(ELLIPSIS);
    TailoredText {
        text: out,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_that_fits_is_returned_unchanged() {
        let style = TextStyle::new(10.0);
        let t = tailor_text(&HeuristicTextMeasurer, "Apple", &style, 100.0);
        assert_eq!(t.text, "Apple");
        assert!(!t.truncated);
    }

    #[test]
    fn long_text_keeps_the_longest_prefix_that_fits() {
        // 6px per char at 10px; 60px fits 10 chars, 7 of which are left for the prefix.
        let style = TextStyle::new(10.0);
        let t = tailor_text(&HeuristicTextMeasurer, "Strawberries and cream", &style, 60.0);
        assert_eq!(t.text, "Strawbe...");
        assert!(t.truncated);
        assert_eq!(t.char_count(), 10);
    }

    #[test]
    fn nothing_fits_collapses_to_bare_ellipsis() {
        let style = TextStyle::new(10.0);
        let t = tailor_text(&HeuristicTextMeasurer, "Banana", &style, 5.0);
        assert_eq!(t.text, ELLIPSIS);
        assert!(t.truncated);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let style = TextStyle::new(10.0);
        let t = tailor_text(&HeuristicTextMeasurer, "Crème brûlée", &style, 42.0);
        assert_eq!(t.text, "Crèm...");
    }

    #[test]
    fn points_convert_to_pixels() {
        assert!((points_to_px(9.0) - 12.0).abs() < 1e-12);
        assert!((TextStyle::from_points(12.0).font_size - 16.0).abs() < 1e-12);
        assert_eq!(TextStyle::from_points(9.0), TextStyle::new(12.0));
    }
}
