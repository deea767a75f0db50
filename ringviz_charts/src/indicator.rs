// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Up/down threshold indicators.

use peniko::Color;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Indicator direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The value meets or exceeds its threshold.
    Up,
    /// The value is below its threshold.
    Down,
}

/// A derived indicator: direction plus the colour it renders with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdIndicator {
    /// Direction.
    pub direction: Direction,
    /// Glyph colour.
    pub color: Color,
}

impl ThresholdIndicator {
    /// The glyph drawn for this indicator.
    pub fn glyph(&self) -> &'static str {
        match self.direction {
            Direction::Up => "\u{25B2}",
            Direction::Down => "\u{25BC}",
        }
    }
}

/// Which configured threshold applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorScope {
    /// A per-category value (legend rows).
    Row,
    /// A measure total (summary panel).
    Total,
}

/// Indicator settings for one measure.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorSettings {
    /// Whether indicators are drawn at all.
    pub show: bool,
    /// Compare against zero instead of the configured thresholds.
    pub sign_indicator: bool,
    /// Threshold for per-category values.
    pub threshold: Option<f64>,
    /// Threshold for the measure total.
    pub total_threshold: Option<f64>,
    /// Colour of [`Direction::Up`].
    pub up_color: Color,
    /// Colour of [`Direction::Down`].
    pub down_color: Color,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            show: false,
            sign_indicator: false,
            threshold: None,
            total_threshold: None,
            up_color: css::FOREST_GREEN,
            down_color: css::RED,
        }
    }
}

impl IndicatorSettings {
    /// Enables or disables indicators.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Switches to comparing against zero.
    pub fn with_sign_indicator(mut self, sign_indicator: bool) -> Self {
        self.sign_indicator = sign_indicator;
        self
    }

    /// Sets the per-category threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the total threshold.
    pub fn with_total_threshold(mut self, threshold: f64) -> Self {
        self.total_threshold = Some(threshold);
        self
    }

    /// Sets the up/down colours.
    pub fn with_colors(mut self, up: Color, down: Color) -> Self {
        self.up_color = up;
        self.down_color = down;
        self
    }

    /// Resolves the threshold a value is compared against.
    ///
    /// A KPI value wins; otherwise the configured threshold for `scope` applies unless the sign
    /// indicator is on, in which case the threshold is zero. Percent measures divide KPI and
    /// configured thresholds by 100.
    pub fn threshold_for(&self, kpi: Option<f64>, percent: bool, scope: IndicatorScope) -> f64 {
        let configured = match scope {
            IndicatorScope::Row => self.threshold,
            IndicatorScope::Total => self.total_threshold,
        };
        let raw = match kpi {
            Some(kpi) => kpi,
            None if !self.sign_indicator => configured.unwrap_or(0.0),
            None => 0.0,
        };
        if percent { raw / 100.0 } else { raw }
    }

    /// Evaluates the indicator for `value`, or `None` when indicators are off.
    ///
    /// Non-percent values are truncated to integers before the comparison.
    pub fn evaluate(
        &self,
        value: f64,
        kpi: Option<f64>,
        percent: bool,
        scope: IndicatorScope,
    ) -> Option<ThresholdIndicator> {
        if !self.show || !value.is_finite() {
            return None;
        }
        let threshold = self.threshold_for(kpi, percent, scope);
        let compared = if percent { value } else { value.trunc() };
        let direction = if threshold <= compared {
            Direction::Up
        } else {
            Direction::Down
        };
        let color = match direction {
            Direction::Up => self.up_color,
            Direction::Down => self.down_color,
        };
        Some(ThresholdIndicator { direction, color })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> IndicatorSettings {
        IndicatorSettings::default().with_show(true)
    }

    #[test]
    fn hidden_indicators_evaluate_to_none() {
        let s = IndicatorSettings::default();
        assert_eq!(s.evaluate(10.0, None, false, IndicatorScope::Row), None);
    }

    #[test]
    fn kpi_wins_over_configured_threshold() {
        let s = shown().with_threshold(100.0);
        let Some(ind) = s.evaluate(60.0, Some(50.0), false, IndicatorScope::Row) else {
            panic!("expected an indicator");
        };
        assert_eq!(ind.direction, Direction::Up);
        assert_eq!(ind.color, css::FOREST_GREEN);
        assert_eq!(ind.glyph(), "\u{25B2}");
    }

    #[test]
    fn configured_threshold_applies_per_scope() {
        let s = shown().with_threshold(100.0).with_total_threshold(10.0);
        let row = s.evaluate(60.0, None, false, IndicatorScope::Row).unwrap();
        let total = s.evaluate(60.0, None, false, IndicatorScope::Total).unwrap();
        assert_eq!(row.direction, Direction::Down);
        assert_eq!(row.color, css::RED);
        assert_eq!(total.direction, Direction::Up);
    }

    #[test]
    fn sign_indicator_compares_against_zero() {
        let s = shown().with_threshold(100.0).with_sign_indicator(true);
        assert_eq!(
            s.evaluate(5.0, None, false, IndicatorScope::Row).unwrap().direction,
            Direction::Up
        );
        assert_eq!(
            s.evaluate(-5.0, None, false, IndicatorScope::Row)
                .unwrap()
                .direction,
            Direction::Down
        );
    }

    #[test]
    fn non_percent_values_are_truncated() {
        let s = shown().with_threshold(9.5);
        // 9.9 truncates to 9, below 9.5.
        assert_eq!(
            s.evaluate(9.9, None, false, IndicatorScope::Row).unwrap().direction,
            Direction::Down
        );
    }

    #[test]
    fn percent_thresholds_compare_fractions() {
        let s = shown().with_threshold(50.0);
        assert!((s.threshold_for(None, true, IndicatorScope::Row) - 0.5).abs() < 1e-12);
        assert_eq!(
            s.evaluate(0.55, None, true, IndicatorScope::Row).unwrap().direction,
            Direction::Up
        );
        assert_eq!(
            s.evaluate(0.45, None, true, IndicatorScope::Row).unwrap().direction,
            Direction::Down
        );
    }
}
