// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved style settings for a ring chart.

extern crate alloc;

use alloc::string::String;

use crate::indicator::IndicatorSettings;
use crate::label::DetailLabelSettings;
use crate::legend::LegendSettings;
use crate::ring_layout::NegativeArcSettings;
use crate::summary::{SecondarySummarySettings, SummarySettings};
use crate::title::RingTitleSettings;

/// Message shown when every primary value sums to zero.
pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data to be displayed";

/// Hover animation settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Whether slices grow on hover.
    pub show: bool,
}

/// Every settings group of a ring chart, resolved with defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct RingChartSettings {
    /// Ring title.
    pub title: RingTitleSettings,
    /// Detail labels.
    pub detail_labels: DetailLabelSettings,
    /// Primary total in the summary panel.
    pub summary: SummarySettings,
    /// Secondary total in the summary panel.
    pub secondary_summary: SecondarySummarySettings,
    /// Primary measure indicators.
    pub primary_indicator: IndicatorSettings,
    /// Secondary measure indicators.
    pub secondary_indicator: IndicatorSettings,
    /// Legend.
    pub legend: LegendSettings,
    /// Negative value handling.
    pub negative_arcs: NegativeArcSettings,
    /// Hover animation.
    pub animation: AnimationSettings,
    /// Message shown when the primary total is zero.
    pub no_data_message: String,
}

impl Default for RingChartSettings {
    fn default() -> Self {
        Self {
            title: RingTitleSettings::default(),
            detail_labels: DetailLabelSettings::default(),
            summary: SummarySettings::default(),
            secondary_summary: SecondarySummarySettings::default(),
            primary_indicator: IndicatorSettings::default(),
            secondary_indicator: IndicatorSettings::default(),
            legend: LegendSettings::default(),
            negative_arcs: NegativeArcSettings::default(),
            animation: AnimationSettings::default(),
            no_data_message: String::from(DEFAULT_NO_DATA_MESSAGE),
        }
    }
}

impl RingChartSettings {
    /// Sets the title settings.
    pub fn with_title(mut self, title: RingTitleSettings) -> Self {
        self.title = title;
        self
    }

    /// Sets the detail label settings.
    pub fn with_detail_labels(mut self, labels: DetailLabelSettings) -> Self {
        self.detail_labels = labels;
        self
    }

    /// Sets the summary settings.
    pub fn with_summary(mut self, summary: SummarySettings) -> Self {
        self.summary = summary;
        self
    }

    /// Sets the secondary summary settings.
    pub fn with_secondary_summary(mut self, summary: SecondarySummarySettings) -> Self {
        self.secondary_summary = summary;
        self
    }

    /// Sets both indicator groups.
    pub fn with_indicators(mut self, primary: IndicatorSettings, secondary: IndicatorSettings) -> Self {
        self.primary_indicator = primary;
        self.secondary_indicator = secondary;
        self
    }

    /// Sets the legend settings.
    pub fn with_legend(mut self, legend: LegendSettings) -> Self {
        self.legend = legend;
        self
    }

    /// Sets the negative arc settings.
    pub fn with_negative_arcs(mut self, negative: NegativeArcSettings) -> Self {
        self.negative_arcs = negative;
        self
    }

    /// Enables or disables the hover animation.
    pub fn with_animation(mut self, show: bool) -> Self {
        self.animation = AnimationSettings { show };
        self
    }

    /// Sets the no-data message.
    pub fn with_no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = message.into();
        self
    }
}
