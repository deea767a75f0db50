// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring chart demos: runs sample tables through [`RingChart`] and writes one SVG per demo.

mod svg;

use kurbo::Rect;
use ringviz_charts::{
    ArcPosition, DetailLabelSettings, DisplayUnit, HeuristicTextMeasurer, IndicatorSettings,
    LabelStyle, LegendMode, LegendPosition, LegendSettings, NegativeArcSettings, RenderError,
    RenderEvents, RingChart, RingChartSettings, Size, SummarySettings,
};
use ringviz_data::{CategoryColumn, CellValue, ColumnRole, DataTable, MeasureColumn};

/// Prints host notifications.
#[derive(Debug)]
struct PrintEvents(&'static str);

impl RenderEvents for PrintEvents {
    fn rendering_started(&mut self) {
        println!("{}: rendering started", self.0);
    }

    fn rendering_finished(&mut self) {
        println!("{}: rendering finished", self.0);
    }

    fn rendering_failed(&mut self, error: &RenderError) {
        println!("{}: rendering failed: {error}", self.0);
    }
}

const VIEWPORT: Size = Size::new(640.0, 420.0);

fn sales_table() -> DataTable {
    let regions = [
        "North",
        "South",
        "East",
        "West",
        "Central",
        "Overseas territories",
        "",
    ];
    let sales = [182_000.0, 95_500.0, -24_000.0, 61_250.0, 140_000.0, 12_000.0, 8_000.0];
    let profit = [21_000.0, 8_400.0, -6_100.0, 5_300.0, 17_800.0, 900.0, 450.0];
    let target = [150_000.0, 100_000.0, 10_000.0, 60_000.0, 150_000.0, 10_000.0, 5_000.0];

    DataTable::new()
        .with_category(CategoryColumn::new(
            "Region",
            regions.iter().map(|r| CellValue::from(*r)).collect(),
        ))
        .with_measure(
            MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                sales.iter().copied().map(Some).collect(),
            )
            .with_format("$#,0"),
        )
        .with_measure(
            MeasureColumn::new(
                "Profit",
                ColumnRole::SecondaryMeasure,
                profit.iter().copied().map(Some).collect(),
            )
            .with_format("#,0.0"),
        )
        .with_measure(MeasureColumn::new(
            "Target",
            ColumnRole::PrimaryKpi,
            target.iter().copied().map(Some).collect(),
        ))
}

fn write_svg(name: &str, chart: &RingChart) {
    let Some(frame) = chart.frame() else {
        println!("{name}: no frame");
        return;
    };
    let view = Rect::new(0.0, 0.0, VIEWPORT.width, VIEWPORT.height);
    let svg = svg::SvgScene::from_frame(frame, view).to_svg_string();
    let path = format!("{name}.svg");
    std::fs::write(&path, svg).expect("write demo svg");
    println!("wrote {path}");
}

fn run(name: &'static str, settings: RingChartSettings, table: &DataTable) -> RingChart {
    let mut chart = RingChart::new(settings);
    let mut events = PrintEvents(name);
    if let Err(error) = chart.update(table, VIEWPORT, &HeuristicTextMeasurer, &mut events) {
        log::warn!("{name}: {error}");
    }
    chart
}

fn main() {
    // `RUST_LOG=ringviz_charts=trace` shows every hidden label.
    env_logger::init();

    let table = sales_table();
    let indicators = IndicatorSettings::default()
        .with_show(true)
        .with_threshold(50_000.0)
        .with_total_threshold(400_000.0);

    let basic = run("ringviz_basic", RingChartSettings::default(), &table);
    write_svg("ringviz_basic", &basic);

    let detailed = RingChartSettings::default()
        .with_detail_labels(DetailLabelSettings::default().with_style(LabelStyle::All))
        .with_legend(
            LegendSettings::default()
                .with_mode(LegendMode::Both)
                .with_position(LegendPosition::RightCenter),
        )
        .with_summary(SummarySettings::default().with_display_units(Some(DisplayUnit::Thousands)))
        .with_indicators(indicators.clone(), indicators.with_sign_indicator(true))
        .with_negative_arcs(NegativeArcSettings::default().with_position(ArcPosition::PopOut));
    let mut chart = run("ringviz_detailed", detailed, &table);
    write_svg("ringviz_detailed", &chart);

    // Click the second slice: every other slice and legend row dims.
    let key = chart
        .frame()
        .and_then(|f| f.as_chart())
        .and_then(|f| f.selection_key(1))
        .cloned();
    if let Some(key) = key {
        chart.select(&key);
        write_svg("ringviz_selected", &chart);
    }

    let empty = DataTable::new().with_category(CategoryColumn::new(
        "Region",
        vec![CellValue::from("North")],
    ));
    let message = run("ringviz_missing_roles", RingChartSettings::default(), &empty);
    write_svg("ringviz_missing_roles", &message);
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn log_filters_select_chart_modules() {
        let logger = env_logger::Builder::new()
            .parse_filters("warn,ringviz_charts::label=trace")
            .build();
        assert!(enabled(&logger, "ringviz_charts::label", Level::Trace));
        assert!(!enabled(&logger, "ringviz_charts::chart", Level::Debug));
        assert!(enabled(&logger, "ringviz_data::aggregate", Level::Warn));
        assert!(!enabled(&logger, "ringviz_data::aggregate", Level::Debug));
    }
}
