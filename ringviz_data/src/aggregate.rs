// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregation of a role-tagged [`DataTable`] into the chart [`ViewModel`].

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashSet;
use peniko::Color;
use smallvec::SmallVec;

use crate::palette::ColorPalette;
use crate::table::{CellValue, ColumnRole, DataTable, TableError};

/// Palette key used for rows whose category is null or missing.
pub const NULL_CATEGORY_KEY: &str = "Null";

/// Identity of a category row, used for selection and highlighting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    /// Row index in the input table.
    pub row: usize,
    /// Category text of the row (empty for null categories).
    pub category: Arc<str>,
}

/// One `(name, raw value, format)` triple shown in a slice tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipEntry {
    /// Column display name.
    pub name: String,
    /// Raw cell value.
    pub value: CellValue,
    /// Display-format string of the column, if any.
    pub format: Option<String>,
}

/// Tooltip entries of one data point; one per column, usually only a handful.
pub type TooltipEntries = SmallVec<[TooltipEntry; 4]>;

/// A single category row after aggregation.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Category text; empty for a null category.
    pub category: String,
    /// Primary measure value (absolute in the magnitude variant).
    pub value: Option<f64>,
    /// Secondary measure value (absolute in the magnitude variant).
    pub secondary_value: Option<f64>,
    /// Primary KPI value of the row.
    pub primary_kpi_value: Option<f64>,
    /// Secondary KPI value of the row.
    pub secondary_kpi_value: Option<f64>,
    /// Display name of the primary measure column.
    pub primary_name: String,
    /// Display name of the secondary measure column (empty when absent).
    pub secondary_name: String,
    /// Fill colour.
    pub color: Color,
    /// Ordered tooltip entries: category columns first, then measure columns.
    pub tooltip_entries: TooltipEntries,
    /// Row identity.
    pub selection_key: SelectionKey,
    /// Whether the row is currently selected.
    pub selected: bool,
}

impl DataPoint {
    /// Primary value with nulls read as zero.
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Display name and format string of a measure column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasureInfo {
    /// Column display name.
    pub display_name: String,
    /// Display-format string, if the host supplied one.
    pub format: Option<String>,
}

impl MeasureInfo {
    /// Returns `true` when the format string is a percent format.
    pub fn is_percent(&self) -> bool {
        self.format.as_deref().is_some_and(|f| f.contains('%'))
    }
}

/// Titles handed to the legend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegendSummary {
    /// Legend title; the category column display name.
    pub title: String,
    /// Primary measure display name.
    pub primary_title: String,
    /// Secondary measure display name, when a secondary measure exists.
    pub secondary_title: Option<String>,
}

/// Running sums folded over the measure columns of every row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    /// Signed sum of the primary measure.
    pub primary_sum: f64,
    /// Sum of absolute primary values.
    pub primary_magnitude_sum: f64,
    /// Signed sum of the secondary measure.
    pub secondary_sum: f64,
    /// Sum of absolute secondary values.
    pub secondary_magnitude_sum: f64,
    /// Sum of primary KPI values.
    pub primary_kpi_sum: f64,
    /// Sum of secondary KPI values.
    pub secondary_kpi_sum: f64,
    /// Set once a secondary measure value has been folded.
    pub secondary_present: bool,
}

impl Accumulator {
    /// Folds one cell of a measure column with the given role. Nulls count as zero.
    pub fn fold(&mut self, role: ColumnRole, value: Option<f64>) {
        let v = value.unwrap_or(0.0);
        match role {
            ColumnRole::PrimaryMeasure => {
                self.primary_sum += v;
                self.primary_magnitude_sum += v.abs();
            }
            ColumnRole::SecondaryMeasure => {
                self.secondary_sum += v;
                self.secondary_magnitude_sum += v.abs();
                self.secondary_present = true;
            }
            ColumnRole::PrimaryKpi => self.primary_kpi_sum += v,
            ColumnRole::SecondaryKpi => self.secondary_kpi_sum += v,
            ColumnRole::Category => {}
        }
    }
}

/// The aggregated chart input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewModel {
    /// Data points carrying signed values, in input order.
    pub data_points: Vec<DataPoint>,
    /// The same data points with absolute values; sizes the slices.
    pub magnitude_points: Vec<DataPoint>,
    /// Signed sum of the primary measure.
    pub primary_measure_sum: f64,
    /// Sum of absolute primary values.
    pub primary_magnitude_sum: f64,
    /// Signed sum of the secondary measure.
    pub secondary_measure_sum: f64,
    /// Sum of absolute secondary values.
    pub secondary_magnitude_sum: f64,
    /// Primary KPI total, when a primary KPI column exists.
    pub primary_kpi_sum: Option<f64>,
    /// Secondary KPI total, when a secondary KPI column exists.
    pub secondary_kpi_sum: Option<f64>,
    /// Declared (or observed) maximum of the primary measure.
    pub data_max: Option<f64>,
    /// A column carries the category role.
    pub is_legend_available: bool,
    /// A column carries the primary measure role.
    pub is_primary_measure_available: bool,
    /// A secondary measure was folded for at least one row.
    pub has_secondary_measure: bool,
    /// Primary measure column info.
    pub primary_measure: Option<MeasureInfo>,
    /// Secondary measure column info.
    pub secondary_measure: Option<MeasureInfo>,
    /// Legend titles.
    pub legend_summary: LegendSummary,
}

impl ViewModel {
    /// Returns `true` when both required roles are bound.
    pub fn has_required_roles(&self) -> bool {
        self.is_legend_available && self.is_primary_measure_available
    }
}

/// Builds the [`ViewModel`] for `table`, drawing colours from `palette`.
///
/// Rows run over `0..table.row_count()`; cells past the end of a shorter column read as null.
/// Palette colours of categories missing from `table` are forgotten.
pub fn aggregate(table: &DataTable, palette: &mut ColorPalette) -> Result<ViewModel, TableError> {
    table.validate()?;
    if table.is_ragged() {
        log::warn!("aggregate: columns have different lengths; short columns read as null");
    }

    let category = table.category_column();
    let primary = table.measure(ColumnRole::PrimaryMeasure);
    let secondary = table.measure(ColumnRole::SecondaryMeasure);
    let primary_kpi = table.measure(ColumnRole::PrimaryKpi);
    let secondary_kpi = table.measure(ColumnRole::SecondaryKpi);

    let primary_name = primary.map(|m| m.display_name.clone()).unwrap_or_default();
    let secondary_name = secondary
        .map(|m| m.display_name.clone())
        .unwrap_or_default();

    let rows = table.row_count();
    let mut acc = Accumulator::default();
    let mut data_points = Vec::with_capacity(rows);
    let mut magnitude_points = Vec::with_capacity(rows);
    let mut observed_max: Option<f64> = None;
    let mut live_keys: HashSet<String> = HashSet::new();

    for row in 0..rows {
        let raw_category = category
            .and_then(|c| c.values.get(row))
            .cloned()
            .unwrap_or(CellValue::Null);
        let category_text = raw_category.to_text();
        let palette_key = if raw_category.is_null() {
            NULL_CATEGORY_KEY
        } else {
            category_text.as_str()
        };
        let color = palette.color(palette_key);
        live_keys.insert(String::from(palette_key));

        let mut tooltip_entries = TooltipEntries::new();
        for column in &table.categories {
            tooltip_entries.push(TooltipEntry {
                name: column.display_name.clone(),
                value: column.values.get(row).cloned().unwrap_or(CellValue::Null),
                format: None,
            });
        }
        for column in &table.measures {
            let value = column.value(row);
            tooltip_entries.push(TooltipEntry {
                name: column.display_name.clone(),
                value: value.into(),
                format: column.format.clone(),
            });
            if let Some(role) = column.role {
                acc.fold(role, value);
            }
        }

        let value = primary.and_then(|m| m.value(row));
        if let Some(v) = value {
            observed_max = Some(observed_max.map_or(v, |m| m.max(v)));
        }
        let signed = DataPoint {
            category: category_text.clone(),
            value,
            secondary_value: secondary.and_then(|m| m.value(row)),
            primary_kpi_value: primary_kpi.and_then(|m| m.value(row)),
            secondary_kpi_value: secondary_kpi.and_then(|m| m.value(row)),
            primary_name: primary_name.clone(),
            secondary_name: secondary_name.clone(),
            color,
            tooltip_entries,
            selection_key: SelectionKey {
                row,
                category: category_text.as_str().into(),
            },
            selected: false,
        };
        let magnitude = DataPoint {
            value: signed.value.map(f64::abs),
            secondary_value: signed.secondary_value.map(f64::abs),
            ..signed.clone()
        };
        data_points.push(signed);
        magnitude_points.push(magnitude);
    }

    palette.retain(|key| live_keys.contains(key));

    if rows > 0 && primary.is_some() && acc.primary_magnitude_sum == 0.0 {
        log::warn!("aggregate: primary measure sums to zero over {rows} rows");
    }
    log::debug!(
        "aggregate: {rows} rows, primary sum {}, secondary sum {}",
        acc.primary_sum,
        acc.secondary_sum
    );

    Ok(ViewModel {
        data_points,
        magnitude_points,
        primary_measure_sum: acc.primary_sum,
        primary_magnitude_sum: acc.primary_magnitude_sum,
        secondary_measure_sum: acc.secondary_sum,
        secondary_magnitude_sum: acc.secondary_magnitude_sum,
        primary_kpi_sum: primary_kpi.map(|_| acc.primary_kpi_sum),
        secondary_kpi_sum: secondary_kpi.map(|_| acc.secondary_kpi_sum),
        data_max: primary.and_then(|m| m.max).or(observed_max),
        is_legend_available: category.is_some(),
        is_primary_measure_available: primary.is_some(),
        has_secondary_measure: acc.secondary_present,
        primary_measure: primary.map(|m| MeasureInfo {
            display_name: m.display_name.clone(),
            format: m.format.clone(),
        }),
        secondary_measure: secondary.map(|m| MeasureInfo {
            display_name: m.display_name.clone(),
            format: m.format.clone(),
        }),
        legend_summary: LegendSummary {
            title: category.map(|c| c.display_name.clone()).unwrap_or_default(),
            primary_title: primary_name,
            secondary_title: secondary.map(|m| m.display_name.clone()),
        },
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::palette::DEFAULT_COLORS;
    use crate::table::{CategoryColumn, MeasureColumn};

    fn fruit_table() -> DataTable {
        DataTable::new()
            .with_category(CategoryColumn::new(
                "Fruit",
                vec!["Apple".into(), "Banana".into(), "Cherry".into()],
            ))
            .with_measure(
                MeasureColumn::new(
                    "Sales",
                    ColumnRole::PrimaryMeasure,
                    vec![Some(50.0), Some(-30.0), Some(20.0)],
                )
                .with_format("#,0.00"),
            )
    }

    #[test]
    fn sums_match_signed_and_magnitude_variants() {
        let mut palette = ColorPalette::default();
        let vm = aggregate(&fruit_table(), &mut palette).unwrap();
        assert_eq!(vm.data_points.len(), 3);
        assert!((vm.primary_measure_sum - 40.0).abs() < 1e-12);
        assert!((vm.primary_magnitude_sum - 100.0).abs() < 1e-12);

        let signed: f64 = vm.data_points.iter().map(DataPoint::value_or_zero).sum();
        let magnitude: f64 = vm.magnitude_points.iter().map(DataPoint::value_or_zero).sum();
        assert!((signed - vm.primary_measure_sum).abs() < 1e-12);
        assert!((magnitude - vm.primary_magnitude_sum).abs() < 1e-12);
        assert_eq!(vm.magnitude_points[1].value, Some(30.0));
        assert_eq!(vm.data_points[1].value, Some(-30.0));
        assert!(vm.has_required_roles());
        assert!(!vm.has_secondary_measure);
        assert_eq!(vm.data_max, Some(50.0));
    }

    #[test]
    fn tooltips_list_categories_before_measures() {
        let mut palette = ColorPalette::default();
        let vm = aggregate(&fruit_table(), &mut palette).unwrap();
        let entries = &vm.data_points[0].tooltip_entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Fruit");
        assert_eq!(entries[0].value, CellValue::Text("Apple".into()));
        assert_eq!(entries[0].format, None);
        assert_eq!(entries[1].name, "Sales");
        assert_eq!(entries[1].value, CellValue::Number(50.0));
        assert_eq!(entries[1].format.as_deref(), Some("#,0.00"));
    }

    #[test]
    fn missing_roles_are_flagged_not_fatal() {
        let table = DataTable::new().with_category(CategoryColumn::new(
            "Fruit",
            vec!["Apple".into()],
        ));
        let vm = aggregate(&table, &mut ColorPalette::default()).unwrap();
        assert!(vm.is_legend_available);
        assert!(!vm.is_primary_measure_available);
        assert!(!vm.has_required_roles());
        assert_eq!(vm.primary_measure_sum, 0.0);
    }

    #[test]
    fn null_categories_share_the_null_palette_key() {
        let table = DataTable::new()
            .with_category(CategoryColumn::new(
                "Fruit",
                vec![CellValue::Null, "Apple".into(), CellValue::Null],
            ))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                vec![Some(1.0), None, Some(2.0)],
            ));
        let mut palette = ColorPalette::default();
        let vm = aggregate(&table, &mut palette).unwrap();
        assert_eq!(vm.data_points[0].category, "");
        assert_eq!(vm.data_points[0].color, DEFAULT_COLORS[0]);
        assert_eq!(vm.data_points[2].color, DEFAULT_COLORS[0]);
        assert_eq!(vm.data_points[1].value, None);
        assert!((vm.primary_measure_sum - 3.0).abs() < 1e-12);
        assert_eq!(palette.color(NULL_CATEGORY_KEY), DEFAULT_COLORS[0]);
    }

    #[test]
    fn departed_categories_release_their_colours() {
        let mut palette = ColorPalette::default();
        aggregate(&fruit_table(), &mut palette).unwrap();
        assert_eq!(palette.assigned_len(), 3);

        let fewer = DataTable::new()
            .with_category(CategoryColumn::new("Fruit", vec!["Banana".into()]))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                vec![Some(5.0)],
            ));
        let vm = aggregate(&fewer, &mut palette).unwrap();
        assert_eq!(palette.assigned_len(), 1);
        assert_eq!(vm.data_points[0].color, DEFAULT_COLORS[1]);
    }

    #[test]
    fn secondary_and_kpi_columns_fold_into_their_sums() {
        let table = fruit_table()
            .with_measure(MeasureColumn::new(
                "Profit",
                ColumnRole::SecondaryMeasure,
                vec![Some(5.0), Some(-7.0), Some(1.0)],
            ))
            .with_measure(MeasureColumn::new(
                "Target",
                ColumnRole::PrimaryKpi,
                vec![Some(40.0), Some(10.0), None],
            ));
        let vm = aggregate(&table, &mut ColorPalette::default()).unwrap();
        assert!(vm.has_secondary_measure);
        assert!((vm.secondary_measure_sum + 1.0).abs() < 1e-12);
        assert!((vm.secondary_magnitude_sum - 13.0).abs() < 1e-12);
        assert_eq!(vm.primary_kpi_sum, Some(50.0));
        assert_eq!(vm.secondary_kpi_sum, None);
        assert_eq!(vm.data_points[1].secondary_name, "Profit");
        assert_eq!(vm.magnitude_points[1].secondary_value, Some(7.0));
        assert_eq!(vm.legend_summary.secondary_title.as_deref(), Some("Profit"));
        assert_eq!(vm.data_points[0].tooltip_entries.len(), 4);
    }

    #[test]
    fn declared_max_wins_over_observed_max() {
        let table = DataTable::new()
            .with_category(CategoryColumn::new("Fruit", vec!["Apple".into()]))
            .with_measure(
                MeasureColumn::new("Sales", ColumnRole::PrimaryMeasure, vec![Some(3.0)])
                    .with_max(100.0),
            );
        let vm = aggregate(&table, &mut ColorPalette::default()).unwrap();
        assert_eq!(vm.data_max, Some(100.0));
    }

    #[test]
    fn ragged_columns_read_missing_cells_as_null() {
        let table = DataTable::new()
            .with_category(CategoryColumn::new("Fruit", vec!["Apple".into()]))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                vec![Some(3.0), Some(4.0)],
            ));
        let vm = aggregate(&table, &mut ColorPalette::default()).unwrap();
        assert_eq!(vm.data_points.len(), 2);
        assert_eq!(vm.data_points[1].category, "");
        assert_eq!(vm.data_points[1].selection_key.row, 1);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let table = DataTable::new().with_measure(MeasureColumn::new(
            "Sales",
            ColumnRole::PrimaryMeasure,
            vec![Some(f64::INFINITY)],
        ));
        assert!(matches!(
            aggregate(&table, &mut ColorPalette::default()),
            Err(TableError::NonFiniteValue { row: 0, .. })
        ));
    }
}
