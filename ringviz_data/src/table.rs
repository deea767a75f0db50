// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned, role-tagged table representation handed over by the host data layer.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use thiserror::Error;

/// Errors returned when validating a [`DataTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A measure cell holds `NaN` or an infinity.
    #[error("measure column `{column}` has a non-finite value at row {row}")]
    NonFiniteValue {
        /// Display name of the offending column.
        column: String,
        /// Row index of the offending cell.
        row: usize,
    },
    /// More than one column carries the same role.
    #[error("role {role:?} is assigned to more than one column")]
    DuplicateRole {
        /// The role that was assigned twice.
        role: ColumnRole,
    },
}

/// The role a column plays in the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Category (legend) column; one slice per row.
    Category,
    /// Measure that sizes the slices.
    PrimaryMeasure,
    /// Optional measure shown in the legend and the summary panel.
    SecondaryMeasure,
    /// Per-row target for the primary measure.
    PrimaryKpi,
    /// Per-row target for the secondary measure.
    SecondaryKpi,
}

impl ColumnRole {
    /// Parses a host role name.
    ///
    /// Accepts the data-role names used by the host (`"Y"` is the primary measure).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Category" => Some(Self::Category),
            "Y" | "PrimaryMeasure" => Some(Self::PrimaryMeasure),
            "SecondaryMeasure" => Some(Self::SecondaryMeasure),
            "PrimaryKPI" | "PrimaryKpi" => Some(Self::PrimaryKpi),
            "SecondaryKPI" | "SecondaryKpi" => Some(Self::SecondaryKpi),
            _ => None,
        }
    }
}

/// A raw cell value: the host sends strings, numbers or nulls.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Missing value.
    Null,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
}

impl CellValue {
    /// Returns the numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Null | Self::Text(_) => None,
        }
    }

    /// Returns `true` for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the value as plain text; `Null` becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(v) => v.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

/// A category (grouping) column.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryColumn {
    /// Display name, used as tooltip label and default legend title.
    pub display_name: String,
    /// Role tag, if any.
    pub role: Option<ColumnRole>,
    /// Row values.
    pub values: Vec<CellValue>,
}

impl CategoryColumn {
    /// Creates a column tagged with [`ColumnRole::Category`].
    pub fn new(display_name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            display_name: display_name.into(),
            role: Some(ColumnRole::Category),
            values,
        }
    }

    /// Creates an untagged column (carried into tooltips only).
    pub fn untagged(display_name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            display_name: display_name.into(),
            role: None,
            values,
        }
    }
}

/// A numeric measure column.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureColumn {
    /// Display name.
    pub display_name: String,
    /// Role tag, if any.
    pub role: Option<ColumnRole>,
    /// Optional display-format string (e.g. `"#,0.00"`, `"0.00%"`).
    pub format: Option<String>,
    /// Row values; `None` is a null cell.
    pub values: Vec<Option<f64>>,
    /// Host-declared maximum of the column, if known.
    pub max: Option<f64>,
}

impl MeasureColumn {
    /// Creates a measure column with the given role.
    pub fn new(display_name: impl Into<String>, role: ColumnRole, values: Vec<Option<f64>>) -> Self {
        Self {
            display_name: display_name.into(),
            role: Some(role),
            format: None,
            values,
            max: None,
        }
    }

    /// Sets the display-format string.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the declared maximum.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Clears the role tag.
    pub fn without_role(mut self) -> Self {
        self.role = None;
        self
    }

    /// Value of row `row`; rows past the end of the column read as null.
    pub fn value(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }
}

/// An owned table: category columns plus measure columns, in host order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    /// Category columns.
    pub categories: Vec<CategoryColumn>,
    /// Measure columns.
    pub measures: Vec<MeasureColumn>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category column.
    pub fn with_category(mut self, column: CategoryColumn) -> Self {
        self.categories.push(column);
        self
    }

    /// Appends a measure column.
    pub fn with_measure(mut self, column: MeasureColumn) -> Self {
        self.measures.push(column);
        self
    }

    /// The column tagged [`ColumnRole::Category`], if any.
    pub fn category_column(&self) -> Option<&CategoryColumn> {
        self.categories
            .iter()
            .find(|c| c.role == Some(ColumnRole::Category))
    }

    /// The measure column tagged with `role`, if any.
    pub fn measure(&self, role: ColumnRole) -> Option<&MeasureColumn> {
        self.measures.iter().find(|m| m.role == Some(role))
    }

    /// Returns the number of rows: the longest of the category column and the measure columns.
    pub fn row_count(&self) -> usize {
        let categories = self
            .category_column()
            .or_else(|| self.categories.first())
            .map_or(0, |c| c.values.len());
        let measures = self
            .measures
            .iter()
            .map(|m| m.values.len())
            .max()
            .unwrap_or(0);
        categories.max(measures)
    }

    /// Returns `true` when columns disagree on their length.
    pub fn is_ragged(&self) -> bool {
        let n = self.row_count();
        self.categories.iter().any(|c| c.values.len() != n)
            || self.measures.iter().any(|m| m.values.len() != n)
    }

    /// Checks that measure values are finite and that no role is assigned twice.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen: Vec<ColumnRole> = Vec::new();
        let roles = self
            .categories
            .iter()
            .filter_map(|c| c.role)
            .chain(self.measures.iter().filter_map(|m| m.role));
        for role in roles {
            if seen.contains(&role) {
                return Err(TableError::DuplicateRole { role });
            }
            seen.push(role);
        }

        for column in &self.measures {
            if let Some(row) = column
                .values
                .iter()
                .position(|v| v.is_some_and(|v| !v.is_finite()))
            {
                return Err(TableError::NonFiniteValue {
                    column: column.display_name.clone(),
                    row,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn row_count_takes_the_longest_column() {
        let table = DataTable::new()
            .with_category(CategoryColumn::new("Fruit", vec!["A".into(), "B".into()]))
            .with_measure(MeasureColumn::new(
                "Sales",
                ColumnRole::PrimaryMeasure,
                vec![Some(1.0), Some(2.0), Some(3.0)],
            ));
        assert_eq!(table.row_count(), 3);
        assert!(table.is_ragged());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let table = DataTable::new().with_measure(MeasureColumn::new(
            "Sales",
            ColumnRole::PrimaryMeasure,
            vec![Some(1.0), Some(f64::NAN)],
        ));
        assert_eq!(
            table.validate(),
            Err(TableError::NonFiniteValue {
                column: "Sales".into(),
                row: 1
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_roles() {
        let table = DataTable::new()
            .with_measure(MeasureColumn::new("A", ColumnRole::PrimaryMeasure, vec![]))
            .with_measure(MeasureColumn::new("B", ColumnRole::PrimaryMeasure, vec![]));
        assert_eq!(
            table.validate(),
            Err(TableError::DuplicateRole {
                role: ColumnRole::PrimaryMeasure
            })
        );
    }

    #[test]
    fn host_role_names_parse() {
        assert_eq!(ColumnRole::from_name("Y"), Some(ColumnRole::PrimaryMeasure));
        assert_eq!(ColumnRole::from_name("PrimaryKPI"), Some(ColumnRole::PrimaryKpi));
        assert_eq!(ColumnRole::from_name("Tooltips"), None);
    }
}
