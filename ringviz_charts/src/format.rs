// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting: display units, format strings and percent text.
//!
//! Labels, legend rows, the summary panel and tooltips all build a [`ValueFormatter`] from their
//! own settings (format string, precision, display unit) and format values with it.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Text shown for a null value where a caller asks for blank-aware formatting.
pub const BLANK: &str = "(Blank)";

/// Upper bound for any configured precision.
pub const MAX_PRECISION: u8 = 4;

/// Clamps a host-supplied precision to `[0, MAX_PRECISION]`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clamped into 0..=4 first"
)]
pub fn clamp_precision(precision: i32) -> u8 {
    precision.clamp(0, i32::from(MAX_PRECISION)) as u8
}

/// A display unit: the divisor applied before formatting, plus its suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayUnit {
    /// No scaling.
    #[default]
    Unscaled,
    /// `K`, divides by 1e3.
    Thousands,
    /// `M`, divides by 1e6.
    Millions,
    /// `bn`, divides by 1e9.
    Billions,
    /// `T`, divides by 1e12.
    Trillions,
}

impl DisplayUnit {
    /// Maps the host's numeric unit setting.
    ///
    /// `0` means auto and yields `None`; known divisors map to their unit and anything else
    /// (`1`, `10`, ...) is [`DisplayUnit::Unscaled`].
    pub fn from_host(value: f64) -> Option<Self> {
        if value == 0.0 {
            None
        } else if value == 1e3 {
            Some(Self::Thousands)
        } else if value == 1e6 {
            Some(Self::Millions)
        } else if value == 1e9 {
            Some(Self::Billions)
        } else if value == 1e12 {
            Some(Self::Trillions)
        } else {
            Some(Self::Unscaled)
        }
    }

    /// The divisor applied to values.
    pub fn divisor(self) -> f64 {
        match self {
            Self::Unscaled => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Trillions => 1e12,
        }
    }

    /// The suffix appended to scaled values.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Unscaled => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "bn",
            Self::Trillions => "T",
        }
    }
}

/// Number of decimal digits in the integer part of `|value|`; `0` for non-finite values.
fn integer_digit_count(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let mut n = value.abs().trunc();
    let mut count = 1;
    while n >= 10.0 {
        n = (n / 10.0).trunc();
        count += 1;
    }
    count
}

/// Picks the display unit for `sample`.
///
/// An explicit unit always wins. Otherwise the unit is chosen by the digit count of the integer
/// part of the sample: more than 9 digits is billions, 7 to 9 millions, 4 to 6 thousands, and
/// anything shorter stays unscaled.
///
/// Only digits count, never a minus sign: `-100` has three digits and stays unscaled, exactly
/// like `100`, so a value and its negation always share a unit.
pub fn scale_unit(sample: f64, explicit: Option<DisplayUnit>) -> DisplayUnit {
    if let Some(unit) = explicit {
        return unit;
    }
    match integer_digit_count(sample) {
        n if n > 9 => DisplayUnit::Billions,
        7..=9 => DisplayUnit::Millions,
        4..=6 => DisplayUnit::Thousands,
        _ => DisplayUnit::Unscaled,
    }
}

/// Decimal and group separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Separator between integer and fractional digits.
    pub decimal_separator: char,
    /// Separator between digit groups of the integer part.
    pub group_separator: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
        }
    }
}

/// A parsed display-format string such as `"#,0.00"`, `"$#,0"` or `"0.0%"`.
///
/// Only the first section of a multi-section format (`positive;negative;zero`) is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Literal text before the number.
    pub prefix: String,
    /// Literal text after the number (and after the unit suffix).
    pub suffix: String,
    /// Whether the integer part is grouped in thousands.
    pub grouping: bool,
    /// Decimals always shown.
    pub min_decimals: u8,
    /// Decimals shown at most; trailing zeros past `min_decimals` are dropped.
    pub max_decimals: u8,
    /// Percent format: values are multiplied by 100 and never unit-scaled.
    pub percent: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::general()
    }
}

impl NumberFormat {
    /// The format used when a column has no format string: grouped, up to two decimals.
    pub fn general() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            grouping: true,
            min_decimals: 0,
            max_decimals: 2,
            percent: false,
        }
    }

    /// Parses a format string. Strings without digit placeholders yield [`NumberFormat::general`].
    pub fn parse(format: &str) -> Self {
        let mut out = Self {
            prefix: String::new(),
            suffix: String::new(),
            grouping: false,
            min_decimals: 0,
            max_decimals: 0,
            percent: false,
        };
        let mut in_core = false;
        let mut core_seen = false;
        let mut fraction = false;
        let mut chars = format.chars().peekable();

        let push_literal = |out: &mut Self, core_seen: bool, c: char| {
            if core_seen {
                out.suffix.push(c);
            } else {
                out.prefix.push(c);
            }
        };

        while let Some(c) = chars.next() {
            match c {
                ';' => break,
                '\\' => {
                    in_core = false;
                    if let Some(next) = chars.next() {
                        push_literal(&mut out, core_seen, next);
                    }
                }
                '"' => {
                    in_core = false;
                    for next in chars.by_ref() {
                        if next == '"' {
                            break;
                        }
                        push_literal(&mut out, core_seen, next);
                    }
                }
                '%' => {
                    in_core = false;
                    out.percent = true;
                    push_literal(&mut out, core_seen, '%');
                }
                '0' | '#' => {
                    in_core = true;
                    core_seen = true;
                    if fraction {
                        out.max_decimals = out.max_decimals.saturating_add(1);
                        if c == '0' {
                            out.min_decimals = out.min_decimals.saturating_add(1);
                        }
                    }
                }
                ',' if in_core && !fraction => out.grouping = true,
                '.' if in_core || matches!(chars.peek(), Some('0' | '#')) => {
                    in_core = true;
                    core_seen = true;
                    fraction = true;
                }
                _ => {
                    in_core = false;
                    push_literal(&mut out, core_seen, c);
                }
            }
        }

        if !core_seen {
            return Self::general();
        }
        out.max_decimals = out.max_decimals.min(10);
        out.min_decimals = out.min_decimals.min(out.max_decimals);
        out
    }

    /// Parses `format`, falling back to [`NumberFormat::general`] when absent.
    pub fn from_option(format: Option<&str>) -> Self {
        format.map_or_else(Self::general, Self::parse)
    }
}

/// Returns `true` when a format string is a percent format.
pub fn is_percent_format(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.contains('%'))
}

/// Formats values with a format string, an optional fixed precision and a display unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueFormatter {
    format: NumberFormat,
    precision: Option<u8>,
    unit: DisplayUnit,
    locale: Locale,
}

impl ValueFormatter {
    /// Creates a formatter for the given format string (the general format when absent).
    pub fn new(format: Option<&str>) -> Self {
        Self {
            format: NumberFormat::from_option(format),
            precision: None,
            unit: DisplayUnit::Unscaled,
            locale: Locale::default(),
        }
    }

    /// Fixes the number of decimals, clamped to [`MAX_PRECISION`].
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision.min(MAX_PRECISION));
        self
    }

    /// Sets the display unit.
    pub fn with_unit(mut self, unit: DisplayUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the separators.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Returns `true` for percent formats.
    pub fn is_percent(&self) -> bool {
        self.format.percent
    }

    /// The display unit applied by [`ValueFormatter::format`] (never applied to percent formats).
    pub fn unit(&self) -> DisplayUnit {
        if self.format.percent {
            DisplayUnit::Unscaled
        } else {
            self.unit
        }
    }

    /// Formats `value`. Non-finite values yield an empty string.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let unit = self.unit();
        let scaled = if self.format.percent {
            value * 100.0
        } else {
            value / unit.divisor()
        };
        let (min_decimals, max_decimals) = match self.precision {
            Some(p) => (p, p),
            None => (self.format.min_decimals, self.format.max_decimals),
        };

        let digits = format!("{:.*}", usize::from(max_decimals), scaled.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let significant = frac_part.trim_end_matches('0').len();
        let frac = &frac_part[..significant.max(usize::from(min_decimals)).min(frac_part.len())];
        let negative = scaled < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.format.prefix);
        if self.format.grouping {
            push_grouped(&mut out, int_part, self.locale.group_separator);
        } else {
            out.push_str(int_part);
        }
        if !frac.is_empty() {
            out.push(self.locale.decimal_separator);
            out.push_str(frac);
        }
        out.push_str(unit.symbol());
        out.push_str(&self.format.suffix);
        out
    }

    /// Formats an optional value; `None` becomes [`BLANK`].
    pub fn format_option(&self, value: Option<f64>) -> String {
        value.map_or_else(|| String::from(BLANK), |v| self.format(v))
    }
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
}

/// `value` as a percentage of `total`; a zero (or non-finite) total yields `0`.
pub fn percent_of_total(value: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        0.0
    } else {
        value / total * 100.0
    }
}

/// Fixed-decimal text for a percentage (no `%` sign), clamped to [`MAX_PRECISION`] decimals.
pub fn format_percent(percent: f64, precision: u8) -> String {
    let percent = if percent.is_finite() { percent } else { 0.0 };
    format!("{:.*}", usize::from(precision.min(MAX_PRECISION)), percent)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn auto_unit_boundaries_are_exact() {
        assert_eq!(scale_unit(999.0, None), DisplayUnit::Unscaled);
        assert_eq!(scale_unit(999.99, None), DisplayUnit::Unscaled);
        assert_eq!(scale_unit(1_000.0, None), DisplayUnit::Thousands);
        assert_eq!(scale_unit(999_999.0, None), DisplayUnit::Thousands);
        assert_eq!(scale_unit(1_000_000.0, None), DisplayUnit::Millions);
        assert_eq!(scale_unit(999_999_999.0, None), DisplayUnit::Millions);
        assert_eq!(scale_unit(1_000_000_000.0, None), DisplayUnit::Billions);
        assert_eq!(scale_unit(-30.0, None), DisplayUnit::Unscaled);
        assert_eq!(scale_unit(-5_000.0, None), DisplayUnit::Thousands);
        assert_eq!(scale_unit(f64::NAN, None), DisplayUnit::Unscaled);
    }

    #[test]
    fn sign_does_not_count_as_a_digit() {
        assert_eq!(scale_unit(-100.0, None), DisplayUnit::Unscaled);
        assert_eq!(scale_unit(-999.0, None), scale_unit(999.0, None));
        assert_eq!(scale_unit(-1_000.0, None), DisplayUnit::Thousands);
        assert_eq!(scale_unit(-999_999.0, None), DisplayUnit::Thousands);
        assert_eq!(scale_unit(-1_000_000.0, None), DisplayUnit::Millions);
    }

    #[test]
    fn explicit_unit_wins() {
        assert_eq!(
            scale_unit(12.0, Some(DisplayUnit::Millions)),
            DisplayUnit::Millions
        );
        assert_eq!(DisplayUnit::from_host(0.0), None);
        assert_eq!(DisplayUnit::from_host(1.0), Some(DisplayUnit::Unscaled));
        assert_eq!(DisplayUnit::from_host(1e9), Some(DisplayUnit::Billions));
    }

    #[test]
    fn format_strings_parse() {
        let f = NumberFormat::parse("\\$#,0.00");
        assert_eq!(f.prefix, "$");
        assert!(f.grouping);
        assert_eq!((f.min_decimals, f.max_decimals), (2, 2));
        assert!(!f.percent);

        let p = NumberFormat::parse("0.0%;-0.0%");
        assert!(p.percent);
        assert_eq!(p.suffix, "%");
        assert_eq!(p.max_decimals, 1);

        let o = NumberFormat::parse("#,0.##");
        assert_eq!((o.min_decimals, o.max_decimals), (0, 2));

        assert_eq!(NumberFormat::parse("General"), NumberFormat::general());
    }

    #[test]
    fn formats_with_grouping_units_and_precision() {
        let f = ValueFormatter::new(Some("#,0.00"));
        assert_eq!(f.format(1234.5), "1,234.50");
        assert_eq!(f.format(-1234.5), "-1,234.50");

        let k = ValueFormatter::new(Some("#,0.00"))
            .with_unit(DisplayUnit::Thousands)
            .with_precision(1);
        assert_eq!(k.format(1234.5), "1.2K");

        let dollars = ValueFormatter::new(Some("$#,0")).with_precision(0);
        assert_eq!(dollars.format(1234.6), "$1,235");
    }

    #[test]
    fn general_format_drops_trailing_zeros() {
        let f = ValueFormatter::new(None);
        assert_eq!(f.format(30.0), "30");
        assert_eq!(f.format(-30.0), "-30");
        assert_eq!(f.format(1234.567), "1,234.57");
        assert_eq!(f.format(2.5), "2.5");
    }

    #[test]
    fn percent_formats_are_not_unit_scaled() {
        let f = ValueFormatter::new(Some("0.00%")).with_unit(DisplayUnit::Millions);
        assert!(f.is_percent());
        assert_eq!(f.unit(), DisplayUnit::Unscaled);
        assert_eq!(f.format(0.256), "25.60%");
    }

    #[test]
    fn blank_and_non_finite_values() {
        let f = ValueFormatter::new(None);
        assert_eq!(f.format(f64::NAN), "");
        assert_eq!(f.format(f64::INFINITY), "");
        assert_eq!(f.format_option(None), BLANK);
        assert_eq!(f.format(-0.001), "0");
    }

    #[test]
    fn formatting_is_idempotent_and_locale_aware() {
        let f = ValueFormatter::new(Some("#,0.00")).with_locale(Locale {
            decimal_separator: ',',
            group_separator: '.',
        });
        assert_eq!(f.format(1234.5), "1.234,50");
        assert_eq!(f.format(1234.5), f.format(1234.5));
    }

    #[test]
    fn percent_of_total_guards_zero() {
        assert_eq!(percent_of_total(5.0, 0.0), 0.0);
        assert!((percent_of_total(10.0, 40.0) - 25.0).abs() < 1e-12);
        assert_eq!(format_percent(25.0, 2), "25.00");
        assert_eq!(format_percent(12.3456, 9), "12.3456");
        assert_eq!(clamp_precision(-3), 0);
        assert_eq!(clamp_precision(7), 4);
    }
}
