//! Presentation helpers for hosts that display calculation results.
//!
//! Not part of the computational contract: nothing in the engine depends on
//! these functions.

/// Digit grouping and decimal separator conventions.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NumberLocale {
    /// `1 234 567,89` with a non-breaking space between groups
    #[default]
    Ru,
    /// `1,234,567.89`
    En,
}

impl NumberLocale {
    pub const fn group_separator(self) -> char {
        match self {
            NumberLocale::Ru => '\u{a0}',
            NumberLocale::En => ',',
        }
    }

    pub const fn decimal_separator(self) -> char {
        match self {
            NumberLocale::Ru => ',',
            NumberLocale::En => '.',
        }
    }
}

/// Markup of `commercial` over `base` in percent; `0` for a zero base.
pub fn percentage_markup(base: f64, commercial: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (commercial - base) / base * 100.0
}

/// Formats `value` with `decimals` fixed decimals in the default locale.
pub fn format_currency(value: f64, decimals: usize) -> String {
    format_currency_with(value, decimals, NumberLocale::default())
}

/// Formats `value` with `decimals` fixed decimals and `locale` separators.
///
/// Rounding is whatever fixed-point formatting does; no extra policy.
/// Non-finite values render as an em dash.
pub fn format_currency_with(value: f64, decimals: usize, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let fixed = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        // a value that rounds to zero carries no sign
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => ("", rest),
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_percentage() {
        assert_eq!(percentage_markup(0.0, 150.0), 0.0);
        assert!((percentage_markup(1000.0, 1100.0) - 10.0).abs() < 1e-9);
        assert!((percentage_markup(200.0, 150.0) + 25.0).abs() < 1e-9);
    }

    #[test]
    fn groups_thousands_per_locale() {
        assert_eq!(
            format_currency_with(1_234_567.891, 2, NumberLocale::En),
            "1,234,567.89"
        );
        assert_eq!(format_currency(1_234_567.891, 2), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_currency_with(999.7, 0, NumberLocale::En), "1,000");
    }

    #[test]
    fn small_and_negative_values() {
        assert_eq!(format_currency_with(5.0, 2, NumberLocale::En), "5.00");
        assert_eq!(format_currency_with(-12_345.0, 1, NumberLocale::En), "-12,345.0");
        assert_eq!(format_currency_with(100.0, 0, NumberLocale::Ru), "100");
    }

    #[test]
    fn rounded_to_zero_drops_the_sign() {
        assert_eq!(format_currency_with(-0.001, 2, NumberLocale::En), "0.00");
        assert_eq!(format_currency(-0.001, 2), "0,00");
        assert_eq!(format_currency_with(-0.4, 0, NumberLocale::En), "0");
        assert_eq!(format_currency_with(-0.006, 2, NumberLocale::En), "-0.01");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_currency(f64::NAN, 2), "—");
        assert_eq!(format_currency(f64::INFINITY, 2), "—");
    }
}
