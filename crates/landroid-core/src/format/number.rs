//! Locale-aware number rendering.

use super::locale::LocaleProfile;

/// Fraction digits kept after rounding, matching the host's default
/// number formatting.
const MAX_FRACTION_DIGITS: usize = 3;

/// Render `value` with the profile's separators, rounded to at most three
/// fraction digits with trailing zeros dropped.
pub fn format_number(value: f64, profile: &LocaleProfile) -> String {
    let text = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let negative = value.is_sign_negative() && (int_part != "0" || !frac_part.is_empty());

    let mut out = String::with_capacity(text.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, profile));
    if !frac_part.is_empty() {
        out.push(profile.decimal);
        out.push_str(frac_part);
    }
    out
}

/// Render an integer with the profile's grouping.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_integer(value: i64, profile: &LocaleProfile) -> String {
    format_number(value as f64, profile)
}

fn group_digits(digits: &str, profile: &LocaleProfile) -> String {
    if digits.len() < profile.min_grouping {
        return digits.to_owned();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(profile.group);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Locale;

    fn profile(tag: &str) -> &'static LocaleProfile {
        Locale::resolve(tag).profile()
    }

    #[test]
    fn english_grouping_and_decimals() {
        let en = profile("en-GB");
        assert_eq!(format_number(1234.5, en), "1,234.5");
        assert_eq!(format_number(1_234_567.0, en), "1,234,567");
        assert_eq!(format_number(999.0, en), "999");
        assert_eq!(format_number(0.1234, en), "0.123");
        assert_eq!(format_number(2.0, en), "2");
    }

    #[test]
    fn german_separators() {
        let de = profile("de");
        assert_eq!(format_number(1234.5, de), "1.234,5");
        assert_eq!(format_number(19.8, de), "19,8");
    }

    #[test]
    fn minimum_grouping_digits() {
        let es = profile("es");
        assert_eq!(format_number(1234.0, es), "1234");
        assert_eq!(format_number(12345.0, es), "12.345");
    }

    #[test]
    fn negative_values_and_negative_zero() {
        let en = profile("en-GB");
        assert_eq!(format_number(-2.5, en), "-2.5");
        assert_eq!(format_number(-0.0001, en), "0");
        assert_eq!(format_integer(-1500, en), "-1,500");
    }
}
