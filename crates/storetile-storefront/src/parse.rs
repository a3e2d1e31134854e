//! Lenient numeric parsing for catalog amount strings.

/// Parses the longest leading decimal number in `s`, ignoring whatever
/// follows it.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, an optional exponent, and `Infinity`. Returns
/// `None` when no digit starts the string, e.g. `"abc"` or `""`.
///
/// ```
/// use storetile_storefront::parse::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("29.99"), Some(29.99));
/// assert_eq!(parse_float_prefix(" 15% off"), Some(15.0));
/// assert_eq!(parse_float_prefix("n/a"), None);
/// ```
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if trimmed[i..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digit_count = i - int_start;

    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digit_count += j - (i + 1);
        if digit_count > 0 {
            i = j;
        }
    }

    if digit_count == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if i < len && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    trimmed[..i].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
