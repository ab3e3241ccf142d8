//! Parsing and validation of user-entered form data.

pub mod batches;
pub mod calculators;

/// Reads the leading decimal number of `value` the way a numeric keypad
/// field is interpreted: surrounding garbage is ignored, a comma is accepted
/// as the decimal separator and anything unparsable counts as `0.0`.
pub fn parse_decimal(value: &str) -> f64 {
    let text = value.trim_start().replace(',', ".");
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => 0.0,
    }
}
