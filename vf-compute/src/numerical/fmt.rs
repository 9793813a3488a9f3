//! Formatting of numbers for display.

/// The number of decimals each component of a [`Vec3`](crate::Vec3) is displayed with.
pub(crate) const DEFAULT_TRIM_PRECISION: u32 = 2;

/// Formats `value` in fixed-point notation with exactly `digits` digits after the decimal point.
///
/// ```
/// use vf_compute::numerical::fmt::format_fixed;
///
/// assert_eq!(format_fixed(3.0, 0), "3");
/// assert_eq!(format_fixed(3.0, 2), "3.00");
/// assert_eq!(format_fixed(-0.125, 1), "-0.1");
/// ```
pub fn format_fixed(value: f32, digits: u32) -> String {
    format!("{:.*}", digits as usize, value)
}

/// Formats `value` with `precision` decimals, then drops trailing zeros after the decimal point
/// and the decimal point itself if nothing follows it.
///
/// ```
/// use vf_compute::numerical::fmt::trim_zeroes;
///
/// assert_eq!(trim_zeroes(1.5, 2), "1.5");
/// assert_eq!(trim_zeroes(2.0, 2), "2");
/// assert_eq!(trim_zeroes(1.05, 2), "1.05");
/// ```
pub fn trim_zeroes(value: f32, precision: u32) -> String {
    let formatted = format_fixed(value, precision);
    if !formatted.contains('.') {
        return normalize_zero(formatted);
    }

    let trimmed = formatted
        .trim_end_matches('0')
        .trim_end_matches('.');
    normalize_zero(trimmed.to_string())
}

/// Turns `-0` into `0`.
fn normalize_zero(s: String) -> String {
    if s == "-0" {
        String::from("0")
    } else {
        s
    }
}
