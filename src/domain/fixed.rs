// Fixed-point display of readings

/// Format `value` with `digits` decimals, rounding halves away from zero
/// (7.25 -> "7.3", 12.5 -> "13") instead of to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", digits, rounded)
}
