/// Formats a float in scientific notation with `precision` digits after the
/// decimal point and a signed exponent of at least two digits, eg.
/// -1.23450E-02. Non-finite values are written as NAN, INF and -INF.
pub fn scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return String::from("NAN");
    } else if value.is_infinite() {
        return String::from(if value > 0. { "INF" } else { "-INF" });
    }
    let formatted = format!("{:.*E}", precision, value);
    // rust writes the exponent as E-2 or E2
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent = exponent.parse::<i32>().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

/// The minimum and maximum of a slice, None if it is empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, v| match acc {
                     None => Some((*v, *v)),
                     Some((min, max)) => Some((min.min(*v), max.max(*v))),
                 })
}

/// Counts the values that are not exactly zero.
pub fn count_nonzero(values: &[f64]) -> usize {
    values.iter().filter(|v| **v != 0.).count()
}
