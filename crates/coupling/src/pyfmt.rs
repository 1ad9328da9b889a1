//! Number rendering compatible with the radiative-transfer code's parameter
//! reader, which was written against Python's `str()` output.

/// Shortest round-trip rendering with Python's layout: decimal notation for
/// magnitudes in [1e-4, 1e16), otherwise `1.5e-05` / `1e+20`, and always a
/// decimal point in decimal notation.
pub fn py_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if (-4..16).contains(&exp) {
        let s = format!("{}", value);
        if s.contains('.') {
            s
        } else {
            format!("{}.0", s)
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}
