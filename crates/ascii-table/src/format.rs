//! printf-style column formats.

/// How a column's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// `%i`, `%03i`: value truncated to an integer
    Int { width: usize, zero_pad: bool },
    /// `%e`, `%013.6e`: scientific notation with a signed, two-digit-minimum exponent
    Sci {
        width: usize,
        precision: usize,
        zero_pad: bool,
    },
}

impl ColumnFormat {
    /// `%03i`, used for cell indices.
    pub const INDEX: ColumnFormat = ColumnFormat::Int {
        width: 3,
        zero_pad: true,
    };

    /// `%i`
    pub const PLAIN_INT: ColumnFormat = ColumnFormat::Int {
        width: 0,
        zero_pad: false,
    };

    /// `%013.6e`, used for every physical quantity.
    pub const SCI: ColumnFormat = ColumnFormat::Sci {
        width: 13,
        precision: 6,
        zero_pad: true,
    };

    /// Render one value.
    pub fn format(&self, value: f64) -> String {
        match *self {
            ColumnFormat::Int { width, zero_pad } => {
                if !value.is_finite() {
                    return pad(non_finite(value), width, false);
                }
                pad(format!("{}", value.trunc() as i64), width, zero_pad)
            }
            ColumnFormat::Sci {
                width,
                precision,
                zero_pad,
            } => {
                if !value.is_finite() {
                    return pad(non_finite(value), width, false);
                }
                pad(c_scientific(value, precision), width, zero_pad)
            }
        }
    }
}

/// A named column with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub format: ColumnFormat,
}

impl Column {
    pub fn new(name: impl Into<String>, format: ColumnFormat) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }

    pub fn index(name: impl Into<String>) -> Self {
        Self::new(name, ColumnFormat::INDEX)
    }

    pub fn sci(name: impl Into<String>) -> Self {
        Self::new(name, ColumnFormat::SCI)
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Rust writes `1.5e3`; C writes `1.5e+03`.
fn c_scientific(value: f64, precision: usize) -> String {
    let s = format!("{:.*e}", precision, value);
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => s,
        },
        None => s,
    }
}

/// Right-align to `width`. Zero padding goes after the sign, as in C.
fn pad(s: String, width: usize, zero_pad: bool) -> String {
    if s.len() >= width {
        return s;
    }
    let fill = width - s.len();
    if zero_pad {
        match s.strip_prefix('-') {
            Some(rest) => format!("-{}{}", "0".repeat(fill), rest),
            None => format!("{}{}", "0".repeat(fill), s),
        }
    } else {
        format!("{}{}", " ".repeat(fill), s)
    }
}
