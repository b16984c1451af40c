//! Display and Debug implementations for Value
//!
//! `Display` is the canonical string rendering: the form used for map-key
//! coercion, the SORT fallback, JOIN and CONCAT.

use std::fmt;

use super::*;

/// Render a double the way the language prints it: shortest round-trip
/// decimal, no exponent, no trailing `.0`.
pub fn render_double(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "+Inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "NOTHIN"),
            Value::Bool(true) => write!(f, "YEZ"),
            Value::Bool(false) => write!(f, "NO"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", render_double(*n)),
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Object(obj) => write!(f, "<{} object>", obj.class_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Double(n) => write!(f, "{}d", render_double(*n)),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_primitives() {
        assert_eq!(Value::Nothing.to_string(), "NOTHIN");
        assert_eq!(Value::Bool(true).to_string(), "YEZ");
        assert_eq!(Value::Bool(false).to_string(), "NO");
        assert_eq!(Value::Integer(-12).to_string(), "-12");
        assert_eq!(Value::string("plain").to_string(), "plain");
    }

    #[test]
    fn test_render_doubles() {
        assert_eq!(render_double(1.0), "1");
        assert_eq!(render_double(3.14), "3.14");
        assert_eq!(render_double(-0.5), "-0.5");
        assert_eq!(render_double(f64::INFINITY), "+Inf");
        assert_eq!(render_double(f64::NEG_INFINITY), "-Inf");
        assert_eq!(render_double(f64::NAN), "NaN");
    }

    #[test]
    fn test_debug_quotes_strings() {
        assert_eq!(format!("{:?}", Value::string("a")), "\"a\"");
        assert_eq!(format!("{:?}", Value::Double(2.0)), "2d");
    }
}
