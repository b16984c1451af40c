//! Value trait implementations: constructors, predicates, extractors, casts, From traits, PartialEq

use std::sync::Arc;

use super::*;
use crate::containers::{Baskit, Bukkit};
use crate::error::{type_name, Result, StdlibError};

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Wrap an array in a new `BUKKIT` instance
    pub fn array(items: Bukkit) -> Self {
        Value::Object(crate::stdlib::arrays::new_bukkit(items))
    }

    /// Wrap a map in a new `BASKIT` instance
    pub fn map(entries: Baskit) -> Self {
        Value::Object(crate::stdlib::maps::new_baskit(entries))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is `NOTHIN`
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Check if value is an integer or a double
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is an object reference
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract double value (no widening)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract object reference
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Explicit Conversions
    // ═══════════════════════════════════════════════════════════════════

    /// Truthiness used by conditionals.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nothing => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Double(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Cast to `INTEGR`. Strings parse as decimal or `0x` hex.
    pub fn to_integer(&self) -> Result<i64> {
        match self {
            Value::Nothing => Ok(0),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Integer(n) => Ok(*n),
            Value::Double(n) => Ok(*n as i64),
            Value::String(s) => {
                if let Ok(n) = s.parse::<i64>() {
                    return Ok(n);
                }
                let hex = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .and_then(|digits| i64::from_str_radix(digits, 16).ok());
                hex.ok_or_else(|| {
                    StdlibError::type_error(format!("cannot cast string '{}' to INTEGR", s))
                })
            }
            Value::Object(_) => Err(StdlibError::type_error(format!(
                "cannot cast {} to INTEGR",
                type_name(self)
            ))),
        }
    }

    /// Cast to `DUBBLE`.
    pub fn to_double(&self) -> Result<f64> {
        match self {
            Value::Nothing => Ok(0.0),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Integer(n) => Ok(*n as f64),
            Value::Double(n) => Ok(*n),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
                StdlibError::type_error(format!("cannot cast string '{}' to DUBBLE", s))
            }),
            Value::Object(_) => Err(StdlibError::type_error(format!(
                "cannot cast {} to DUBBLE",
                type_name(self)
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,

            // Mixed numerics compare after widening the integer
            (Value::Integer(a), Value::Double(b)) => (*a as f64) == *b,
            (Value::Double(a), Value::Integer(b)) => *a == (*b as f64),

            (Value::String(a), Value::String(b)) => a == b,

            // Identity first, then the class's own equality if it has one
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b) || a.delegated_eq(b),

            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nothing
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Predicates
    #[test]
    fn test_is_nothing() {
        assert!(Value::Nothing.is_nothing());
        assert!(!Value::Integer(0).is_nothing());
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::Integer(1).is_numeric());
        assert!(Value::Double(1.5).is_numeric());
        assert!(!Value::string("1").is_numeric());
    }

    // Truthiness
    #[test]
    fn test_truthiness() {
        assert!(!Value::Nothing.is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Integer(-3).is_truthy());
        assert!(!Value::Double(0.0).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("NO").is_truthy());
        assert!(Value::Bool(true).is_truthy());
    }

    // Casts
    #[test]
    fn test_to_integer() {
        assert_eq!(Value::string("42").to_integer().unwrap(), 42);
        assert_eq!(Value::string("0xff").to_integer().unwrap(), 255);
        assert_eq!(Value::Double(3.9).to_integer().unwrap(), 3);
        assert_eq!(Value::Bool(true).to_integer().unwrap(), 1);
        assert_eq!(Value::Nothing.to_integer().unwrap(), 0);
        assert!(Value::string("abc").to_integer().is_err());
    }

    #[test]
    fn test_to_double() {
        assert_eq!(Value::Integer(2).to_double().unwrap(), 2.0);
        assert_eq!(Value::string("2.5").to_double().unwrap(), 2.5);
        assert!(Value::string("x").to_double().is_err());
    }

    // PartialEq
    #[test]
    fn test_structural_equality() {
        assert_eq!(Value::Nothing, Value::Nothing);
        assert_eq!(Value::string("a"), Value::string("a"));
        assert_ne!(Value::string("a"), Value::string("b"));
        assert_ne!(Value::Bool(true), Value::Integer(1));
        assert_ne!(Value::Nothing, Value::Bool(false));
    }

    #[test]
    fn test_numeric_widening_equality() {
        assert_eq!(Value::Integer(2), Value::Double(2.0));
        assert_eq!(Value::Double(2.0), Value::Integer(2));
        assert_ne!(Value::Integer(2), Value::Double(2.5));
    }

    #[test]
    fn test_string_never_equals_number() {
        assert_ne!(Value::string("1"), Value::Integer(1));
    }

    // From trait
    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(()), Value::Nothing);
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i64), Value::Integer(7));
        assert_eq!(Value::from(1.5f64), Value::Double(1.5));
        assert_eq!(Value::from("hi"), Value::string("hi"));
        assert_eq!(Value::from(None::<i64>), Value::Nothing);
    }
}
