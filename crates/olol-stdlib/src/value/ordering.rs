//! Ordering used by array SORT

use std::cmp::Ordering;

use super::Value;

/// Compare two values for SORT.
///
/// Numbers compare numerically (an integer is widened when paired with a
/// double), strings compare by bytes, and every other pairing compares the
/// canonical string renderings. The result is not a total order across mixed
/// kinds; callers must use a sort that tolerates that.
pub fn sort_order(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Integer(a), Value::Double(b)) => float_order(*a as f64, *b),
        (Value::Double(a), Value::Integer(b)) => float_order(*a, *b as f64),
        (Value::Double(a), Value::Double(b)) => float_order(*a, *b),
        (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
        _ => left.to_string().cmp(&right.to_string()),
    }
}

// NaN is neither less nor greater than anything
fn float_order(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
