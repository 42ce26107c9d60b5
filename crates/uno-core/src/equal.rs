//! Structural equality used to decide whether a check passed.

use crate::value::{Kind, Value};

/// Deep structural equality where `NaN` equals `NaN`.
///
/// The checks short-circuit in a fixed order: identity, kind, truthiness,
/// custom equality, dates, NaN, patterns, and finally a key-by-key walk that
/// recurses through this same function. Arrays take the key path too, their
/// indices acting as keys, after a length pre-check.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if identical(a, b) {
        return true;
    }
    if a.kind() != b.kind() {
        return false;
    }
    // Within a single kind coercive equality coincides with identity, so
    // there is no separate loose-equality pass.
    if a.is_truthy() != b.is_truthy() {
        return false;
    }
    if let Value::Custom(custom) = a {
        return custom.is_equal(b);
    }
    if let (Value::Date(x), Value::Date(y)) = (a, b) {
        return x.timestamp_millis() == y.timestamp_millis();
    }
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if let (Value::RegExp(x), Value::RegExp(y)) = (a, b) {
        return x.source == y.source
            && x.global == y.global
            && x.ignore_case == y.ignore_case
            && x.multiline == y.multiline;
    }
    if a.kind() != Kind::Object {
        return false;
    }

    let a = a.structural();
    let b = b.structural();
    if let Some(len) = a.length() {
        if len != 0.0 && !len.is_nan() && b.length() != Some(len) {
            return false;
        }
    }
    let a_keys = a.keys();
    if a_keys.len() != b.keys().len() {
        return false;
    }
    a_keys.iter().all(|key| match (a.get(key), b.get(key)) {
        (Some(x), Some(y)) => deep_equal(x, y),
        _ => false,
    })
}

/// Strict identity: same primitive value, or the same shared handle.
///
/// Owned composites have no reference identity and never match here.
pub fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x.same(y),
        (Value::Custom(x), Value::Custom(y)) => {
            std::sync::Arc::as_ptr(x) as *const () == std::sync::Arc::as_ptr(y) as *const ()
        }
        _ => false,
    }
}
