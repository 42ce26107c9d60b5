//! Display strings for values, dispatched on [`TypeTag`].

use crate::classify::{classify, TypeTag};
use crate::value::{iso_string, Value};

/// Converts values into the text used in check names and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormatter {
    structural: bool,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self { structural: true }
    }
}

impl ValueFormatter {
    /// Formatter that serializes composites with the JSON-style encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses between the JSON-style encoding (`true`) and the recursive
    /// element join (`false`) for arrays and objects.
    pub fn with_structural(structural: bool) -> Self {
        Self { structural }
    }

    /// True when composites use the JSON-style encoding.
    pub fn is_structural(&self) -> bool {
        self.structural
    }

    /// Display string for `value`, or `None` when the value has none (functions).
    pub fn format(&self, value: &Value) -> Option<String> {
        let text = match (classify(value), value) {
            (TypeTag::Null, _) => "null".to_string(),
            (TypeTag::Undefined, _) => "undefined".to_string(),
            (TypeTag::Nan, _) => "NaN".to_string(),
            (TypeTag::Infinity, _) => "infinity".to_string(),
            (TypeTag::Boolean, Value::Bool(b)) => b.to_string(),
            (TypeTag::Number, Value::Number(n)) => format_number(*n),
            (TypeTag::String, Value::String(s)) => s.clone(),
            (TypeTag::RegExp, Value::RegExp(pattern)) => pattern.to_string(),
            (TypeTag::Date, Value::Date(instant)) => iso_string(instant),
            (TypeTag::Array | TypeTag::Object, _) => self.composite(value),
            _ => return None,
        };
        Some(text)
    }

    /// Like [`ValueFormatter::format`], rendering a missing display string as `undefined`.
    pub fn display(&self, value: &Value) -> String {
        self.format(value)
            .unwrap_or_else(|| "undefined".to_string())
    }

    /// Argument list rendered like a call site: `1, "x", [2]`.
    ///
    /// With the JSON-style encoding on, string arguments are quoted so that
    /// `f("1")` and `f(1)` stay distinguishable.
    pub fn call_site(&self, args: &[Value]) -> String {
        args.iter()
            .map(|arg| match arg {
                Value::String(s) if self.structural => quote(s),
                other => self.display(other),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn composite(&self, value: &Value) -> String {
        if self.structural {
            if let Some(text) = json_text(value) {
                return text;
            }
        }
        match value {
            Value::Array(items) => {
                let inner: Vec<String> = items.iter().map(|item| self.display(item)).collect();
                format!("[{}]", inner.join(","))
            }
            _ => "[object Object]".to_string(),
        }
    }
}

/// JSON-style text for `value`, with numbers written by [`format_number`].
///
/// `None` for values without an encoding (`undefined`, functions). Inside
/// objects such members are dropped, inside arrays they become `null`.
pub fn json_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Undefined | Value::Function(_) => return None,
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) if n.is_finite() => format_number(*n),
        Value::Number(_) => "null".to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let inner: Vec<String> = items
                .iter()
                .map(|item| json_text(item).unwrap_or_else(|| "null".to_string()))
                .collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .filter_map(|(key, item)| json_text(item).map(|text| format!("{}:{text}", quote(key))))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
        Value::RegExp(_) => "{}".to_string(),
        Value::Date(instant) => quote(&iso_string(instant)),
        Value::Custom(custom) => return json_text(&custom.snapshot()),
    };
    Some(text)
}

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Display string using the default formatter.
pub fn format_value(value: &Value) -> Option<String> {
    ValueFormatter::default().format(value)
}

/// Shortest round-trip decimal text for `n`.
///
/// Magnitudes at or above `1e21` and below `1e-6` switch to exponent
/// notation with an explicit sign (`1e+21`, `1.5e-7`). Negative zero prints
/// as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    format!("{n}")
}
