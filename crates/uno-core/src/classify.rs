//! Semantic type tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One of the fixed semantic categories a value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// `null`.
    Null,
    /// `undefined`, also used for absent values.
    Undefined,
    /// Positive or negative infinity.
    Infinity,
    /// Not-a-number.
    Nan,
    /// `true` or `false`.
    Boolean,
    /// Any finite number.
    Number,
    /// Text.
    String,
    /// Invocable value.
    Function,
    /// Ordered sequence.
    Array,
    /// Regular expression pattern.
    RegExp,
    /// Point in time.
    Date,
    /// Anything else, including custom values.
    Object,
}

impl TypeTag {
    /// Every tag, in classification order.
    pub const ALL: [TypeTag; 12] = [
        TypeTag::Null,
        TypeTag::Undefined,
        TypeTag::Infinity,
        TypeTag::Nan,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::Function,
        TypeTag::Array,
        TypeTag::RegExp,
        TypeTag::Date,
        TypeTag::Object,
    ];

    /// Lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Infinity => "infinity",
            TypeTag::Nan => "nan",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Function => "function",
            TypeTag::Array => "array",
            TypeTag::RegExp => "regexp",
            TypeTag::Date => "date",
            TypeTag::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps any value onto exactly one [`TypeTag`].
///
/// The arms are ordered: the non-finite numeric tags are claimed before the
/// generic `number` tag, and custom values fall through to `object`.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Undefined => TypeTag::Undefined,
        Value::Number(n) if n.is_infinite() => TypeTag::Infinity,
        Value::Number(n) if n.is_nan() => TypeTag::Nan,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Function(_) => TypeTag::Function,
        Value::Array(_) => TypeTag::Array,
        Value::RegExp(_) => TypeTag::RegExp,
        Value::Date(_) => TypeTag::Date,
        Value::Object(_) | Value::Custom(_) => TypeTag::Object,
    }
}
