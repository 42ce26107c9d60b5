//! Runtime values inspected by the uno primitives.
//!
//! Values enter uno through this closed variant type. Shape probing (is it
//! array-like, date-like, pattern-like?) happens once, when a host value is
//! converted into a [`Value`]; the primitives downstream only pattern match.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Insertion-ordered property map backing [`Value::Object`].
pub type Object = IndexMap<String, Value>;

/// Native body of a [`Function`]: `(receiver, args) -> Ok(returned) | Err(thrown)`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, Value> + Send + Sync;

/// Largest integer magnitude a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// An arbitrary piece of data of unconstrained shape.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Missing value; the default.
    #[default]
    Undefined,
    /// Explicit absence of a value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Every numeric value, including NaN and both infinities.
    Number(f64),
    /// Text.
    String(String),
    /// Ordered sequence; indices act as keys.
    Array(Vec<Value>),
    /// Plain keyed record.
    Object(Object),
    /// Invocable target.
    Function(Function),
    /// Regular expression pattern.
    RegExp(RegExp),
    /// Point in time, compared at millisecond precision.
    Date(DateTime<Utc>),
    /// A host value carrying its own notion of equality.
    Custom(Arc<dyn Equatable>),
}

/// Primitive kind probe, coarser than [`crate::TypeTag`].
///
/// `null`, arrays, plain objects, patterns, dates and custom values all
/// report [`Kind::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// `undefined`.
    Undefined,
    /// `null` and every composite.
    Object,
    /// Booleans.
    Boolean,
    /// Every number, NaN included.
    Number,
    /// Text.
    String,
    /// Invocable values.
    Function,
}

/// Capability for values that compare themselves.
pub trait Equatable: fmt::Debug + Send + Sync {
    /// Decides equality against any other value.
    fn is_equal(&self, other: &Value) -> bool;

    /// Structural view used for key enumeration and display.
    fn snapshot(&self) -> Value {
        Value::Object(Object::new())
    }
}

/// A callable target together with its textual definition header.
#[derive(Clone)]
pub struct Function {
    header: String,
    body: Arc<NativeFn>,
}

impl Function {
    /// Wraps `body` with an explicit definition header such as `function round(x)`.
    pub fn new<F>(header: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            body: Arc::new(body),
        }
    }

    /// Wraps `body` under the header `function <name>()`.
    pub fn named<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self::new(format!("function {name}()"), body)
    }

    /// Wraps `body` without a name.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self::new("function ()", body)
    }

    /// Textual definition header the function was declared with.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Invokes the body with `receiver` as context.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, Value> {
        (self.body)(receiver, args)
    }

    /// Identity comparison: both handles share the same body.
    pub fn same(&self, other: &Function) -> bool {
        Arc::as_ptr(&self.body) as *const () == Arc::as_ptr(&other.body) as *const ()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Pattern-like value: source text plus the three comparable flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegExp {
    /// Pattern text between the slashes.
    pub source: String,
    /// `g` flag.
    pub global: bool,
    /// `i` flag.
    pub ignore_case: bool,
    /// `m` flag.
    pub multiline: bool,
}

impl RegExp {
    /// Pattern without flags.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            global: false,
            ignore_case: false,
            multiline: false,
        }
    }

    /// Pattern with flags given as letters (`g`, `i`, `m`); other letters are ignored.
    pub fn with_flags(source: impl Into<String>, flags: &str) -> Self {
        let mut pattern = Self::new(source);
        pattern.global = flags.contains('g');
        pattern.ignore_case = flags.contains('i');
        pattern.multiline = flags.contains('m');
        pattern
    }

    /// Flag letters in canonical `gim` order.
    pub fn flags(&self) -> String {
        let mut out = String::new();
        if self.global {
            out.push('g');
        }
        if self.ignore_case {
            out.push('i');
        }
        if self.multiline {
            out.push('m');
        }
        out
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags())
    }
}

impl Value {
    /// Numeric value.
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    /// String value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Array of `items`.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    /// Builds an object, keeping the given key order.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Function value with a `function <name>()` header.
    pub fn function<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Value::Function(Function::named(name, body))
    }

    /// Pattern value; `flags` is any combination of `g`, `i` and `m`.
    pub fn regexp(source: impl Into<String>, flags: &str) -> Self {
        Value::RegExp(RegExp::with_flags(source, flags))
    }

    /// Date value.
    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(instant)
    }

    /// Wraps a value that compares itself.
    pub fn custom(value: impl Equatable + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Primitive kind probe.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Function(_) => Kind::Function,
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::RegExp(_)
            | Value::Date(_)
            | Value::Custom(_) => Kind::Object,
        }
    }

    /// Script-style truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// True only for a NaN number.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Borrowed text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Payload of a number value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Elements of an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Target of a function value.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Own property lookup. Arrays answer to their decimal indices.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Array(items) => parse_index(key).and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Own enumerable keys in iteration order.
    pub fn keys(&self) -> Vec<Cow<'_, str>> {
        match self {
            Value::Object(map) => map.keys().map(|k| Cow::Borrowed(k.as_str())).collect(),
            Value::Array(items) => (0..items.len()).map(|i| Cow::Owned(i.to_string())).collect(),
            _ => Vec::new(),
        }
    }

    /// Value of the `length` property, if any.
    pub fn length(&self) -> Option<f64> {
        match self {
            Value::Array(items) => Some(items.len() as f64),
            Value::Object(map) => map.get("length").and_then(Value::as_f64),
            _ => None,
        }
    }

    /// The value as seen by key-based traversal; custom values expose their snapshot.
    pub fn structural(&self) -> Cow<'_, Value> {
        match self {
            Value::Custom(custom) => Cow::Owned(custom.snapshot()),
            other => Cow::Borrowed(other),
        }
    }

    /// JSON-style encoding.
    ///
    /// Returns `None` for values without an encoding (`undefined`, functions).
    /// Inside objects such members are dropped, inside arrays they become `null`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        Some(match self {
            Value::Undefined | Value::Function(_) => return None,
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(Json::Null))
                    .collect(),
            ),
            Value::Object(map) => Json::Object(
                map.iter()
                    .filter_map(|(k, v)| v.to_json().map(|json| (k.clone(), json)))
                    .collect(),
            ),
            Value::RegExp(_) => Json::Object(serde_json::Map::new()),
            Value::Date(instant) => Json::String(iso_string(instant)),
            Value::Custom(custom) => return custom.snapshot().to_json(),
        })
    }
}

/// ISO-8601 UTC text with millisecond precision.
pub fn iso_string(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn json_number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn parse_index(key: &str) -> Option<usize> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .unwrap_or(serde_json::Value::Null)
            .serialize(serializer)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<RegExp> for Value {
    fn from(pattern: RegExp) -> Self {
        Value::RegExp(pattern)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::Date(instant)
    }
}
