//! Named placeholder substitution for check names.

use crate::format::ValueFormatter;
use crate::value::Value;

/// Ordered `name -> value` pairs substituted into a template.
///
/// Names are stored without braces. Re-inserting an existing name replaces
/// its value but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMapping {
    entries: Vec<(String, Value)>,
}

impl SubstitutionMapping {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Binds every name in `names` to the same value.
    pub fn alias(&mut self, names: &[&str], value: impl Into<Value>) {
        let value = value.into();
        for name in names {
            self.insert(*name, value.clone());
        }
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Pairs in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no name is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SubstitutionMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = SubstitutionMapping::new();
        for (name, value) in iter {
            mapping.insert(name, value);
        }
        mapping
    }
}

/// Substitutes every `{name}` in `template` with the formatted value.
///
/// Names are applied one after another in mapping order and each pass sees
/// the output of the previous ones, so a substituted value containing
/// `{other}` is itself expanded when `other` comes later in the mapping.
/// Values without a display string are skipped. A name that already starts
/// or ends with a brace is used verbatim as the placeholder.
pub fn render(template: &str, mapping: &SubstitutionMapping, formatter: &ValueFormatter) -> String {
    let mut out = template.to_string();
    for (name, value) in mapping.iter() {
        let Some(text) = formatter.format(value) else {
            continue;
        };
        let placeholder = placeholder(name);
        out = out.replace(placeholder.as_str(), &text);
    }
    out
}

/// Generic form of [`render`] over arbitrary values.
///
/// A non-string template, or a mapping that is not an object or array, is
/// returned unchanged. Arrays substitute their indices (`{0}`, `{1}`, ...).
pub fn format_template(template: &Value, mapping: &Value) -> Value {
    let Value::String(text) = template else {
        return template.clone();
    };
    let mapping = match mapping.structural().as_ref() {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<SubstitutionMapping>(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx.to_string(), value.clone()))
            .collect::<SubstitutionMapping>(),
        _ => return template.clone(),
    };
    Value::String(render(text, &mapping, &ValueFormatter::default()))
}

fn placeholder(name: &str) -> String {
    if name.starts_with('{') || name.ends_with('}') {
        name.to_string()
    } else {
        format!("{{{name}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braces_are_added_only_when_absent() {
        assert_eq!(placeholder("a"), "{a}");
        assert_eq!(placeholder("{a}"), "{a}");
        assert_eq!(placeholder("{a"), "{a");
        assert_eq!(placeholder(""), "{}");
    }

    #[test]
    fn reinserting_keeps_position() {
        let mut mapping = SubstitutionMapping::new();
        mapping.insert("a", 1);
        mapping.insert("b", 2);
        mapping.insert("a", 3);
        let names: Vec<_> = mapping.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(mapping.get("a").and_then(Value::as_f64), Some(3.0));
    }
}
