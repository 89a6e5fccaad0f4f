//! Root field arguments and their rendering.

use indexmap::IndexMap;
use serde_json::Value;

/// How argument values are written into query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentRendering {
    /// Values are written without quoting: `name: Mars`, `first: 1`.
    ///
    /// String values come out as bare words, which a server will read as an
    /// enum value or reject. Matches what existing callers of this tool
    /// send.
    #[default]
    Bare,
    /// Values are written as GraphQL literals: strings quoted and escaped,
    /// numbers, booleans and `null` as-is.
    Literal,
}

/// Ordered argument name → value mapping for one root field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets an argument, keeping its original position if it was already set.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Renders `(name1: value1, name2: value2)`, or an empty string when
    /// there are no arguments.
    #[must_use]
    pub fn render(&self, rendering: ArgumentRendering) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        let rendered: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{name}: {}", render_value(value, rendering)))
            .collect();
        format!("({})", rendered.join(", "))
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arguments = Self::new();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

fn render_value(value: &Value, rendering: ArgumentRendering) -> String {
    match value {
        Value::String(s) => match rendering {
            ArgumentRendering::Bare => s.clone(),
            // JSON string escapes are a subset of GraphQL's.
            ArgumentRendering::Literal => Value::String(s.clone()).to_string(),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| render_value(item, rendering))
                .collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(name, item)| format!("{name}: {}", render_value(item, rendering)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
