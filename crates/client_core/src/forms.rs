//! Turning edit-form fields into request bodies.

use reqwest::multipart;
use serde_json::{Map, Value};
use shared::domain::ReactionKind;
use uuid::Uuid;

/// Ordered `(name, value)` pairs as submitted by an edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Multipart body with one text part per field, in order.
    pub fn to_multipart(&self) -> multipart::Form {
        self.0
            .iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Slide edit form as JSON.
///
/// Empty fields are left out so the server keeps their current value.
/// `next_slide` is only sent when it is numeric, truncated to its leading
/// integer (`"12.5"` becomes `12`).
pub fn slide_json(fields: &FormFields) -> Map<String, Value> {
    let mut json = Map::new();
    for (name, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        if name == "next_slide" {
            if let Some(next) = leading_integer(value) {
                json.insert(name.to_string(), Value::from(next));
            }
        } else {
            json.insert(name.to_string(), Value::from(value));
        }
    }
    json
}

fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if !value.parse::<f64>().is_ok_and(f64::is_finite) {
        return None;
    }
    let digits_end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..digits_end].parse().ok()
}

/// Lesson edit form as JSON. Template placeholders rendered as `"None"`
/// are dropped.
pub fn lesson_json(fields: &FormFields) -> Map<String, Value> {
    fields
        .iter()
        .filter(|(_, value)| *value != "None")
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect()
}

/// Field name for a reaction input added on the page before it exists
/// server-side.
pub fn new_reaction_field_name(kind: ReactionKind) -> String {
    format!("{kind}_{}_new", Uuid::new_v4().simple())
}
