use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::media::MediaReference;
use crate::richtext::RichTextTree;

/// A resolved CMS document as plain data
///
/// Accessors take dotted paths (`mainFeature.stats`) and never fail: a
/// missing or mistyped field reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw value at a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.0, path)
    }

    /// Non-empty string at a path
    pub fn str(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// String at a path, or `fallback` when absent or blank
    pub fn str_or(&self, path: &str, fallback: &str) -> String {
        self.str(path).unwrap_or(fallback).to_string()
    }

    /// String or number at a path, as display text
    pub fn display(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Array at a path; empty when absent
    pub fn array(&self, path: &str) -> &[Value] {
        self.get(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Nested object at a path as its own document
    pub fn section(&self, path: &str) -> Option<Document> {
        self.get(path)
            .filter(|v| v.is_object())
            .cloned()
            .map(Document)
    }

    /// Rich-text field at a path; empty tree when absent
    pub fn rich_text(&self, path: &str) -> RichTextTree {
        RichTextTree::from_optional(self.get(path))
    }

    /// Media field at a path
    pub fn media(&self, path: &str) -> MediaReference {
        MediaReference::from_optional(self.get(path))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Follow a dotted path through objects
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}
