/*!
 * Media reference normalization.
 *
 * CMS media fields arrive as a URL string, an unresolved numeric id (the
 * relationship was not expanded), an upload object carrying `url`, or
 * nothing. They are narrowed once into `MediaReference`; every accessor is
 * total and returns a string.
 */

use serde_json::Value;

/// A media field narrowed to its possible shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    /// Already a URL
    Url(String),
    /// Reference by id that was not expanded
    Id(i64),
    /// Upload object; `url` may be absent
    Object { url: Option<String> },
    /// Null, absent, or an unusable shape
    Missing,
}

impl MediaReference {
    /// Narrow an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(url) => MediaReference::Url(url.clone()),
            Value::Number(n) => n
                .as_i64()
                .map(MediaReference::Id)
                .unwrap_or(MediaReference::Missing),
            Value::Object(map) => MediaReference::Object {
                url: map.get("url").and_then(Value::as_str).map(str::to_string),
            },
            _ => MediaReference::Missing,
        }
    }

    /// Narrow an optional JSON value, as returned by field lookups
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map(Self::from_value).unwrap_or(MediaReference::Missing)
    }

    /// URL for rendering, empty when there is none
    pub fn url(&self) -> &str {
        match self {
            MediaReference::Url(url) => url,
            MediaReference::Object { url: Some(url) } => url,
            MediaReference::Object { url: None } | MediaReference::Id(_) | MediaReference::Missing => "",
        }
    }

    /// URL for rendering, or `fallback` when it would be empty
    pub fn url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.url() {
            "" => fallback,
            url => url,
        }
    }
}

impl From<&Value> for MediaReference {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

/// Resolve any media field shape to a URL string, empty when unresolvable
pub fn media_url(value: &Value) -> String {
    MediaReference::from_value(value).url().to_string()
}

/// Like [`media_url`], substituting `fallback` for an empty result
///
/// For hero and background call sites that must always show an image.
pub fn media_url_or(value: &Value, fallback: &str) -> String {
    MediaReference::from_value(value).url_or(fallback).to_string()
}

/// Prefix root-relative media paths with the configured base URL
///
/// Absolute URLs, empty strings and an empty base pass through unchanged.
pub fn absolutize_media_url(url: &str, base: &str) -> String {
    if url.is_empty() || base.is_empty() || !url.starts_with('/') || url.starts_with("//") {
        return url.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), url)
}
