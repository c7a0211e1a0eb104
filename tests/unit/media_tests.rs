/*!
 * Tests for media reference resolution
 */

use parksite::content::{absolutize_media_url, media_url, media_url_or, MediaReference};
use serde_json::{json, Value};

#[test]
fn test_mediaUrl_shouldNeverFailOnAnyShape() {
    let inputs = [
        (Value::Null, ""),
        (json!(""), ""),
        (json!(42), ""),
        (json!({"url": "x"}), "x"),
        (json!({}), ""),
        (json!("https://a/b.png"), "https://a/b.png"),
    ];

    for (input, expected) in inputs {
        assert_eq!(media_url(&input), expected, "input: {}", input);
    }
}

#[test]
fn test_mediaUrlOr_shouldSubstituteOnlyEmptyResults() {
    assert_eq!(media_url_or(&json!(7), "/placeholder.png"), "/placeholder.png");
    assert_eq!(media_url_or(&json!({"url": "/a.png"}), "/placeholder.png"), "/a.png");
}

#[test]
fn test_mediaReference_shouldNarrowEachShape() {
    assert_eq!(MediaReference::from_value(&json!(3)), MediaReference::Id(3));
    assert_eq!(MediaReference::from_value(&json!("/x")), MediaReference::Url("/x".to_string()));
    assert_eq!(MediaReference::from_value(&json!({})), MediaReference::Object { url: None });
    assert_eq!(MediaReference::from_optional(None), MediaReference::Missing);
}

#[test]
fn test_absolutizeMediaUrl_shouldPrefixRootRelativePaths() {
    assert_eq!(absolutize_media_url("/media/a.png", "https://cms.example.com/"), "https://cms.example.com/media/a.png");
    assert_eq!(absolutize_media_url("https://cdn/a.png", "https://cms.example.com"), "https://cdn/a.png");
    assert_eq!(absolutize_media_url("", "https://cms.example.com"), "");
}
