/*!
 * Tests for the in-memory document store and content resolution
 */

use parksite::content::{ContentResolver, ListOptions};
use parksite::locale::Locale;
use parksite::store::{DocumentStore, FindQuery, MemoryStore};
use serde_json::json;
use std::sync::Arc;

use crate::common;

#[tokio::test]
async fn test_fixtureStore_shouldLoadGlobalsAndCollections() {
    let store = common::fixture_store();

    let settings = store.find_global("site-settings", Locale::En, 1).await.unwrap();
    assert!(settings.is_some());

    let products = store.find(&FindQuery::new("products", Locale::En, 0)).await.unwrap();
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_localizedField_withMissingTranslation_shouldFallBackToDefaultLocale() {
    let store = common::fixture_store();
    let resolver = ContentResolver::new(Arc::new(store));

    let en = resolver.global("home-page", Locale::En).await.unwrap().unwrap();
    let id = resolver.global("home-page", Locale::Id).await.unwrap().unwrap();
    let zh = resolver.global("home-page", Locale::Zh).await.unwrap().unwrap();

    assert_eq!(en.str("hero.headline"), Some("A Strategic Location for Your Industry"));
    assert_eq!(id.str("hero.headline"), Some("Lokasi Strategis untuk Industri Anda"));
    // No Chinese headline: the Indonesian one fills the gap
    assert_eq!(zh.str("hero.headline"), id.str("hero.headline"));
    assert_eq!(zh.str("hero.subheadline"), Some("可即建用地，直通高速公路。"));
}

#[tokio::test]
async fn test_relationship_shouldExpandOnlyWhileDepthRemains() {
    let store = common::fixture_store();

    let deep = store.find_global("site-settings", Locale::En, 1).await.unwrap().unwrap();
    assert_eq!(deep["logo"]["url"], json!("/media/logo.svg"));

    let shallow = store.find_global("site-settings", Locale::En, 0).await.unwrap().unwrap();
    assert_eq!(shallow["logo"], json!(10));
}

#[tokio::test]
async fn test_resolver_shouldMakeOneCallWithBoundedDepth() {
    let store = common::fixture_store();
    let resolver = ContentResolver::new(Arc::new(store.clone())).with_depth(9);

    assert_eq!(resolver.depth(), 2);
    resolver.by_slug("products", "warehouse", Locale::En).await.unwrap();

    assert_eq!(store.request_count(), 1);
    assert_eq!(store.max_depth_seen(), 2);
}

#[tokio::test]
async fn test_resolver_withUnknownSlug_shouldReturnNone() {
    let resolver = ContentResolver::new(Arc::new(common::fixture_store()));
    let found = resolver.by_slug("products", "does-not-exist", Locale::En).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_list_latest_shouldSortNewestFirst() {
    let resolver = ContentResolver::new(Arc::new(common::fixture_store()));
    let articles = resolver.list("articles", &ListOptions::latest(10), Locale::En).await.unwrap();

    let slugs: Vec<&str> = articles.iter().filter_map(|a| a.str("slug")).collect();
    assert_eq!(slugs, vec!["new-toll-gate", "solar-rooftops"]);
}

#[tokio::test]
async fn test_unreachableStore_shouldFailWithConnectionError() {
    let store = MemoryStore::unreachable();
    let error = store.ping().await.unwrap_err();
    assert!(error.is_transient());

    let resolver = ContentResolver::new(Arc::new(store));
    assert!(resolver.global("site-settings", Locale::En).await.is_err());
}
