/*!
 * In-memory document store.
 *
 * Documents are raw JSON trees with two markers understood anywhere in the
 * tree:
 * - `{"_localized": {"id": .., "en": ..}}` - a localized field; the
 *   requested locale wins, the default locale fills gaps, else `null`
 * - `{"_ref": {"collection": "media", "id": 3}}` - a relationship; expanded
 *   while depth remains, otherwise replaced by the bare id
 *
 * The store counts requests and records the deepest depth asked for so
 * tests can observe how callers use it.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::errors::StoreError;
use crate::locale::Locale;
use crate::store::{parse_sort, DocumentStore, FindQuery};

const LOCALIZED_MARKER: &str = "_localized";
const REF_MARKER: &str = "_ref";

/// Fixture file layout
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    /// Locale used to fill untranslated fields
    #[serde(default)]
    pub default_locale: Locale,
    /// Globals keyed by slug
    #[serde(default)]
    pub globals: HashMap<String, Value>,
    /// Collections keyed by slug, documents in store order
    #[serde(default)]
    pub collections: HashMap<String, Vec<Value>>,
}

#[derive(Debug, Default)]
struct Documents {
    globals: HashMap<String, Value>,
    collections: HashMap<String, Vec<Value>>,
}

/// In-memory store with store-side locale fallback
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Document storage
    documents: Arc<RwLock<Documents>>,
    /// Fallback locale for untranslated fields
    default_locale: Locale,
    /// Whether every call fails as if the store were down
    unreachable: bool,
    /// Number of store calls served
    request_count: Arc<AtomicUsize>,
    /// Deepest relationship depth requested
    max_depth_seen: Arc<AtomicU8>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(default_locale: Locale) -> Self {
        Self {
            documents: Arc::new(RwLock::new(Documents::default())),
            default_locale,
            unreachable: false,
            request_count: Arc::new(AtomicUsize::new(0)),
            max_depth_seen: Arc::new(AtomicU8::new(0)),
        }
    }

    /// Create a store that fails every call with a connection error
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new(Locale::default())
        }
    }

    /// Create a store from parsed fixtures
    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        let store = Self::new(fixtures.default_locale);
        {
            let mut documents = store.documents.write();
            documents.globals = fixtures.globals;
            documents.collections = fixtures.collections;
        }
        store
    }

    /// Load fixtures from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures: {:?}", path))?;
        let fixtures: Fixtures = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixtures: {:?}", path))?;
        Ok(Self::from_fixtures(fixtures))
    }

    /// Insert or replace a global
    pub fn insert_global(&self, slug: impl Into<String>, document: Value) {
        self.documents.write().globals.insert(slug.into(), document);
    }

    /// Append a document to a collection
    pub fn insert_document(&self, collection: impl Into<String>, document: Value) {
        self.documents
            .write()
            .collections
            .entry(collection.into())
            .or_default()
            .push(document);
    }

    /// Number of store calls served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(AtomicOrdering::SeqCst)
    }

    /// Deepest depth any caller asked for
    pub fn max_depth_seen(&self) -> u8 {
        self.max_depth_seen.load(AtomicOrdering::SeqCst)
    }

    fn begin_request(&self, depth: u8) -> Result<(), StoreError> {
        self.request_count.fetch_add(1, AtomicOrdering::SeqCst);
        self.max_depth_seen.fetch_max(depth, AtomicOrdering::SeqCst);

        if self.unreachable {
            return Err(StoreError::ConnectionError("memory store marked unreachable".to_string()));
        }
        Ok(())
    }

    /// Resolve markers for one locale, expanding refs while depth remains
    fn resolve(&self, documents: &Documents, value: &Value, locale: Locale, depth: u8) -> Value {
        match value {
            Value::Object(map) => {
                if let Some(Value::Object(translations)) = map.get(LOCALIZED_MARKER) {
                    let chosen = translations
                        .get(locale.code())
                        .filter(|v| !v.is_null())
                        .or_else(|| translations.get(self.default_locale.code()))
                        .cloned()
                        .unwrap_or(Value::Null);
                    return self.resolve(documents, &chosen, locale, depth);
                }

                if let Some(Value::Object(reference)) = map.get(REF_MARKER) {
                    return self.resolve_ref(documents, reference, locale, depth);
                }

                let resolved: Map<String, Value> = map
                    .iter()
                    .map(|(key, v)| (key.clone(), self.resolve(documents, v, locale, depth)))
                    .collect();
                Value::Object(resolved)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve(documents, item, locale, depth))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn resolve_ref(&self, documents: &Documents, reference: &Map<String, Value>, locale: Locale, depth: u8) -> Value {
        let id = reference.get("id").cloned().unwrap_or(Value::Null);
        if depth == 0 {
            return id;
        }

        let target = reference
            .get("collection")
            .and_then(Value::as_str)
            .and_then(|collection| documents.collections.get(collection))
            .and_then(|docs| docs.iter().find(|doc| doc.get("id") == Some(&id)));

        match target {
            Some(doc) => self.resolve(documents, doc, locale, depth - 1),
            // Dangling references surface as the bare id, as a real store would
            None => id,
        }
    }
}

/// String form used for equality filters
fn filter_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Look up a dotted path such as `category.slug`
fn field_at<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(document, |current, key| current.get(key))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default()),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        // Missing values sort last
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_global(&self, slug: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError> {
        self.begin_request(depth)?;
        debug!("memory find_global {} ({}, depth {})", slug, locale, depth);

        let documents = self.documents.read();
        Ok(documents
            .globals
            .get(slug)
            .map(|doc| self.resolve(&documents, doc, locale, depth)))
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<Value>, StoreError> {
        self.begin_request(query.depth)?;
        debug!("memory find {:?}", query);

        let documents = self.documents.read();
        let Some(collection) = documents.collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<Value> = collection
            .iter()
            .map(|doc| self.resolve(&documents, doc, query.locale, query.depth))
            .filter(|doc| match &query.filter {
                Some(filter) => field_at(doc, &filter.field)
                    .and_then(filter_text)
                    .is_some_and(|text| text == filter.equals),
                None => true,
            })
            .collect();

        if let Some(sort) = &query.sort {
            let (field, descending) = parse_sort(sort);
            matches.sort_by(|a, b| {
                let ordering = compare_values(field_at(a, field), field_at(b, field));
                if descending { ordering.reverse() } else { ordering }
            });
        }

        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }

        Ok(matches)
    }

    async fn find_by_id(&self, collection: &str, id: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError> {
        self.begin_request(depth)?;

        let documents = self.documents.read();
        let found = documents
            .collections
            .get(collection)
            .and_then(|docs| {
                docs.iter()
                    .find(|doc| doc.get("id").and_then(filter_text).as_deref() == Some(id))
            })
            .map(|doc| self.resolve(&documents, doc, locale, depth));

        Ok(found)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.begin_request(0)
    }
}
