/*!
 * Content resolution.
 *
 * Maps `(kind, key, locale)` to exactly one document-store call with a
 * bounded relationship depth. Locale fallback is the store's job; this
 * layer passes the requested locale through untouched.
 */

use log::debug;
use serde_json::Value;
use std::sync::Arc;

use super::document::Document;
use crate::app_config::MAX_DEPTH;
use crate::errors::StoreError;
use crate::locale::Locale;
use crate::store::{DocumentStore, FieldFilter, FindQuery};

/// Relationship depth used unless configured lower
pub const DEFAULT_DEPTH: u8 = MAX_DEPTH;

/// What to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind<'a> {
    /// A global document by slug
    Global { slug: &'a str },
    /// First collection document whose field equals the value
    CollectionByFilter { collection: &'a str, field: &'a str, value: &'a str },
    /// A collection document by id
    CollectionById { collection: &'a str, id: &'a str },
}

/// Options for listing a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Equality filter
    pub filter: Option<FieldFilter>,
    /// Sort field, `-` prefix for descending
    pub sort: Option<String>,
    /// Maximum number of documents
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Newest first by publication date, capped at `limit`
    pub fn latest(limit: usize) -> Self {
        Self {
            filter: None,
            sort: Some("-publishedAt".to_string()),
            limit: Some(limit),
        }
    }
}

/// Resolves localized documents from a document store
#[derive(Debug, Clone)]
pub struct ContentResolver {
    store: Arc<dyn DocumentStore>,
    depth: u8,
}

impl ContentResolver {
    /// Create a resolver with the default depth
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            depth: DEFAULT_DEPTH,
        }
    }

    /// Use a shallower depth; values above the maximum are clamped
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.min(MAX_DEPTH);
        self
    }

    /// Depth sent with every store call
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Resolve one document
    ///
    /// # Returns
    /// * `Ok(None)` - Nothing matches; callers answer "not found"
    /// * `Err(_)` - The store failed; fatal for the request
    pub async fn resolve(&self, kind: ContentKind<'_>, locale: Locale) -> Result<Option<Document>, StoreError> {
        debug!("Resolving {:?} for locale {}", kind, locale);

        let found = match kind {
            ContentKind::Global { slug } => self.store.find_global(slug, locale, self.depth).await?,
            ContentKind::CollectionByFilter { collection, field, value } => {
                let query = FindQuery::new(collection, locale, self.depth)
                    .filter(field, value)
                    .limit(1);
                self.store.find(&query).await?.into_iter().next()
            }
            ContentKind::CollectionById { collection, id } => {
                self.store.find_by_id(collection, id, locale, self.depth).await?
            }
        };

        Ok(found.filter(|value| !value.is_null()).map(Document::new))
    }

    /// Global by slug
    pub async fn global(&self, slug: &str, locale: Locale) -> Result<Option<Document>, StoreError> {
        self.resolve(ContentKind::Global { slug }, locale).await
    }

    /// Collection document by its `slug` field
    pub async fn by_slug(&self, collection: &str, slug: &str, locale: Locale) -> Result<Option<Document>, StoreError> {
        self.resolve(
            ContentKind::CollectionByFilter {
                collection,
                field: "slug",
                value: slug,
            },
            locale,
        )
        .await
    }

    /// Ordered documents from a collection
    pub async fn list(&self, collection: &str, options: &ListOptions, locale: Locale) -> Result<Vec<Document>, StoreError> {
        let query = FindQuery {
            collection: collection.to_string(),
            filter: options.filter.clone(),
            sort: options.sort.clone(),
            limit: options.limit,
            locale,
            depth: self.depth,
        };

        let docs = self.store.find(&query).await?;
        debug!("Listed {} documents from {}", docs.len(), collection);

        Ok(docs
            .into_iter()
            .filter(Value::is_object)
            .map(Document::new)
            .collect())
    }
}
