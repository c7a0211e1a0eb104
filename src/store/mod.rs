/*!
 * Document store implementations.
 *
 * The headless CMS is consumed as a passive document store: read one
 * localized document by key, given a locale and a relationship depth.
 * - `payload`: REST client for a Payload-style CMS
 * - `memory`: in-process store used for tests and offline fixtures
 */

use async_trait::async_trait;
use log::info;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::CmsConfig;
use crate::errors::StoreError;
use crate::locale::Locale;

/// Sort direction prefix understood by the store (`-publishedAt`)
const DESCENDING_PREFIX: char = '-';

/// Equality filter on one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Field name, dotted paths allowed
    pub field: String,
    /// Value the field must equal
    pub equals: String,
}

/// Query against a collection
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    /// Collection slug
    pub collection: String,
    /// Optional equality filter
    pub filter: Option<FieldFilter>,
    /// Sort field, `-` prefix for descending
    pub sort: Option<String>,
    /// Maximum number of documents
    pub limit: Option<usize>,
    /// Requested locale
    pub locale: Locale,
    /// Relationship expansion depth
    pub depth: u8,
}

impl FindQuery {
    /// Create an unfiltered query for a collection
    pub fn new(collection: impl Into<String>, locale: Locale, depth: u8) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            sort: None,
            limit: None,
            locale,
            depth,
        }
    }

    /// Restrict to documents whose field equals the value
    pub fn filter(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    /// Set the sort field
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Cap the number of documents
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Split a sort spec into field name and descending flag
pub fn parse_sort(sort: &str) -> (&str, bool) {
    match sort.strip_prefix(DESCENDING_PREFIX) {
        Some(field) => (field, true),
        None => (sort, false),
    }
}

/// Common trait for all document stores
///
/// Implementations perform per-field fallback to the default locale
/// themselves; callers never negotiate locales against the store.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Read a global document by slug
    ///
    /// # Returns
    /// * `Ok(None)` - The global does not exist
    async fn find_global(&self, slug: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError>;

    /// Read documents from a collection, in store order unless sorted
    async fn find(&self, query: &FindQuery) -> Result<Vec<Value>, StoreError>;

    /// Read one collection document by id
    async fn find_by_id(&self, collection: &str, id: &str, locale: Locale, depth: u8) -> Result<Option<Value>, StoreError>;

    /// Check that the store answers
    async fn ping(&self) -> Result<(), StoreError>;
}

pub mod memory;
pub mod payload;

pub use memory::MemoryStore;
pub use payload::PayloadStore;

/// Store selected by configuration: the fixture file when set, otherwise the CMS
pub fn from_config(config: &CmsConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.fixtures_path {
        Some(path) => {
            info!("Serving content from fixtures {:?}", path);
            Ok(Arc::new(MemoryStore::from_file(path)?))
        }
        None => {
            info!("Serving content from CMS at {}", config.endpoint);
            Ok(Arc::new(PayloadStore::from_config(config)?))
        }
    }
}
