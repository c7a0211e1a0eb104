use anyhow::Result;
use std::sync::Arc;

use crate::app_config::{Config, LocaleConfig};
use crate::contact::{notifier, ContactService};
use crate::content::ContentResolver;
use crate::database::{DatabaseConnection, Repository};
use crate::locale::Locale;
use crate::pages::PageContext;
use crate::store;

use super::error::ServerError;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub pages: PageContext,
    pub contact: ContactService,
    pub locales: Arc<LocaleConfig>,
}

impl AppState {
    pub fn new(pages: PageContext, contact: ContactService, locales: LocaleConfig) -> Self {
        Self {
            pages,
            contact,
            locales: Arc::new(locales),
        }
    }

    /// Wire the store, database and notifier described by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = store::from_config(&config.cms)?;
        let resolver = ContentResolver::new(store).with_depth(config.cms.effective_depth());
        let pages = PageContext::new(resolver, config.cms.media_base_url.clone());

        let db = DatabaseConnection::open(config.database.path.as_deref())?;
        let contact = ContactService::new(Repository::new(db), notifier::from_config(&config.notification));

        Ok(Self::new(pages, contact, config.locales.clone()))
    }

    /// Parse a locale path segment, rejecting unpublished locales
    pub fn route_locale(&self, segment: &str) -> Result<Locale, ServerError> {
        segment
            .parse::<Locale>()
            .ok()
            .filter(|locale| self.locales.is_supported(*locale))
            .ok_or_else(|| ServerError::UnsupportedLocale(segment.to_string()))
    }
}
