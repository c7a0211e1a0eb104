/*!
 * Common test utilities for the parksite test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use parksite::app_config::LocaleConfig;
use parksite::contact::{ContactService, DisabledNotifier, Notifier};
use parksite::content::ContentResolver;
use parksite::database::Repository;
use parksite::pages::PageContext;
use parksite::server::AppState;
use parksite::store::MemoryStore;

/// Route test logs through env_logger; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Path to the bundled fixture site
pub fn fixtures_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push("site.json");
    path
}

/// Memory store loaded with the bundled fixture site
pub fn fixture_store() -> MemoryStore {
    MemoryStore::from_file(fixtures_path()).expect("fixture site should load")
}

/// Page context over a store, without a media base URL
pub fn page_context(store: &MemoryStore) -> PageContext {
    PageContext::new(ContentResolver::new(Arc::new(store.clone())), "")
}

/// Contact service over an in-memory database
pub fn contact_service(notifier: Arc<dyn Notifier>) -> ContactService {
    let repository = Repository::new_in_memory().expect("in-memory database");
    ContactService::new(repository, notifier)
}

/// Application state over a store with default locales and no notifications
pub fn test_state(store: &MemoryStore) -> AppState {
    AppState::new(
        page_context(store),
        contact_service(Arc::new(DisabledNotifier)),
        LocaleConfig::default(),
    )
}
