/*!
 * Locale-aware content access.
 *
 * - `resolver`: maps a page key and locale to one bounded store read
 * - `document`: plain-data wrapper with non-failing field accessors
 * - `media`: media reference narrowing and URL helpers
 */

pub mod document;
pub mod media;
pub mod resolver;

pub use document::Document;
pub use media::{absolutize_media_url, media_url, media_url_or, MediaReference};
pub use resolver::{ContentKind, ContentResolver, ListOptions, DEFAULT_DEPTH};
