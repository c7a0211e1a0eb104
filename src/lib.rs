/*!
 * # parksite
 *
 * Content and contact backend for an industrial park marketing site.
 *
 * ## Features
 *
 * - Locale-aware content resolution against a headless CMS
 *   (`en`, `id`, `zh`; per-field fallback to the default locale)
 * - Rich-text normalization into block descriptors, HTML and plain-text excerpts
 * - Total media URL resolution over every CMS media shape
 * - Page assembly with hardcoded fallback copy
 * - Contact form validation, SQLite persistence and notification
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `locale`: Supported locales and request negotiation
 * - `store`: Document store trait with CMS and in-memory implementations
 * - `content`: Content resolver, documents and media references
 * - `richtext`: Rich-text model, rendering and text extraction
 * - `pages`: Page views assembled from resolved content
 * - `contact`: Contact form handling
 * - `database`: SQLite persistence for contact submissions
 * - `server`: axum HTTP surface
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app_config;
pub mod contact;
pub mod content;
pub mod database;
pub mod errors;
pub mod locale;
pub mod pages;
pub mod richtext;
pub mod server;
pub mod store;

// Re-export main types for easier usage
pub use app_config::Config;
pub use content::{media_url, media_url_or, ContentKind, ContentResolver, Document, MediaReference};
pub use errors::{AppError, ContactError, StoreError};
pub use locale::Locale;
pub use richtext::{extract_text, render, RichTextTree};
pub use store::{DocumentStore, MemoryStore, PayloadStore};
