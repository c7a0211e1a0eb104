/*!
 * Database module for persistent storage of contact submissions.
 *
 * This module provides SQLite-based persistence for:
 * - Contact form submissions, one row per accepted form
 * - Notification outcome per submission
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{ContactRecord, NotificationStatus};
pub use repository::Repository;
