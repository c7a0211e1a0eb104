/*!
 * Database entity models.
 *
 * These structures map directly to database tables.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What happened to the notification for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Not attempted yet
    Pending,
    /// Handed to the notifier successfully
    Sent,
    /// The notifier reported an error
    Failed,
    /// Notifications are disabled
    Skipped,
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Sent => write!(f, "sent"),
            NotificationStatus::Failed => write!(f, "failed"),
            NotificationStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for NotificationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(NotificationStatus::Pending),
            "sent" => Ok(NotificationStatus::Sent),
            "failed" => Ok(NotificationStatus::Failed),
            "skipped" => Ok(NotificationStatus::Skipped),
            _ => Err(anyhow::anyhow!("Invalid notification status: {}", s)),
        }
    }
}

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Unique identifier (UUID v4)
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domicile: Option<String>,
    pub building_size: Option<String>,
    pub service_type: Option<String>,
    pub message: Option<String>,
    /// Locale the form was submitted from
    pub locale: String,
    pub notification_status: NotificationStatus,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// RFC 3339 timestamp of the notification attempt
    pub notified_at: Option<String>,
}

impl ContactRecord {
    /// New pending record with a fresh id and the current time
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            domicile: None,
            building_size: None,
            service_type: None,
            message: None,
            locale: locale.into(),
            notification_status: NotificationStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
            notified_at: None,
        }
    }
}
