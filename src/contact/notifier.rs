use async_trait::async_trait;
use log::info;
use std::fmt::{self, Write};
use std::sync::Arc;

use crate::app_config::NotificationConfig;
use crate::database::ContactRecord;
use crate::errors::ContactError;

/// An outgoing notification about one submission
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    /// Plain-text email for the site operator
    pub fn compose(record: &ContactRecord, from: &str, to: &str) -> Self {
        let mut body = String::new();
        let rows = [
            ("Name", Some(record.name.as_str())),
            ("Email", Some(record.email.as_str())),
            ("Phone", Some(record.phone.as_str())),
            ("Domicile", record.domicile.as_deref()),
            ("Building size", record.building_size.as_deref()),
            ("Service type", record.service_type.as_deref()),
            ("Locale", Some(record.locale.as_str())),
        ];
        for (label, value) in rows {
            let _ = writeln!(body, "{}: {}", label, value.unwrap_or("-"));
        }
        if let Some(message) = &record.message {
            let _ = write!(body, "\n{}\n", message);
        }

        Self {
            to: to.to_string(),
            from: from.to_string(),
            reply_to: record.email.clone(),
            subject: format!("New inquiry from {}", record.name),
            body,
        }
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.subject)
    }
}

/// Forwards accepted submissions
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Dispatch one notification
    ///
    /// # Returns
    /// * `Ok(true)` - The notification was handed off
    /// * `Ok(false)` - Notifications are turned off
    async fn notify(&self, record: &ContactRecord) -> Result<bool, ContactError>;
}

/// Writes the composed message to the log instead of a mail transport
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
    recipient: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, record: &ContactRecord) -> Result<bool, ContactError> {
        let message = NotificationMessage::compose(record, &self.sender, &self.recipient);
        info!("Notification {}\n{}", message, message.body);
        Ok(true)
    }
}

/// Drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, _record: &ContactRecord) -> Result<bool, ContactError> {
        Ok(false)
    }
}

/// Notifier matching the configuration
pub fn from_config(config: &NotificationConfig) -> Arc<dyn Notifier> {
    if config.enabled && !config.recipient.trim().is_empty() {
        Arc::new(LogNotifier::new(&config.sender, &config.recipient))
    } else {
        Arc::new(DisabledNotifier)
    }
}
