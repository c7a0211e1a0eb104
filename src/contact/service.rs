use log::{error, info, warn};
use serde_json::{json, Value};
use std::sync::Arc;

use super::form::ContactSubmission;
use super::notifier::Notifier;
use crate::database::{NotificationStatus, Repository};
use crate::errors::ContactError;
use crate::locale::Locale;

/// Message returned for server-side failures; details stay in the log
const INTERNAL_ERROR_MESSAGE: &str = "Failed to submit the form. Please try again later.";

/// Status code and JSON body answered to the form
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub status: u16,
    pub body: Value,
}

impl SubmissionResult {
    fn accepted(id: &str) -> Self {
        Self {
            status: 200,
            body: json!({"success": true, "id": id}),
        }
    }

    fn rejected(err: &ContactError) -> Self {
        let status = err.status_code();
        let message = if status >= 500 {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            err.to_string()
        };

        Self {
            status,
            body: json!({"success": false, "error": message}),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Id of the stored record on success
    pub fn id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }
}

/// Validates, persists and forwards contact submissions
#[derive(Debug, Clone)]
pub struct ContactService {
    repository: Repository,
    notifier: Arc<dyn Notifier>,
}

impl ContactService {
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self { repository, notifier }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Handle a raw request body
    pub async fn submit_json(&self, body: &[u8], locale: Locale) -> SubmissionResult {
        match ContactSubmission::from_json(body) {
            Ok(submission) => self.submit(&submission, locale).await,
            Err(e) => {
                warn!("Rejected contact submission: {}", e);
                SubmissionResult::rejected(&e)
            }
        }
    }

    /// Handle a parsed submission
    pub async fn submit(&self, submission: &ContactSubmission, locale: Locale) -> SubmissionResult {
        match self.accept(submission, locale).await {
            Ok(id) => SubmissionResult::accepted(&id),
            Err(e) if e.status_code() >= 500 => {
                error!("Contact submission failed: {}", e);
                SubmissionResult::rejected(&e)
            }
            Err(e) => {
                warn!("Rejected contact submission: {}", e);
                SubmissionResult::rejected(&e)
            }
        }
    }

    async fn accept(&self, submission: &ContactSubmission, locale: Locale) -> Result<String, ContactError> {
        let valid = submission.validate()?;
        let record = valid.to_record(locale);

        self.repository
            .insert_submission(&record)
            .await
            .map_err(|e| ContactError::Persistence(format!("{:#}", e)))?;
        info!("Stored contact submission {} ({})", record.id, locale);

        let status = match self.notifier.notify(&record).await {
            Ok(true) => NotificationStatus::Sent,
            Ok(false) => NotificationStatus::Skipped,
            Err(e) => {
                warn!("Notification for submission {} failed: {}", record.id, e);
                NotificationStatus::Failed
            }
        };

        // The submission is already stored; a bookkeeping failure only costs the status
        if let Err(e) = self.repository.mark_notification(&record.id, status).await {
            warn!("Could not record notification status for {}: {:#}", record.id, e);
        }

        Ok(record.id)
    }
}
