use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::database::ContactRecord;
use crate::errors::ContactError;
use crate::locale::Locale;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Raw form payload
///
/// Every field is optional at this stage so that a missing required field
/// is reported by name instead of as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub domicile: Option<String>,
    pub building_size: Option<String>,
    pub service_type: Option<String>,
    pub message: Option<String>,
}

/// A submission that passed validation, with fields trimmed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domicile: Option<String>,
    pub building_size: Option<String>,
    pub service_type: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Parse a request body
    pub fn from_json(body: &[u8]) -> Result<Self, ContactError> {
        serde_json::from_slice(body).map_err(|e| ContactError::InvalidPayload(e.to_string()))
    }

    /// Check required fields and the email shape
    pub fn validate(&self) -> Result<ValidSubmission, ContactError> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        let phone = required(&self.phone, "phone")?;

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(ContactError::InvalidEmail(email));
        }

        Ok(ValidSubmission {
            name,
            email,
            phone,
            domicile: optional(&self.domicile),
            building_size: optional(&self.building_size),
            service_type: optional(&self.service_type),
            message: optional(&self.message),
        })
    }
}

impl ValidSubmission {
    /// New pending database record for this submission
    pub fn to_record(&self, locale: Locale) -> ContactRecord {
        let mut record = ContactRecord::new(&self.name, &self.email, &self.phone, locale.code());
        record.domicile = self.domicile.clone();
        record.building_size = self.building_size.clone();
        record.service_type = self.service_type.clone();
        record.message = self.message.clone();
        record
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ContactError> {
    optional(value).ok_or(ContactError::MissingField(field))
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
