/*!
 * Error types for the parksite application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Malformed CMS content is deliberately absent from this taxonomy: the
 * normalizers degrade to empty values instead of failing.
 */

use thiserror::Error;

/// Errors that can occur when reading from the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error when making a store request fails
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a store response fails
    #[error("Failed to parse store response: {0}")]
    ParseError(String),

    /// Error returned by the store itself
    #[error("Store responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the store
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl StoreError {
    /// Whether the failure happened before the store answered.
    ///
    /// Only these are worth retrying; an answer is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::ConnectionError(_))
    }
}

/// Errors that can occur while accepting a contact form submission
#[derive(Error, Debug)]
pub enum ContactError {
    /// The body is not a JSON object
    #[error("Invalid submission payload: {0}")]
    InvalidPayload(String),

    /// A required field was absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The email address does not look like one
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The submission could not be stored
    #[error("Failed to persist submission: {0}")]
    Persistence(String),

    /// The notification could not be dispatched
    #[error("Failed to send notification: {0}")]
    Notification(String),
}

impl ContactError {
    /// HTTP status code reported to the form
    pub fn status_code(&self) -> u16 {
        match self {
            ContactError::InvalidPayload(_) | ContactError::MissingField(_) | ContactError::InvalidEmail(_) => 400,
            ContactError::Persistence(_) | ContactError::Notification(_) => 500,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from the contact form
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Requested locale is not one of the supported ones
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
