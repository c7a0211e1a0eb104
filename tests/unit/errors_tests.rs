/*!
 * Tests for error types and conversions
 */

use parksite::errors::{AppError, ContactError, StoreError};

#[test]
fn test_storeError_apiError_shouldDisplayStatusAndMessage() {
    let error = StoreError::ApiError {
        status_code: 503,
        message: "maintenance".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("maintenance"));
}

#[test]
fn test_storeError_connectionError_shouldDisplayCorrectly() {
    let error = StoreError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_contactError_missingField_shouldNameField() {
    let error = ContactError::MissingField("email");
    assert_eq!(error.to_string(), "Missing required field: email");
    assert_eq!(error.status_code(), 400);
}

#[test]
fn test_contactError_invalidPayload_shouldBeClientError() {
    assert_eq!(ContactError::InvalidPayload("eof".to_string()).status_code(), 400);
    assert_eq!(ContactError::Notification("smtp".to_string()).status_code(), 500);
}

#[test]
fn test_appError_fromStoreError_shouldWrap() {
    let error: AppError = StoreError::AuthenticationError("bad key".to_string()).into();
    assert!(matches!(error, AppError::Store(_)));
    assert!(error.to_string().contains("bad key"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("surprise").into();
    assert!(matches!(error, AppError::Unknown(ref m) if m == "surprise"));
}
