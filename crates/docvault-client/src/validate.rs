//! Client-side validation — preconditions checked before any request is
//! issued. Messages here are shown to the user verbatim.

use crate::error::ClientError;
use crate::types::{GovernmentIdKind, PendingFile};

/// Maximum accepted upload size: 10 MiB exactly.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Mime types the vault accepts for upload.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Check a picked file against the size and type limits.
///
/// # Errors
///
/// Returns `ClientError::Validation` with a user-facing message when the
/// file is over 10 MiB or not a PDF/JPEG/PNG.
pub fn validate_file(file: &PendingFile) -> Result<(), ClientError> {
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ClientError::Validation(
            "File size should be less than 10MB".to_owned(),
        ));
    }
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ClientError::Validation(
            "Only PDF, JPG and PNG files are allowed".to_owned(),
        ));
    }
    Ok(())
}

/// Check an upload submission: a file must be selected and the title must
/// be non-empty (whitespace does not count).
///
/// # Errors
///
/// Returns `ClientError::Validation` describing the missing field, or the
/// file-level error from [`validate_file`].
pub fn validate_upload(file: Option<&PendingFile>, title: &str) -> Result<(), ClientError> {
    let Some(file) = file else {
        return Err(ClientError::Validation(
            "Please select a file to upload".to_owned(),
        ));
    };
    if title.trim().is_empty() {
        return Err(ClientError::Validation(
            "Please enter a document title".to_owned(),
        ));
    }
    validate_file(file)
}

/// PAN format: five uppercase letters, four digits, one uppercase letter.
pub fn is_valid_pan(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Aadhaar format: exactly twelve decimal digits.
pub fn is_valid_aadhaar(value: &str) -> bool {
    value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a government-id value for the given kind.
///
/// # Errors
///
/// Returns `ClientError::Validation` with a user-facing message when the
/// value does not match the kind's format.
pub fn validate_government_id(kind: GovernmentIdKind, value: &str) -> Result<(), ClientError> {
    match kind {
        GovernmentIdKind::Aadhaar if is_valid_aadhaar(value) => Ok(()),
        GovernmentIdKind::Aadhaar => Err(ClientError::Validation(
            "Please enter a valid 12-digit Aadhaar number".to_owned(),
        )),
        GovernmentIdKind::Pan if is_valid_pan(value) => Ok(()),
        GovernmentIdKind::Pan => Err(ClientError::Validation(
            "Please enter a valid PAN (e.g. ABCDE1234F)".to_owned(),
        )),
    }
}
