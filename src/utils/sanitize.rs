//! Utilities for sanitizing error messages and untrusted filenames.
//!
//! Soft-failure messages end up inside JSON responses and persisted reports;
//! control characters are stripped and overly long messages truncated before
//! they get there. Uploaded filenames are reduced to a safe character set
//! before being echoed back as the query string.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Sanitizes an error message by removing control characters and truncating.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// cause issues when embedded in JSON payloads or displayed in logs.
///
/// # Arguments
///
/// * `message` - The error message to sanitize
///
/// # Returns
///
/// A sanitized version of the message, truncated to
/// `MAX_ERROR_MESSAGE_LENGTH` characters.
pub fn sanitize_error_message(message: &str) -> String {
    let sanitized: String = message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
                || code > 0x7F // Allow non-ASCII (UTF-8)
        })
        .collect();

    if sanitized.chars().count() > MAX_ERROR_MESSAGE_LENGTH {
        let truncated: String = sanitized.chars().take(MAX_ERROR_MESSAGE_LENGTH).collect();
        format!("{truncated}... (truncated)")
    } else {
        sanitized
    }
}

/// Reduces an uploaded filename to a safe subset.
///
/// Keeps alphanumerics, `.`, `-`, and `_`; everything else becomes `_`.
/// Leading dots are stripped so the result can never name a hidden file or
/// traverse upward.
pub fn sanitize_filename(filename: &str) -> String {
    // Only the final path component counts as the name
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}
