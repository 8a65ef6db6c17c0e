//! MIME type helpers for uploadable documents.

use std::path::Path;

pub const PDF: &str = "application/pdf";
pub const PLAIN_TEXT: &str = "text/plain";

/// MIME types the backend can ingest.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[PDF, PLAIN_TEXT];

/// Whether `mime` is exactly one of the accepted upload types.
pub fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Guess a MIME type from a file name's extension.
///
/// Unknown extensions map to `application/octet-stream`.
pub fn guess_from_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Get an icon string for a MIME type.
pub fn mime_icon(mime: &str) -> &'static str {
    match mime {
        PDF => "[pdf]",
        PLAIN_TEXT => "[txt]",
        m if m.starts_with("image/") => "[img]",
        m if m.starts_with("text/") => "[txt]",
        _ => "[---]",
    }
}
