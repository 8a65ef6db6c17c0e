//! Shared utility functions.
//!
//! - `citations`: plain-text answer and reference rendering
//! - `format`: Human-readable formatting (sizes, scores)
//! - `highlight`: search term highlighting
//! - `mime`: accepted upload types and MIME guessing

pub mod citations;
mod format;
pub mod highlight;
pub mod mime;

pub use citations::format_answer;
pub use format::{format_score, format_size};
pub use highlight::{highlight_terms, highlight_with};
pub use mime::{guess_from_path, is_accepted, mime_icon, ACCEPTED_MIME_TYPES};
