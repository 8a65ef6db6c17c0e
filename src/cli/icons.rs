//! Console output icons.

use console::{style, StyledObject};

use docsearch::models::RejectedBy;

/// Success checkmark icon (green ✓).
pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

/// Info/progress arrow icon (cyan →).
pub fn info() -> StyledObject<&'static str> {
    style("→").cyan()
}

/// Warning icon (yellow !).
pub fn warn() -> StyledObject<&'static str> {
    style("!").yellow()
}

/// Error icon (red ✗).
pub fn error() -> StyledObject<&'static str> {
    style("✗").red()
}

/// Bullet point.
pub fn bullet() -> StyledObject<&'static str> {
    style("•").dim()
}

/// Marker for a file that did not make it into the index.
///
/// Files the server rejected failed outright; files held back on this side
/// were never sent and only warn.
pub fn rejected(origin: RejectedBy) -> StyledObject<&'static str> {
    match origin {
        RejectedBy::Server => error(),
        RejectedBy::Client => warn(),
    }
}

/// Short dimmed label saying where a file was rejected.
pub fn origin_label(origin: RejectedBy) -> StyledObject<&'static str> {
    let label = match origin {
        RejectedBy::Client => "(not sent)",
        RejectedBy::Server => "(server)",
    };
    style(label).dim()
}
