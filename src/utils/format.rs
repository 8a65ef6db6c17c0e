//! Formatting utilities.

/// Format a byte count as a human-readable size, in binary units.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KIB * KIB * KIB {
        format!("{:.1} GB", b / (KIB * KIB * KIB))
    } else if b >= KIB * KIB {
        format!("{:.1} MB", b / (KIB * KIB))
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a [0, 1] score as a whole percentage.
pub fn format_score(score: f64) -> String {
    format!("{:.0}%", (score.clamp(0.0, 1.0) * 100.0).round())
}
