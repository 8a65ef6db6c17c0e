//! Shared helper functions for CLI commands.

use docsearch::local_files::ValidationError;

/// Turn client-side rejections into a single error.
pub fn rejection(errors: &[ValidationError]) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow::anyhow!(messages.join("\n"))
}

/// Shorten `s` to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Collapse runs of whitespace so excerpts print on one line.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("información pública", 10), "informa...");
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("a\n  b\tc "), "a b c");
    }

    #[test]
    fn test_rejection_joins_messages() {
        let err = rejection(&[ValidationError::NoFiles, ValidationError::EmptyInput]);
        assert_eq!(err.to_string(), "No files to upload\nInput is empty");
    }
}
