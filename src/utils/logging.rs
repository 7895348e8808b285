//! Logging utilities
//!
//! Helpers that keep secrets and large payloads out of the logs

/// Maximum number of body characters written to debug logs
pub const MAX_LOGGED_BODY_CHARS: usize = 512;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, total - max_len)
    } else {
        s.to_string()
    }
}

/// Render an upstream body for debug logging
pub fn body_preview(body: &[u8]) -> String {
    truncate_content(&String::from_utf8_lossy(body), MAX_LOGGED_BODY_CHARS)
}

/// Redact a bearer token, keeping only enough to correlate log lines
pub fn redact_token(token: &str) -> String {
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    let visible: String = token.chars().take(4).collect();
    format!("{}*** ({} chars)", visible, token.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_token() {
        assert_eq!(redact_token("Bearer sk-1234567890"), "sk-1*** (13 chars)");
        assert_eq!(redact_token("ab"), "ab*** (2 chars)");
    }

    #[test]
    fn test_truncate_content_multibyte() {
        let s = "ééééé";
        assert_eq!(truncate_content(s, 2), "éé... (3 chars truncated)");
        assert_eq!(truncate_content(s, 10), s);
    }
}
