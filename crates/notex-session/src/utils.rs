//! Shared utilities

/// Truncate a string to `max` characters, appending "..." if truncated.
/// Operates on Unicode char boundaries, not bytes.
pub fn truncate_chars(s: &str, max: usize) -> String {
    let mut chars = s.chars();
    let truncated: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a millisecond timestamp for display
pub fn format_millis(ms: i64) -> String {
    use chrono::{Local, TimeZone};
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_untouched() {
        assert_eq!(truncate_chars("hello", 40), "hello");
        assert_eq!(truncate_chars(&"a".repeat(40), 40), "a".repeat(40));
    }

    #[test]
    fn test_truncate_long() {
        let s = "a".repeat(41);
        assert_eq!(truncate_chars(&s, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_format_millis_invalid() {
        assert_eq!(format_millis(i64::MAX), "unknown");
    }
}
