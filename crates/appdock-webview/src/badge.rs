//! Unread-count parsing from document titles such as `"(3) Inbox"`.

/// Extract a leading `(N)` or `[N]` badge. `(99+)` counts as 99.
pub fn parse_badge(title: &str) -> Option<u32> {
    let title = title.trim_start();
    let close = match title.chars().next()? {
        '(' => ')',
        '[' => ']',
        _ => return None,
    };
    let end = title.find(close)?;
    let inner = title[1..end].trim().trim_end_matches('+');
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parenthesized_count() {
        assert_eq!(parse_badge("(3) Inbox"), Some(3));
        assert_eq!(parse_badge("  (12) Chat"), Some(12));
        assert_eq!(parse_badge("[7] Tasks"), Some(7));
        assert_eq!(parse_badge("(99+) Mail"), Some(99));
    }

    #[test]
    fn ignores_titles_without_badge() {
        assert_eq!(parse_badge("Inbox"), None);
        assert_eq!(parse_badge("(draft) Notes"), None);
        assert_eq!(parse_badge("()"), None);
        assert_eq!(parse_badge("Inbox (3)"), None);
        assert_eq!(parse_badge(""), None);
    }
}
