//! String utility functions for the line scanner

/// Find the start of an inline comment in a string
///
/// # Arguments
///
/// * `s` - The string to scan
/// * `prefixes` - The set of characters that can start an inline comment
///
/// # Returns
///
/// The byte offset of the comment prefix, if one is found. A prefix
/// character only counts when the character before it is whitespace, so a
/// prefix at the very start of `s` never starts a comment.
pub fn find_inline_comment(s: &str, prefixes: &str) -> Option<usize> {
    let mut was_space = false;
    for (pos, ch) in s.char_indices() {
        if was_space && prefixes.contains(ch) {
            return Some(pos);
        }
        was_space = ch.is_whitespace();
    }
    None
}

/// Strip an inline comment and any whitespace before it
///
/// # Arguments
///
/// * `s` - The string to strip
/// * `prefixes` - The set of characters that can start an inline comment
///
/// # Returns
///
/// The slice of `s` up to the comment (or all of `s` if there is none),
/// with trailing whitespace removed.
pub fn strip_inline_comment<'a>(s: &'a str, prefixes: &str) -> &'a str {
    match find_inline_comment(s, prefixes) {
        Some(pos) => s[..pos].trim_end(),
        None => s.trim_end(),
    }
}

/// Truncate a string slice to at most `max` bytes
///
/// The cut lands on a UTF-8 character boundary at or below `max`, so the
/// result is always valid text.
pub fn truncate_at_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_inline_comment() {
        assert_eq!(find_inline_comment("value ; comment", ";"), Some(6));
        assert_eq!(find_inline_comment("value;nospace", ";"), None);
        assert_eq!(find_inline_comment(";leading", ";"), None);
        assert_eq!(find_inline_comment("a # b", "#"), Some(2));
        assert_eq!(find_inline_comment("a # b", ";"), None);
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("10 ; comment", ";"), "10");
        assert_eq!(strip_inline_comment("plain value  ", ";"), "plain value");
        assert_eq!(strip_inline_comment("semi;colon", ";"), "semi;colon");
        assert_eq!(strip_inline_comment("x ; a # b", ";#"), "x");
    }

    #[test]
    fn test_truncate_at_boundary() {
        assert_eq!(truncate_at_boundary("short", 50), "short");
        assert_eq!(truncate_at_boundary("abcdef", 3), "abc");
        // multi-byte char straddling the bound is dropped whole
        assert_eq!(truncate_at_boundary("ab\u{00e9}cd", 3), "ab");
        assert_eq!(truncate_at_boundary("", 0), "");
    }
}
