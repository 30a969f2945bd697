//! Escaping for feed element text and small string utilities for logging.

use std::borrow::Cow;

/// Escape reserved XML characters in element text.
///
/// `<`, `>`, `&`, `'` and `"` become `&lt;`, `&gt;`, `&amp;`, `&apos;` and
/// `&quot;`. `/` is not reserved and is left as is.
///
/// # Arguments
///
/// * `text` - The raw text to place between an element's tags
///
/// # Returns
///
/// The escaped text, borrowing the input when nothing needs replacing.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(escape_xml("Intro & Welcome"), "Intro &amp; Welcome");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a char boundary) with an
/// ellipsis and the number of dropped bytes appended.
///
/// # Arguments
///
/// * `s` - The string to truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits, otherwise the truncated prefix followed by
/// `…(+N bytes)`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Headings on the source page are indented inside their markup; episode
/// titles are normalized so that indentation does not reach podcast players.
///
/// # Arguments
///
/// * `s` - Text collected from a scraped element
///
/// # Returns
///
/// The words of `s` joined by single spaces; an empty string if `s` is blank.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
