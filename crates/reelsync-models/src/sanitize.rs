//! Free-text cleanup for titles and descriptions.

use std::sync::OnceLock;

use regex::Regex;

/// Anything that is not a word character, whitespace or a period.
static DISALLOWED: OnceLock<Regex> = OnceLock::new();

fn disallowed() -> &'static Regex {
    DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s.]").expect("valid sanitizer pattern"))
}

/// Strip emoji, punctuation and symbols from `text`.
///
/// Word characters (Unicode letters, digits, `_`), whitespace and `.` are
/// kept in their original order.
pub fn clean_text(text: &str) -> String {
    disallowed().replace_all(text, "").into_owned()
}
