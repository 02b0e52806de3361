use lazy_static::lazy_static;
use regex::Regex;

/// Leading `YYYY-MM-DD` of a slug. No calendar validation is done.
pub fn date_prefix(slug: &str) -> Option<&str> {
    lazy_static! {
        static ref DATE_PREFIX_REGEX: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap();
    }

    DATE_PREFIX_REGEX.find(slug).map(|m| m.as_str())
}

/// First `max_chars` characters of `text`.
///
/// Characters are Unicode scalar values, not UTF-16 code units: an emoji or
/// any other character outside the BMP counts once here where a UTF-16 length
/// counts it twice, so such text keeps more characters than a UTF-16 cut would.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
