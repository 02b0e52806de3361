use crate::content::plain_text::normalize_markdown;
use crate::text_utils::truncate_chars;

/// Lines of normalized markdown starting with one of these are not prose and
/// are left out of the excerpt.
pub const EXCERPT_DENYLIST: [&str; 9] = ["#", "```", "<", "![", "/**", "*", "const", "function", "return"];

/// Title from the first line of a post: `# Title` gives `Title`.
pub fn parse_title(first_line: &str) -> Option<&str> {
    first_line.strip_prefix('#').map(str::trim)
}

pub fn is_prose_line(line: &str) -> bool {
    !EXCERPT_DENYLIST.iter().any(|marker| line.starts_with(marker))
}

/// Plain text excerpt of a markdown body.
///
/// This is a heuristic, not a markdown stripper: the body goes through the
/// normalization pass and the surviving prose lines are joined with a space.
pub fn extract_excerpt(md_body: &str, max_chars: usize) -> Result<String, String> {
    let normalized = normalize_markdown(md_body)?;

    let prose: Vec<&str> = normalized.split('\n')
        .filter(|line| is_prose_line(line) && !line.trim().is_empty())
        .collect();
    let joined = prose.join(" ");
    let joined = joined.trim();

    if joined.is_empty() {
        return Ok(String::new());
    }
    Ok(truncate_chars(joined, max_chars).trim().to_string())
}
