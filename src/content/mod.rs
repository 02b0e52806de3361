use std::fs;
use std::path::Path;

use crate::config::Defaults;
use crate::error::{Error, Result};
use crate::post::PostMetadata;
use crate::post_list::slug_of;
use crate::text_utils::date_prefix;

pub mod parsing_utils;
pub mod plain_text;

use parsing_utils::{extract_excerpt, parse_title};

/// Reads a post file and derives its metadata.
pub fn extract_metadata(file_path: &Path, defaults: &Defaults) -> Result<PostMetadata> {
    let raw_content = fs::read_to_string(file_path)
        .map_err(|source| Error::DocumentUnreadable { path: file_path.to_path_buf(), source })?;

    extract_metadata_from_string(file_path, &raw_content, defaults)
}

/// Example of post, in `2024/2024-01/2024-01-15-syntax-error.md`
/// ```text
/// # Syntax error
/// Body of the post, the excerpt is taken from here.
/// ```
/// The title comes from the first line, the date from the file name.
pub fn extract_metadata_from_string(file_path: &Path, raw_content: &str, defaults: &Defaults) -> Result<PostMetadata> {
    let path = slug_of(file_path)
        .or_else(|| file_path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string()))
        .unwrap_or_default();

    let mut lines = raw_content.split('\n');
    let first_line = lines.next().unwrap_or_default();
    let title = parse_title(first_line)
        .map(|title| title.to_string())
        .unwrap_or_else(|| defaults.no_title.clone());

    let date = date_prefix(&path)
        .map(|date| date.to_string())
        .unwrap_or_else(|| defaults.no_date.clone());

    let body = lines.collect::<Vec<_>>().join("\n");
    let description = extract_excerpt(&body, defaults.description_max_chars)
        .map_err(|reason| Error::MarkdownParse { path: file_path.to_path_buf(), reason })?;

    Ok(PostMetadata {
        title,
        description,
        date,
        category: None,
        path,
    })
}
