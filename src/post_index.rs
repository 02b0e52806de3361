use std::collections::HashMap;
use std::ffi::OsString;
use std::{fs, io};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use spdlog::{debug, info};

use crate::config::{Config, Defaults};
use crate::content::extract_metadata;
use crate::error::{Error, Result};
use crate::post::PostMetadata;
use crate::post_list::collect;

/// Collects every post under `root` and extracts its metadata.
///
/// Fails on the first unreadable document and when two documents share a slug.
/// The returned entries follow the traversal order of [`collect`].
pub fn build_index(root: &Path, defaults: &Defaults) -> Result<Vec<PostMetadata>> {
    let files = collect(root)?;
    info!("Found {} posts in {}", files.len(), root.display());

    let posts = files.par_iter()
        .map(|file| {
            debug!("Extracting metadata from {}", file.display());
            extract_metadata(file, defaults)
        })
        .collect::<Result<Vec<_>>>()?;

    check_unique_slugs(&files, &posts)?;
    Ok(posts)
}

fn check_unique_slugs(files: &[PathBuf], posts: &[PostMetadata]) -> Result<()> {
    let mut seen: HashMap<&str, &PathBuf> = HashMap::new();
    for (file, post) in files.iter().zip(posts) {
        if let Some(first) = seen.insert(post.path.as_str(), file) {
            return Err(Error::DuplicateSlug {
                slug: post.path.clone(),
                first: first.clone(),
                second: file.clone(),
            });
        }
    }
    Ok(())
}

/// Builds the index of `config.paths.content_dir` and overwrites
/// `config.paths.index_file` with it. Nothing is written when the build fails.
pub fn build(config: &Config) -> Result<Vec<PostMetadata>> {
    let posts = build_index(&config.paths.content_dir, &config.defaults)?;
    write_index(&config.paths.index_file, &posts)?;
    info!("Wrote {} entries to {}", posts.len(), config.paths.index_file.display());
    Ok(posts)
}

pub fn to_json(posts: &[PostMetadata]) -> Result<String> {
    serde_json::to_string_pretty(posts).map_err(Error::IndexSerialize)
}

pub fn from_json(index_file: &Path, json: &str) -> Result<Vec<PostMetadata>> {
    serde_json::from_str(json)
        .map_err(|source| Error::IndexArtifactCorrupt { path: index_file.to_path_buf(), source })
}

/// Writes next to the target first and renames over it, so readers never see
/// a half written index.
pub fn write_index(index_file: &Path, posts: &[PostMetadata]) -> Result<()> {
    let json = to_json(posts)?;
    let write_err = |source: io::Error| Error::IndexWrite { path: index_file.to_path_buf(), source };

    if let Some(parent) = index_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_file = tmp_path(index_file);
    let written = fs::write(&tmp_file, json).and_then(|_| fs::rename(&tmp_file, index_file));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_file);
        return Err(write_err(source));
    }
    Ok(())
}

pub fn read_index(index_file: &Path) -> Result<Vec<PostMetadata>> {
    let json = fs::read_to_string(index_file)
        .map_err(|source| Error::IndexArtifactMissing { path: index_file.to_path_buf(), source })?;
    from_json(index_file, &json)
}

fn tmp_path(index_file: &Path) -> PathBuf {
    let mut file_name = index_file.file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("posts.json"));
    file_name.push(".tmp");
    index_file.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::{Paths, NO_DATE};
    use crate::test_data::{POST_DATA, POST_DATA_UNTITLED};

    use super::*;

    fn write_post(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(dir: &TempDir) -> Config {
        Config {
            paths: Paths {
                content_dir: dir.path().join("blog"),
                index_file: dir.path().join("data").join("posts.json"),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_one_entry_per_document() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("blog");
        write_post(&root, "2024/2024-01/2024-01-15-syntax-error.md", POST_DATA);
        write_post(&root, "2024/2024-02/2024-02-03-hello.md", "# Hello\nWorld");
        write_post(&root, "2023/notes.md", POST_DATA_UNTITLED);
        write_post(&root, "2023/image.png", "not markdown");

        let posts = build_index(&root, &Defaults::default()).unwrap();
        let mut slugs: Vec<&str> = posts.iter().map(|p| p.path.as_str()).collect();
        slugs.sort();
        assert_eq!(slugs, vec!["2024-01-15-syntax-error", "2024-02-03-hello", "notes"]);

        let notes = posts.iter().find(|p| p.path == "notes").unwrap();
        assert_eq!(notes.date, NO_DATE);
        assert_eq!(notes.description, "Nothing big happened, just reading.");
    }

    #[test]
    fn test_build_writes_index() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        write_post(&config.paths.content_dir, "2024/2024-02/2024-02-03-hello.md", "# Hello\nWorld");

        let posts = build(&config).unwrap();
        let stored = read_index(&config.paths.index_file).unwrap();
        assert_eq!(posts, stored);
        assert!(!tmp_path(&config.paths.index_file).exists());

        let json = fs::read_to_string(&config.paths.index_file).unwrap();
        assert_eq!(json, r#"[
  {
    "title": "Hello",
    "description": "World",
    "date": "2024-02-03",
    "path": "2024-02-03-hello"
  }
]"#);
    }

    #[test]
    fn test_build_overwrites_previous_index() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        write_post(&config.paths.content_dir, "a.md", "# A");
        build(&config).unwrap();

        fs::remove_file(config.paths.content_dir.join("a.md")).unwrap();
        write_post(&config.paths.content_dir, "b.md", "# B");
        build(&config).unwrap();

        let stored = read_index(&config.paths.index_file).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].path, "b");
    }

    #[test]
    fn test_missing_root_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);

        let err = build(&config).unwrap_err();
        assert!(matches!(err, Error::ContentRootUnavailable { .. }));
        assert!(!config.paths.index_file.exists());
    }

    #[test]
    fn test_unreadable_document_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        write_post(&config.paths.content_dir, "2024/2024-02/2024-02-03-hello.md", "# Hello\nWorld");
        let broken = config.paths.content_dir.join("2024/2024-02/2024-02-04-broken.md");
        fs::write(&broken, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let err = build(&config).unwrap_err();
        match err {
            Error::DocumentUnreadable { path, .. } => assert_eq!(path, broken),
            e => panic!("unexpected error {}", e),
        }
        assert!(!config.paths.index_file.exists());
        assert!(!tmp_path(&config.paths.index_file).exists());
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory where the index should go makes the rename fail
        let index_file = dir.path().join("posts.json");
        fs::create_dir_all(index_file.join("taken")).unwrap();

        let err = write_index(&index_file, &[]).unwrap_err();
        assert!(matches!(err, Error::IndexWrite { .. }));
        assert!(!tmp_path(&index_file).exists());
        assert!(index_file.join("taken").is_dir());
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        write_post(&config.paths.content_dir, "2024/01/same.md", "# One");
        write_post(&config.paths.content_dir, "2024/02/same.md", "# Two");

        let err = build(&config).unwrap_err();
        match err {
            Error::DuplicateSlug { slug, .. } => assert_eq!(slug, "same"),
            e => panic!("unexpected error {}", e),
        }
        assert!(!config.paths.index_file.exists());
    }

    #[test]
    fn test_round_trip() {
        let posts = vec![
            PostMetadata {
                title: "Hello".to_string(),
                description: "".to_string(),
                date: NO_DATE.to_string(),
                category: None,
                path: "hello".to_string(),
            },
            PostMetadata {
                title: "\"Quoted\" title".to_string(),
                description: "line\nbreak".to_string(),
                date: "2024-01-15".to_string(),
                category: Some("dev".to_string()),
                path: "2024-01-15-quoted".to_string(),
            },
        ];
        let json = to_json(&posts).unwrap();
        let parsed = from_json(Path::new("posts.json"), &json).unwrap();
        assert_eq!(parsed, posts);
    }

    #[test]
    fn test_read_missing_and_corrupt() {
        let dir = TempDir::new().unwrap();
        let index_file = dir.path().join("posts.json");
        assert!(matches!(read_index(&index_file).unwrap_err(), Error::IndexArtifactMissing { .. }));

        fs::write(&index_file, "[{\"title\": ").unwrap();
        assert!(matches!(read_index(&index_file).unwrap_err(), Error::IndexArtifactCorrupt { .. }));
    }
}
