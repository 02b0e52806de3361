use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

pub const POST_EXTENSION: &str = ".md";

/// Markdown files of a content tree, e.g. `blog/2024/2024-01/*.md`.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new<P: Into<PathBuf>>(root_dir: P) -> PostList {
        PostList { root_dir: root_dir.into() }
    }

    /// Every `.md` file below the root, in any depth of subdirectories.
    /// Siblings are visited in file name order.
    pub fn retrieve_files(&self) -> Result<Vec<PathBuf>> {
        let mut posts = vec![];
        for entry in self.walk() {
            let entry = entry?;
            if Self::is_post(&entry) {
                posts.push(entry.into_path());
            }
        }
        Ok(posts)
    }

    /// First post file whose stem is `slug`.
    pub fn find(&self, slug: &str) -> Result<Option<PathBuf>> {
        for entry in self.walk() {
            let entry = entry?;
            if Self::is_post(&entry) && slug_of(entry.path()).as_deref() == Some(slug) {
                return Ok(Some(entry.into_path()));
            }
        }
        Ok(None)
    }

    fn walk(&self) -> impl Iterator<Item = Result<DirEntry>> + '_ {
        WalkDir::new(&self.root_dir)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| entry.map_err(|e| self.unavailable(e)))
    }

    fn is_post(entry: &DirEntry) -> bool {
        entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(|name| name.ends_with(POST_EXTENSION))
    }

    fn unavailable(&self, err: walkdir::Error) -> Error {
        let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root_dir.clone());
        let source = err.into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "File system loop found"));
        Error::ContentRootUnavailable { path, source }
    }
}

/// File name without the `.md` extension.
pub fn slug_of(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    file_name.strip_suffix(POST_EXTENSION).map(|stem| stem.to_string())
}

pub fn collect(root: &Path) -> Result<Vec<PathBuf>> {
    PostList::new(root).retrieve_files()
}
