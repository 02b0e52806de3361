use std::fs;
use std::path::PathBuf;

use spdlog::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::post::{PostDetail, PostMetadata};
use crate::post_index::read_index;
use crate::post_list::PostList;

/// Read side of the blog: post listings from the index and single posts from
/// the content tree. Nothing is cached, every call goes back to disk.
pub struct PostStore {
    pub content_dir: PathBuf,
    pub index_file: PathBuf,
}

impl PostStore {
    pub fn new<C: Into<PathBuf>, I: Into<PathBuf>>(content_dir: C, index_file: I) -> PostStore {
        PostStore {
            content_dir: content_dir.into(),
            index_file: index_file.into(),
        }
    }

    pub fn from_config(config: &Config) -> PostStore {
        Self::new(config.paths.content_dir.clone(), config.paths.index_file.clone())
    }

    /// All posts, newest first.
    ///
    /// Dates are compared as plain strings, so the "no date" placeholder lands
    /// wherever its text sorts. Posts with the same date keep their index order.
    pub fn list_all(&self) -> Result<Vec<PostMetadata>> {
        let mut posts = read_index(&self.index_file)?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    pub fn get_detail(&self, slug: &str) -> Result<PostDetail> {
        let post_list = PostList::new(self.content_dir.clone());
        let file_path = post_list.find(slug)?
            .ok_or_else(|| Error::SlugNotFound { slug: slug.to_string() })?;
        debug!("Post {} found at {}", slug, file_path.display());

        let metadata = self.list_all()?
            .into_iter()
            .find(|post| post.path == slug)
            .ok_or_else(|| Error::MetadataInconsistent { slug: slug.to_string() })?;

        let content = fs::read_to_string(&file_path)
            .map_err(|source| Error::DocumentUnreadable { path: file_path.clone(), source })?;

        Ok(PostDetail {
            metadata,
            content,
        })
    }
}
