use std::io;
use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Content root {} is not available: {source}", .path.display())]
    ContentRootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read post {}: {source}", .path.display())]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse markdown of {}: {reason}", .path.display())]
    MarkdownParse {
        path: PathBuf,
        reason: String,
    },

    #[error("Slug {slug} is used by both {} and {}", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Could not serialize post index: {0}")]
    IndexSerialize(#[source] serde_json::Error),

    #[error("Could not write post index {}: {source}", .path.display())]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Post index {} is missing: {source}", .path.display())]
    IndexArtifactMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Post index {} is corrupt: {source}", .path.display())]
    IndexArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Post not found: {slug}")]
    SlugNotFound { slug: String },

    #[error("Post {slug} exists but has no entry in the post index, rebuild the index")]
    MetadataInconsistent { slug: String },
}

impl Error {
    /// True for the errors a renderer should turn into a "not found" page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SlugNotFound { .. } | Error::MetadataInconsistent { .. })
    }
}
