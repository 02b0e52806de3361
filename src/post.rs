use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Summary of one markdown post, as stored in the post index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Slug of the post: the file name without the `.md` extension.
    pub path: String,
}

/// Metadata plus the raw markdown of a post, assembled on demand.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    #[serde(flatten)]
    pub metadata: PostMetadata,
    pub content: String,
}

impl Display for PostMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "path={}, date={}, category={}\ntitle={}\ndescription={}",
               self.path,
               self.date,
               self.category.as_deref().unwrap_or("-"),
               self.title,
               self.description
        )
    }
}
