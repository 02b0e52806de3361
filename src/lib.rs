pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod post;
pub mod post_index;
pub mod post_list;
pub mod post_store;
pub mod site;
pub mod text_utils;
mod test_data;

pub use error::{Error, Result};
pub use post::{PostDetail, PostMetadata};
pub use post_store::PostStore;
pub use site::Site;
