//! Public-site query layer for the `kabar` content platform.
//!
//! [`ContentClient`] turns high-level content requests ("published articles
//! in this category, page 3", "articles related to this one", a free-text
//! search) into store queries and typed results. It holds no state, caches
//! nothing and never mutates content except for the explicit view-count
//! increment; access control and rendering live on either side of it.

mod client;
mod options;

pub use client::ContentClient;
pub use options::{AccessLevel, ArticleListOptions, ArticleSort, ContentPage};
