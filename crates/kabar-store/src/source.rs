//! The query contract every store backend satisfies.

use async_trait::async_trait;
use kabar_core::{Map, error::Error, model::Query};

/// One page of a collection read.
#[derive(Debug, Clone)]
pub struct Page {
    /// Documents on this page.
    pub docs: Vec<Map>,
    /// Total number of matching documents.
    pub total_docs: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// The page that was read (1-based).
    pub page: u64,
}

impl Page {
    /// Creates a page from the matching documents and totals.
    ///
    /// `total_pages` is always `ceil(total_docs / page_size)`; a page past
    /// the end carries empty `docs` with accurate totals.
    pub fn new(docs: Vec<Map>, total_docs: u64, page: u64, page_size: u64) -> Self {
        Self {
            docs,
            total_docs,
            total_pages: total_docs.div_ceil(page_size.max(1)),
            page,
        }
    }

}

/// A content store exposing typed collections and singleton globals.
///
/// The store owns all content documents. Callers hold no state across
/// requests; absence of a matching document is a normal outcome surfaced as
/// `Ok(None)` or an empty page, never an error.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Reads one page of the collection matching the query.
    async fn find(&self, collection: &str, query: &Query) -> Result<Page, Error>;

    /// Reads the first document of the collection matching the query.
    async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Map>, Error>;

    /// Reads a single document by id, without relation resolution.
    async fn find_by_id(&self, collection: &str, id: i64) -> Result<Option<Map>, Error>;

    /// Inserts a new document and returns it as stored.
    async fn insert(&self, collection: &str, data: Map) -> Result<Map, Error>;

    /// Applies a partial update to a document and returns it as stored.
    async fn update(&self, collection: &str, id: i64, updates: Map) -> Result<Map, Error>;

    /// Reads a singleton global document.
    async fn find_global(&self, slug: &str, depth: u8) -> Result<Option<Map>, Error>;

    /// Replaces a singleton global document.
    async fn put_global(&self, slug: &str, data: Map) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn it_computes_total_pages() {
        assert_eq!(Page::new(Vec::new(), 0, 1, 12).total_pages, 0);
        assert_eq!(Page::new(Vec::new(), 12, 1, 12).total_pages, 1);
        assert_eq!(Page::new(Vec::new(), 13, 2, 12).total_pages, 2);
        assert_eq!(Page::new(Vec::new(), 24, 9, 12).total_pages, 2);
    }
}
