//! Request options and page objects of the query layer.

use kabar_core::{error::Error, model::Model};
use kabar_store::Page;
use serde::Serialize;

/// Who is asking: anonymous readers see published content only, editors see
/// every status. Enforcing who may hold the elevated level is the concern of
/// the access-control layer in front of the CMS, not of the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessLevel {
    /// Anonymous reader. This is the default value.
    #[default]
    Public,
    /// Authenticated editor.
    Elevated,
}

/// Sort order of an article listing; every variant is newest-first over its
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    /// Most recently published first. This is the default value.
    #[default]
    RecentlyPublished,
    /// Highest view count first.
    MostViewed,
    /// Most recently created first.
    RecentlyCreated,
}

impl ArticleSort {
    /// Returns the document field the sort applies to.
    #[inline]
    pub fn field(&self) -> &'static str {
        match self {
            ArticleSort::RecentlyPublished => "published_at",
            ArticleSort::MostViewed => "view_count",
            ArticleSort::RecentlyCreated => "created_at",
        }
    }
}

/// Filters and pagination of an article listing. All filters combine with
/// logical AND.
#[derive(Debug, Clone, Default)]
pub struct ArticleListOptions {
    /// Current page (1-based); zero is treated as the first page.
    pub page: u64,
    /// Page size; zero falls back to the default of 10.
    pub page_size: u64,
    /// Only articles in the category with this slug.
    pub category_slug: Option<String>,
    /// Only articles under the rubric with this slug.
    pub rubric_slug: Option<String>,
    /// Only articles by the author with this slug.
    pub author_slug: Option<String>,
    /// Only articles carrying the tag with this slug.
    pub tag_slug: Option<String>,
    /// Only featured articles.
    pub featured: bool,
    /// Only headline articles.
    pub headline: bool,
    /// Excludes a single article id, to keep a headline out of a secondary
    /// list.
    pub exclude_id: Option<i64>,
    /// Sort order.
    pub sort: ArticleSort,
    /// Access level of the caller.
    pub access: AccessLevel,
}

/// One page of typed items with the pager totals the templates render.
#[derive(Debug, Clone, Serialize)]
pub struct ContentPage<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// The page that was read (1-based).
    pub current_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Total number of matching items.
    pub total_items: u64,
}

impl<T> ContentPage<T> {
    /// An empty first page with zero totals.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_items: 0,
        }
    }
}

impl<T: Model> ContentPage<T> {
    /// Converts a raw store page into typed items.
    pub(crate) fn try_from_page(page: Page) -> Result<Self, Error> {
        let mut items = Vec::with_capacity(page.docs.len());
        for doc in page.docs {
            items.push(T::try_from_map(doc)?);
        }
        Ok(Self {
            items,
            current_page: page.page,
            total_pages: page.total_pages,
            total_items: page.total_docs,
        })
    }
}
