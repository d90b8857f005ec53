use crate::{
    JsonValue, Map, SharedString,
    extension::{JsonObjectExt, JsonValueExt},
};

/// Default number of documents per page.
const DEFAULT_PAGE_SIZE: u64 = 10;

/// A query against a content collection: filters, sort order, 1-based
/// pagination and a relation resolution depth.
#[derive(Debug, Clone)]
pub struct Query {
    /// Filters.
    filters: Map,
    /// Sort order as `(field, descending)` pairs.
    sort_order: Vec<(SharedString, bool)>,
    /// Current page (1-based).
    page: u64,
    /// Page size.
    page_size: u64,
    /// Relation resolution depth.
    depth: u8,
}

impl Query {
    /// Creates a new instance with the filters.
    #[inline]
    pub fn new(filters: impl Into<JsonValue>) -> Self {
        Self {
            filters: filters.into().into_map_opt().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Adds a key-value pair to the query filters.
    #[inline]
    pub fn add_filter(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.filters.upsert(key, value);
    }

    /// Moves all entries from `filters` into `self`.
    #[inline]
    pub fn append_filters(&mut self, filters: &mut Map) {
        self.filters.append(filters);
    }

    /// Sets the sort order, replacing a previous order on the same field.
    pub fn set_sort_order(&mut self, field: impl Into<SharedString>, descending: bool) {
        let field = field.into();
        self.sort_order.retain(|(s, _)| s != &field);
        self.sort_order.push((field, descending));
    }

    /// Adds a sort with the descending order.
    #[inline]
    pub fn order_desc(&mut self, field: impl Into<SharedString>) {
        self.set_sort_order(field, true);
    }

    /// Adds a sort with the ascending order.
    #[inline]
    pub fn order_asc(&mut self, field: impl Into<SharedString>) {
        self.set_sort_order(field, false);
    }

    /// Sets the current page, clamping zero to the first page.
    #[inline]
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Sets the page size.
    #[inline]
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
    }

    /// Sets the relation resolution depth.
    #[inline]
    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    /// Returns a reference to the filters.
    #[inline]
    pub fn filters(&self) -> &Map {
        &self.filters
    }

    /// Returns the sort order.
    #[inline]
    pub fn sort_order(&self) -> &[(SharedString, bool)] {
        &self.sort_order
    }

    /// Returns the current page.
    #[inline]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[inline]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the number of documents skipped by the preceding pages.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.page_size.saturating_mul(self.page - 1)
    }

    /// Returns the relation resolution depth.
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Default for Query {
    #[inline]
    fn default() -> Self {
        Self {
            filters: Map::new(),
            sort_order: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            depth: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Query;
    use crate::json;

    #[test]
    fn it_builds_query_state() {
        let mut query = Query::new(json!({ "status": "published" }));
        query.order_desc("published_at");
        query.order_desc("view_count");
        query.order_asc("view_count");
        query.set_page(3);
        query.set_page_size(12);
        query.set_depth(2);

        assert_eq!(query.filters().len(), 1);
        let order = query.sort_order();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0], ("published_at".into(), true));
        assert_eq!(order[1], ("view_count".into(), false));
        assert_eq!(query.offset(), 24);
        assert_eq!(query.depth(), 2);
    }

    #[test]
    fn it_clamps_pagination_inputs() {
        let mut query = Query::default();
        query.set_page(0);
        query.set_page_size(0);
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 1);
        assert_eq!(query.offset(), 0);
    }
}
