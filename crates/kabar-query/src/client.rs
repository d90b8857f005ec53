//! The content client: every read the public site performs.

use crate::options::{AccessLevel, ArticleListOptions, ArticleSort, ContentPage};
use kabar_core::{
    JsonValue, Map,
    error::Error,
    extension::JsonObjectExt,
    json,
    model::{Model, Query},
};
use kabar_model::{Article, Author, Category, Collection, Navigation, Rubric, SiteSettings, Tag};
use kabar_store::ContentSource;
use std::sync::Arc;

/// Page size treated as "effectively all" for taxonomy listings at this
/// site's scale.
const TAXONOMY_LIMIT: u64 = 100;

/// Default number of articles per listing page.
const DEFAULT_PAGE_SIZE: u64 = 10;

/// A stateless handle over the content store for the public site.
///
/// The client is constructed once at startup with the store it should talk
/// to and cloned wherever it is needed; each call is one independent round
/// trip. Store failures propagate unchanged, with no retry and no fallback
/// content; a missing document is a normal `None`, never an error.
#[derive(Clone)]
pub struct ContentClient {
    source: Arc<dyn ContentSource>,
}

impl ContentClient {
    /// Creates a new instance over the store.
    #[inline]
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying store.
    #[inline]
    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Lists articles matching the options, with pager totals.
    ///
    /// Public callers are always restricted to published articles; the
    /// elevated level sees every status.
    pub async fn list_articles(
        &self,
        options: &ArticleListOptions,
    ) -> Result<ContentPage<Article>, Error> {
        let mut conditions = Vec::new();
        if options.access == AccessLevel::Public {
            conditions.push(json!({ "status": "published" }));
        }
        if let Some(slug) = &options.category_slug {
            conditions.push(json!({ "categories.slug": slug }));
        }
        if let Some(slug) = &options.rubric_slug {
            conditions.push(json!({ "rubric.slug": slug }));
        }
        if let Some(slug) = &options.author_slug {
            conditions.push(json!({ "author.slug": slug }));
        }
        if let Some(slug) = &options.tag_slug {
            conditions.push(json!({ "tags.slug": slug }));
        }
        if options.featured {
            conditions.push(json!({ "is_featured": true }));
        }
        if options.headline {
            conditions.push(json!({ "is_headline": true }));
        }
        if let Some(id) = options.exclude_id {
            conditions.push(json!({ "id": { "$ne": id } }));
        }

        let mut query = Query::new(json!({ "$and": conditions }));
        query.order_desc(options.sort.field());
        query.set_page(options.page.max(1));
        query.set_page_size(if options.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            options.page_size
        });
        query.set_depth(2);
        let page = self.source.find(Article::NAME, &query).await?;
        ContentPage::try_from_page(page)
    }

    /// Looks up a published article by slug.
    #[inline]
    pub async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, Error> {
        self.article_by_slug_with(slug, AccessLevel::Public).await
    }

    /// Looks up an article by slug at the given access level.
    pub async fn article_by_slug_with(
        &self,
        slug: &str,
        access: AccessLevel,
    ) -> Result<Option<Article>, Error> {
        let mut query = Query::new(json!({ "slug": slug }));
        if access == AccessLevel::Public {
            query.add_filter("status", "published");
        }
        query.set_depth(2);
        self.find_one_as(Article::NAME, &query).await
    }

    /// Returns up to `limit` published articles sharing at least one
    /// category with the given set, never including the article itself.
    ///
    /// An empty category set matches nothing: the call returns an empty list
    /// without a store round trip.
    pub async fn related_articles(
        &self,
        article_id: i64,
        category_ids: &[i64],
        limit: u64,
    ) -> Result<Vec<Article>, Error> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let shared_category = category_ids
            .iter()
            .map(|id| json!({ "categories.id": id }))
            .collect::<Vec<_>>();
        let mut query = Query::new(json!({
            "$and": [
                { "status": "published" },
                { "id": { "$ne": article_id } },
                { "$or": shared_category },
            ],
        }));
        query.order_desc("published_at");
        query.set_page_size(limit.max(1));
        query.set_depth(1);
        let page = self.source.find(Article::NAME, &query).await?;
        ContentPage::try_from_page(page).map(|page| page.items)
    }

    /// Searches published articles whose title or excerpt contains the
    /// trimmed keyword.
    ///
    /// A blank keyword short-circuits to an empty result set without
    /// querying the store.
    pub async fn search_articles(
        &self,
        keyword: &str,
        page: u64,
        page_size: u64,
    ) -> Result<ContentPage<Article>, Error> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(ContentPage::empty());
        }
        let mut query = Query::new(json!({
            "$and": [
                { "status": "published" },
                { "$or": [
                    { "title": { "$contains": keyword } },
                    { "excerpt": { "$contains": keyword } },
                ] },
            ],
        }));
        query.order_desc("published_at");
        query.set_page(page.max(1));
        query.set_page_size(if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size });
        query.set_depth(1);
        let result = self.source.find(Article::NAME, &query).await?;
        tracing::debug!(keyword, total = result.total_docs, "article search");
        ContentPage::try_from_page(result)
    }

    /// Adds one view to an article's counter.
    ///
    /// This is a plain read-modify-write pair: concurrent increments of the
    /// same article may lose updates. The counter is approximate by design.
    pub async fn increment_view_count(&self, id: i64) -> Result<(), Error> {
        let name = Article::NAME;
        let doc = self
            .source
            .find_by_id(name, id)
            .await?
            .ok_or_else(|| Error::new(format!("no document `{id}` in `{name}`")))?;
        let view_count = doc.get_u64("view_count").unwrap_or(0) + 1;
        self.source
            .update(name, id, Map::from_entry("view_count", view_count))
            .await?;
        Ok(())
    }

    /// Lists the active categories in their configured order.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        let mut query = Query::new(json!({ "is_active": true }));
        query.order_asc("order");
        query.set_page_size(TAXONOMY_LIMIT);
        query.set_depth(1);
        self.find_all_as(Category::NAME, &query).await
    }

    /// Looks up an active category by slug.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, Error> {
        let mut query = Query::new(json!({ "slug": slug, "is_active": true }));
        query.set_depth(1);
        self.find_one_as(Category::NAME, &query).await
    }

    /// Lists the active rubrics.
    pub async fn rubrics(&self) -> Result<Vec<Rubric>, Error> {
        let mut query = Query::new(json!({ "is_active": true }));
        query.set_page_size(TAXONOMY_LIMIT);
        self.find_all_as(Rubric::NAME, &query).await
    }

    /// Looks up an active rubric by slug.
    pub async fn rubric_by_slug(&self, slug: &str) -> Result<Option<Rubric>, Error> {
        let query = Query::new(json!({ "slug": slug, "is_active": true }));
        self.find_one_as(Rubric::NAME, &query).await
    }

    /// Lists the active authors.
    pub async fn authors(&self) -> Result<Vec<Author>, Error> {
        let mut query = Query::new(json!({ "is_active": true }));
        query.set_page_size(TAXONOMY_LIMIT);
        query.set_depth(1);
        self.find_all_as(Author::NAME, &query).await
    }

    /// Looks up an active author by slug.
    pub async fn author_by_slug(&self, slug: &str) -> Result<Option<Author>, Error> {
        let mut query = Query::new(json!({ "slug": slug, "is_active": true }));
        query.set_depth(1);
        self.find_one_as(Author::NAME, &query).await
    }

    /// Lists all tags.
    pub async fn tags(&self) -> Result<Vec<Tag>, Error> {
        let mut query = Query::default();
        query.set_page_size(TAXONOMY_LIMIT);
        self.find_all_as(Tag::NAME, &query).await
    }

    /// Looks up a tag by slug.
    pub async fn tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, Error> {
        let query = Query::new(json!({ "slug": slug }));
        self.find_one_as(Tag::NAME, &query).await
    }

    /// Reads the site settings global; an unconfigured site yields the
    /// defaults.
    pub async fn site_settings(&self) -> Result<SiteSettings, Error> {
        let doc = self.source.find_global(SiteSettings::SLUG, 1).await?;
        match doc {
            Some(doc) => serde_json::from_value(JsonValue::Object(doc)).map_err(Error::from),
            None => Ok(SiteSettings::default()),
        }
    }

    /// Reads the navigation global with its menu relations resolved.
    pub async fn navigation(&self) -> Result<Navigation, Error> {
        let doc = self.source.find_global(Navigation::SLUG, 2).await?;
        match doc {
            Some(doc) => serde_json::from_value(JsonValue::Object(doc)).map_err(Error::from),
            None => Ok(Navigation::default()),
        }
    }

    async fn find_one_as<T: Model>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<T>, Error> {
        match self.source.find_one(collection, query).await? {
            Some(doc) => T::try_from_map(doc).map(Some).map_err(Error::from),
            None => Ok(None),
        }
    }

    async fn find_all_as<T: Model>(&self, collection: &str, query: &Query) -> Result<Vec<T>, Error> {
        let page = self.source.find(collection, query).await?;
        ContentPage::try_from_page(page).map(|page| page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::ContentClient;
    use crate::options::{AccessLevel, ArticleListOptions, ArticleSort};
    use async_trait::async_trait;
    use kabar_core::{Map, error::Error, json, model::Query};
    use kabar_model::{Article, Author, Category, Collection, Rubric, Tag};
    use kabar_store::{ContentSource, MemoryStore, Page};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn data(value: kabar_core::JsonValue) -> Map {
        value.as_object().expect("should be an object").clone()
    }

    /// Counts the reads that actually reach the store.
    struct CountingSource {
        store: MemoryStore,
        finds: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for CountingSource {
        async fn find(&self, collection: &str, query: &Query) -> Result<Page, Error> {
            self.finds.fetch_add(1, Ordering::Relaxed);
            self.store.find(collection, query).await
        }

        async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Map>, Error> {
            self.finds.fetch_add(1, Ordering::Relaxed);
            self.store.find_one(collection, query).await
        }

        async fn find_by_id(&self, collection: &str, id: i64) -> Result<Option<Map>, Error> {
            self.store.find_by_id(collection, id).await
        }

        async fn insert(&self, collection: &str, data: Map) -> Result<Map, Error> {
            self.store.insert(collection, data).await
        }

        async fn update(&self, collection: &str, id: i64, updates: Map) -> Result<Map, Error> {
            self.store.update(collection, id, updates).await
        }

        async fn find_global(&self, slug: &str, depth: u8) -> Result<Option<Map>, Error> {
            self.store.find_global(slug, depth).await
        }

        async fn put_global(&self, slug: &str, data: Map) -> Result<(), Error> {
            self.store.put_global(slug, data).await
        }
    }

    async fn seeded_client() -> (ContentClient, Arc<CountingSource>) {
        let source = Arc::new(CountingSource {
            store: MemoryStore::new(kabar_model::collections(), kabar_model::globals()),
            finds: AtomicUsize::new(0),
        });
        let store = &source.store;

        let rina = Author::create(store, data(json!({ "name": "Rina Putri" })))
            .await
            .unwrap();
        let inactive = Author::create(
            store,
            data(json!({ "name": "Mantan Redaktur", "is_active": false })),
        )
        .await
        .unwrap();

        let berita = Category::create(store, data(json!({ "name": "Berita", "order": 1 })))
            .await
            .unwrap();
        let prestasi = Category::create(store, data(json!({ "name": "Prestasi", "order": 2 })))
            .await
            .unwrap();
        let opini = Category::create(store, data(json!({ "name": "Opini", "order": 3 })))
            .await
            .unwrap();
        let rubrik = Rubric::create(store, data(json!({ "name": "Sorotan" })))
            .await
            .unwrap();
        let tag = Tag::create(store, data(json!({ "name": "Beasiswa" })))
            .await
            .unwrap();

        for (n, categories, status, views) in [
            (1, vec![berita.id], "published", 40),
            (2, vec![berita.id, prestasi.id], "published", 10),
            (3, vec![prestasi.id], "published", 75),
            (4, vec![opini.id], "published", 5),
            (5, vec![berita.id], "draft", 0),
            (6, vec![prestasi.id], "archived", 0),
        ] {
            Article::create(
                store,
                data(json!({
                    "title": format!("Kabar Kampus {n}"),
                    "excerpt": format!("Ringkasan kabar ppidk nomor {n}"),
                    "content": { "text": format!("Isi artikel {n}") },
                    "author": if n == 4 { inactive.id } else { rina.id },
                    "categories": categories,
                    "rubric": if n == 1 { Some(rubrik.id) } else { None },
                    "tags": if n == 2 { vec![tag.id] } else { Vec::new() },
                    "status": status,
                    "published_at": format!("2024-05-{:02}T09:00:00Z", 10 + n),
                    "view_count": views,
                    "is_headline": n == 1,
                    "is_featured": n == 2 || n == 3,
                })),
            )
            .await
            .unwrap();
        }
        (ContentClient::new(source.clone()), source)
    }

    #[tokio::test]
    async fn it_restricts_public_listings_to_published_articles() {
        let (client, _) = seeded_client().await;
        let page = client
            .list_articles(&ArticleListOptions::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 4);
        assert!(
            page.items
                .iter()
                .all(|a| a.status == kabar_model::ArticleStatus::Published)
        );
        // Newest-published first.
        assert_eq!(page.items[0].slug, "kabar-kampus-4");

        let elevated = client
            .list_articles(&ArticleListOptions {
                access: AccessLevel::Elevated,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(elevated.total_items, 6);
    }

    #[tokio::test]
    async fn it_filters_listings_by_category_slug() {
        let (client, _) = seeded_client().await;
        let page = client
            .list_articles(&ArticleListOptions {
                category_slug: Some("prestasi".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total_items, 2);
        for article in &page.items {
            let slugs = article
                .categories
                .iter()
                .filter_map(|c| c.get().map(|c| c.slug.clone()))
                .collect::<Vec<_>>();
            assert!(slugs.contains(&"prestasi".to_owned()));
        }
    }

    #[tokio::test]
    async fn it_combines_scoped_filters_and_exclusion() {
        let (client, _) = seeded_client().await;
        let headline = client
            .list_articles(&ArticleListOptions {
                headline: true,
                page_size: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        let headline_id = headline.items[0].id;

        let featured = client
            .list_articles(&ArticleListOptions {
                featured: true,
                exclude_id: Some(headline_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(featured.total_items, 2);
        assert!(featured.items.iter().all(|a| a.id != headline_id));

        let by_rubric = client
            .list_articles(&ArticleListOptions {
                rubric_slug: Some("sorotan".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_rubric.total_items, 1);

        let by_tag = client
            .list_articles(&ArticleListOptions {
                tag_slug: Some("beasiswa".to_owned()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_tag.total_items, 1);
        assert_eq!(by_tag.items[0].slug, "kabar-kampus-2");
    }

    #[tokio::test]
    async fn it_sorts_by_view_count_when_requested() {
        let (client, _) = seeded_client().await;
        let page = client
            .list_articles(&ArticleListOptions {
                sort: ArticleSort::MostViewed,
                ..Default::default()
            })
            .await
            .unwrap();
        let views = page.items.iter().map(|a| a.view_count).collect::<Vec<_>>();
        assert_eq!(views, vec![75, 40, 10, 5]);
    }

    #[tokio::test]
    async fn it_hides_unpublished_slugs_from_public_lookups() {
        let (client, _) = seeded_client().await;
        assert!(
            client
                .article_by_slug("kabar-kampus-5")
                .await
                .unwrap()
                .is_none()
        );

        let draft = client
            .article_by_slug_with("kabar-kampus-5", AccessLevel::Elevated)
            .await
            .unwrap()
            .expect("elevated access should see the draft");
        assert_eq!(draft.status, kabar_model::ArticleStatus::Draft);

        let published = client
            .article_by_slug("kabar-kampus-1")
            .await
            .unwrap()
            .expect("published article should resolve");
        // Depth 2 resolves the author for the byline without extra calls.
        assert_eq!(
            published.author.get().map(|a| a.name.as_str()),
            Some("Rina Putri")
        );
        assert!(client.article_by_slug("tidak-ada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn it_relates_articles_through_shared_categories() {
        let (client, _) = seeded_client().await;
        let article = client
            .article_by_slug("kabar-kampus-2")
            .await
            .unwrap()
            .unwrap();
        let related = client
            .related_articles(article.id, &article.category_ids(), 4)
            .await
            .unwrap();

        assert!(!related.is_empty());
        assert!(related.len() <= 4);
        assert!(related.iter().all(|a| a.id != article.id));
        let shared = &article.category_ids();
        for candidate in &related {
            assert!(
                candidate
                    .category_ids()
                    .iter()
                    .any(|id| shared.contains(id))
            );
        }
        // The archived article 6 shares a category but stays hidden.
        assert!(related.iter().all(|a| a.slug != "kabar-kampus-6"));
    }

    #[tokio::test]
    async fn it_returns_nothing_for_an_empty_category_set() {
        let (client, source) = seeded_client().await;
        let before = source.finds.load(Ordering::Relaxed);
        let related = client.related_articles(1, &[], 4).await.unwrap();
        assert!(related.is_empty());
        assert_eq!(source.finds.load(Ordering::Relaxed), before);
    }

    #[tokio::test]
    async fn it_short_circuits_blank_searches() {
        let (client, source) = seeded_client().await;
        let before = source.finds.load(Ordering::Relaxed);
        for keyword in ["", "   "] {
            let page = client.search_articles(keyword, 1, 12).await.unwrap();
            assert_eq!(page.total_items, 0);
            assert!(page.items.is_empty());
        }
        assert_eq!(source.finds.load(Ordering::Relaxed), before);

        let page = client.search_articles("ppidk", 1, 12).await.unwrap();
        assert_eq!(page.total_items, 4);
        let page = client.search_articles("KAMPUS 3", 1, 12).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].slug, "kabar-kampus-3");
    }

    #[tokio::test]
    async fn it_increments_the_view_counter_sequentially() {
        let (client, _) = seeded_client().await;
        let article = client
            .article_by_slug("kabar-kampus-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(article.view_count, 10);

        client.increment_view_count(article.id).await.unwrap();
        client.increment_view_count(article.id).await.unwrap();
        let article = client
            .article_by_slug("kabar-kampus-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(article.view_count, 12);

        let err = client.increment_view_count(4040).await.unwrap_err();
        assert!(err.message().contains("no document"));
    }

    #[tokio::test]
    async fn it_lists_taxonomies_in_configured_order() {
        let (client, _) = seeded_client().await;
        let categories = client.categories().await.unwrap();
        let slugs = categories.iter().map(|c| c.slug.as_str()).collect::<Vec<_>>();
        assert_eq!(slugs, vec!["berita", "prestasi", "opini"]);
        assert!(
            client
                .category_by_slug("prestasi")
                .await
                .unwrap()
                .is_some()
        );

        // Inactive authors are invisible.
        let authors = client.authors().await.unwrap();
        assert_eq!(authors.len(), 1);
        assert!(
            client
                .author_by_slug("mantan-redaktur")
                .await
                .unwrap()
                .is_none()
        );

        assert_eq!(client.rubrics().await.unwrap().len(), 1);
        assert_eq!(client.tags().await.unwrap().len(), 1);
        assert!(client.tag_by_slug("beasiswa").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn it_reads_globals_with_defaults() {
        let (client, source) = seeded_client().await;
        let settings = client.site_settings().await.unwrap();
        assert!(settings.site_name.is_empty());

        source
            .store
            .put_global(
                kabar_model::SiteSettings::SLUG,
                data(json!({ "site_name": "PPIDK Timtengka" })),
            )
            .await
            .unwrap();
        let settings = client.site_settings().await.unwrap();
        assert_eq!(settings.site_name, "PPIDK Timtengka");
    }
}
