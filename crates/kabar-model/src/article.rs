//! The `articles` collection.

use crate::{
    author::Author,
    category::Category,
    collection::Collection,
    media::Media,
    relation::{Entity, Relation},
    rubric::Rubric,
    tag::Tag,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use kabar_core::{
    JsonValue, Map,
    error::Error,
    extension::{JsonObjectExt, JsonValueExt},
    helper,
    model::Model,
    validation::Validation,
};
use kabar_store::ContentSource;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Publication status of an article.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArticleStatus {
    /// Not yet visible to the public site. This is the default value.
    #[default]
    Draft,
    /// Visible to the public site.
    Published,
    /// Withdrawn from the public site but kept in the store.
    Archived,
}

/// A gallery entry: an image with an optional caption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryItem {
    /// The image.
    pub image: Relation<Media>,
    /// Caption shown under the image.
    pub caption: String,
}

/// Per-article SEO overrides; empty fields fall back to the base fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    /// Meta title override.
    pub meta_title: String,
    /// Meta description override.
    pub meta_description: String,
    /// Open Graph image override.
    pub og_image: Option<Relation<Media>>,
}

/// The `article` model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Article {
    /// Document id.
    pub id: i64,
    /// Article title.
    pub title: String,
    /// Unique URL-safe slug, derived from the title when absent.
    pub slug: String,
    /// Short summary used in previews.
    pub excerpt: String,
    /// Structured rich-text content.
    pub content: JsonValue,
    /// Featured image.
    pub featured_image: Option<Relation<Media>>,
    /// Photo gallery.
    pub gallery: Vec<GalleryItem>,
    /// The author.
    pub author: Relation<Author>,
    /// Categories the article belongs to.
    pub categories: Vec<Relation<Category>>,
    /// Rubric the article is published under.
    pub rubric: Option<Relation<Rubric>>,
    /// Tags.
    pub tags: Vec<Relation<Tag>>,
    /// Publication status.
    pub status: ArticleStatus,
    /// Set automatically on the first transition to `published`.
    pub published_at: Option<DateTime<Utc>>,
    /// Shown in the featured block of the listing page.
    pub is_featured: bool,
    /// Shown as the headline of the listing page.
    pub is_headline: bool,
    /// Approximate view counter, incremented by the server.
    pub view_count: u64,
    /// Estimated reading time in minutes, derived from the content.
    pub reading_time: u32,
    /// SEO overrides.
    pub seo: Seo,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Returns the meta title, falling back to the article title.
    pub fn resolved_meta_title(&self) -> &str {
        if self.seo.meta_title.is_empty() {
            &self.title
        } else {
            &self.seo.meta_title
        }
    }

    /// Returns the meta description, falling back to the excerpt.
    pub fn resolved_meta_description(&self) -> &str {
        if self.seo.meta_description.is_empty() {
            &self.excerpt
        } else {
            &self.seo.meta_description
        }
    }

    /// Returns the Open Graph image, falling back to the featured image.
    pub fn resolved_og_image(&self) -> Option<&Relation<Media>> {
        self.seo.og_image.as_ref().or(self.featured_image.as_ref())
    }

    /// Returns the ids of the categories the article belongs to.
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(Relation::id).collect()
    }
}

impl Entity for Article {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Article {
    #[inline]
    fn new() -> Self {
        Self::default()
    }

    fn read_map(&mut self, data: &Map) -> Validation {
        let mut validation = Validation::new();
        if let Some(id) = data.parse_i64("id") {
            self.id = id;
        }
        if let Some(title) = data.parse_string("title") {
            self.title = title.into_owned();
        }
        if self.title.is_empty() {
            validation.record("title", "should be nonempty");
        }
        if let Some(slug) = data.parse_string("slug") {
            self.slug = slug.into_owned();
        }
        if let Some(excerpt) = data.parse_string("excerpt") {
            self.excerpt = excerpt.into_owned();
        }
        if let Some(status) = data.parse_string("status") {
            match status.parse() {
                Ok(status) => self.status = status,
                Err(err) => validation.record_fail("status", Error::from(err)),
            }
        }
        if let Some(author) = data.parse_i64("author") {
            self.author = author.into();
        }
        if let Some(is_featured) = data.get_bool("is_featured") {
            self.is_featured = is_featured;
        }
        if let Some(is_headline) = data.get_bool("is_headline") {
            self.is_headline = is_headline;
        }
        validation
    }
}

#[async_trait]
impl Collection for Article {
    const NAME: &'static str = "articles";

    async fn before_save(_source: &dyn ContentSource, data: &mut Map) -> Result<(), Error> {
        let needs_slug = data.parse_string("slug").is_none_or(|slug| slug.is_empty());
        if needs_slug {
            let derived = data
                .parse_string("title")
                .map(|title| helper::slugify(&title));
            if let Some(slug) = derived {
                data.upsert("slug", slug);
            }
        }
        if data.parse_string("slug").is_none_or(|slug| slug.is_empty()) {
            return Err(Error::new("the `slug` field should be nonempty"));
        }

        if !data.contains_key("status") {
            data.upsert("status", ArticleStatus::Draft.as_ref());
        }
        let reading_time = data
            .get("content")
            .filter(|content| !content.is_null())
            .map(helper::reading_time);
        if let Some(reading_time) = reading_time {
            data.upsert("reading_time", reading_time);
        }

        // The first transition to `published` stamps the publication time;
        // it is never overwritten afterwards.
        let unpublished = data.get("published_at").is_none_or(JsonValue::is_unset);
        if data.get_str("status") == Some("published") && unpublished {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            data.upsert("published_at", now);
        }

        if !data.contains_key("view_count") {
            data.upsert("view_count", 0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Article, ArticleStatus};
    use crate::collection::Collection;
    use kabar_core::{json, model::Model};
    use kabar_store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new(crate::collections(), crate::globals())
    }

    fn data(value: kabar_core::JsonValue) -> kabar_core::Map {
        value.as_object().expect("should be an object").clone()
    }

    #[tokio::test]
    async fn it_derives_slug_and_reading_time_on_create() {
        let store = store();
        let words = vec!["kata"; 1000].join(" ");
        let article = Article::create(
            &store,
            data(json!({
                "title": "Mahasiswa Hebat! 2024",
                "content": { "text": words },
            })),
        )
        .await
        .unwrap();

        assert_eq!(article.slug, "mahasiswa-hebat-2024");
        assert_eq!(article.reading_time, 5);
        assert_eq!(article.status, ArticleStatus::Draft);
        assert!(article.published_at.is_none());
    }

    #[tokio::test]
    async fn it_stamps_published_at_exactly_once() {
        let store = store();
        let article = Article::create(&store, data(json!({ "title": "Kabar Baru" })))
            .await
            .unwrap();
        assert!(article.published_at.is_none());

        let published =
            Article::update(&store, article.id, data(json!({ "status": "published" })))
                .await
                .unwrap();
        let first_published_at = published.published_at.expect("should be stamped");

        let retitled =
            Article::update(&store, article.id, data(json!({ "title": "Kabar Terbaru" })))
                .await
                .unwrap();
        assert_eq!(retitled.published_at, Some(first_published_at));
        // The slug stays stable: it is a public identifier.
        assert_eq!(retitled.slug, "kabar-baru");
    }

    #[tokio::test]
    async fn it_rejects_duplicate_slugs() {
        let store = store();
        Article::create(&store, data(json!({ "title": "Berita Utama" })))
            .await
            .unwrap();
        let err = Article::create(&store, data(json!({ "title": "Berita Utama" })))
            .await
            .unwrap_err();
        assert!(err.message().contains("unique"));
    }

    #[test]
    fn it_validates_model_data() {
        let mut article = Article::new();
        let validation = article.read_map(&data(json!({
            "title": "Sambutan Ketua",
            "status": "published",
            "author": 3,
        })));
        assert!(validation.is_success());
        assert_eq!(article.status, ArticleStatus::Published);
        assert_eq!(article.author.id(), 3);

        let mut article = Article::new();
        let validation = article.read_map(&data(json!({ "status": "unknown" })));
        assert!(validation.contains_key("title"));
        let failures = validation.into_map();
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn it_resolves_seo_fallbacks() {
        let mut article = Article::new();
        article.title = "Judul Asli".to_owned();
        article.excerpt = "Ringkasan".to_owned();
        assert_eq!(article.resolved_meta_title(), "Judul Asli");
        assert_eq!(article.resolved_meta_description(), "Ringkasan");

        article.seo.meta_title = "Judul SEO".to_owned();
        assert_eq!(article.resolved_meta_title(), "Judul SEO");
    }
}
