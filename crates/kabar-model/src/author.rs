//! The `authors` collection.

use crate::{
    collection::Collection,
    media::Media,
    relation::{Entity, Relation},
};
use async_trait::async_trait;
use kabar_core::{
    JsonValue, Map,
    error::Error,
    extension::JsonObjectExt,
    helper,
    model::Model,
    validation::Validation,
};
use kabar_store::ContentSource;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Editorial role of an author.
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
pub enum AuthorRole {
    /// Curates and publishes content.
    Editor,
    /// Writes reported pieces.
    Journalist,
    /// Occasional outside writer. This is the default value.
    #[default]
    Contributor,
    /// Writes a recurring column.
    Columnist,
}

/// A social media platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SocialPlatform {
    /// Twitter/X.
    Twitter,
    /// Instagram.
    Instagram,
    /// LinkedIn.
    Linkedin,
    /// Facebook.
    Facebook,
    /// YouTube.
    Youtube,
    /// TikTok.
    Tiktok,
    /// A personal or organization website.
    Website,
}

/// A link to a profile on a social platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    /// The platform.
    pub platform: SocialPlatform,
    /// Profile URL.
    pub url: String,
}

/// The `author` model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Author {
    /// Document id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe slug, derived from the name when absent.
    pub slug: String,
    /// Rich-text biography.
    pub bio: JsonValue,
    /// Profile photo.
    pub avatar: Option<Relation<Media>>,
    /// Contact email.
    pub email: String,
    /// Social profiles.
    pub social_links: Vec<SocialLink>,
    /// Editorial role.
    pub role: AuthorRole,
    /// Whether the author is visible on the public site.
    pub is_active: bool,
}

impl Entity for Author {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Author {
    #[inline]
    fn new() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    fn read_map(&mut self, data: &Map) -> Validation {
        let mut validation = Validation::new();
        if let Some(id) = data.parse_i64("id") {
            self.id = id;
        }
        if let Some(name) = data.parse_string("name") {
            self.name = name.into_owned();
        }
        if self.name.is_empty() {
            validation.record("name", "should be nonempty");
        }
        if let Some(slug) = data.parse_string("slug") {
            self.slug = slug.into_owned();
        }
        if let Some(email) = data.parse_string("email") {
            self.email = email.into_owned();
        }
        if let Some(role) = data.parse_string("role") {
            match role.parse() {
                Ok(role) => self.role = role,
                Err(err) => validation.record_fail("role", err),
            }
        }
        if let Some(is_active) = data.get_bool("is_active") {
            self.is_active = is_active;
        }
        validation
    }
}

#[async_trait]
impl Collection for Author {
    const NAME: &'static str = "authors";

    async fn before_save(_source: &dyn ContentSource, data: &mut Map) -> Result<(), Error> {
        derive_slug_from_name(data)?;
        if !data.contains_key("role") {
            data.upsert("role", AuthorRole::Contributor.as_ref());
        }
        if !data.contains_key("is_active") {
            data.upsert("is_active", true);
        }
        Ok(())
    }
}

/// Derives the `slug` field from `name` when absent; shared by the
/// name-keyed collections.
pub(crate) fn derive_slug_from_name(data: &mut Map) -> Result<(), Error> {
    let needs_slug = data.parse_string("slug").is_none_or(|slug| slug.is_empty());
    if needs_slug {
        let derived = data.parse_string("name").map(|name| helper::slugify(&name));
        if let Some(slug) = derived {
            data.upsert("slug", slug);
        }
    }
    if data.parse_string("slug").is_none_or(|slug| slug.is_empty()) {
        return Err(Error::new("the `slug` field should be nonempty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Author, AuthorRole};
    use crate::collection::Collection;
    use kabar_core::json;
    use kabar_store::MemoryStore;

    #[tokio::test]
    async fn it_applies_author_defaults_on_create() {
        let store = MemoryStore::new(crate::collections(), crate::globals());
        let author = Author::create(
            &store,
            json!({ "name": "Siti Rahma" }).as_object().unwrap().clone(),
        )
        .await
        .unwrap();

        assert_eq!(author.slug, "siti-rahma");
        assert_eq!(author.role, AuthorRole::Contributor);
        assert!(author.is_active);
    }
}
