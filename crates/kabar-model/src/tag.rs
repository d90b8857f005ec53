//! The `tags` collection.

use crate::{author::derive_slug_from_name, collection::Collection, relation::Entity};
use async_trait::async_trait;
use kabar_core::{Map, error::Error, extension::JsonObjectExt, model::Model, validation::Validation};
use kabar_store::ContentSource;
use serde::{Deserialize, Serialize};

/// The `tag` model: a name and a unique slug, nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Tag {
    /// Document id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe slug, derived from the name when absent.
    pub slug: String,
}

impl Entity for Tag {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Tag {
    #[inline]
    fn new() -> Self {
        Self::default()
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
        validation
    }
}

#[async_trait]
impl Collection for Tag {
    const NAME: &'static str = "tags";

    async fn before_save(_source: &dyn ContentSource, data: &mut Map) -> Result<(), Error> {
        derive_slug_from_name(data)
    }
}
