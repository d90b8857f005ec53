//! The `media` collection.
//!
//! The upload pipeline itself is an external collaborator; this model is the
//! thin reference shape the content documents point at.

use crate::{collection::Collection, relation::Entity};
use async_trait::async_trait;
use kabar_core::{Map, extension::JsonObjectExt, model::Model, validation::Validation};
use serde::{Deserialize, Serialize};

/// The `media` model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Media {
    /// Document id.
    pub id: i64,
    /// Public URL of the asset.
    pub url: String,
    /// Alternative text.
    pub alt: String,
}

impl Entity for Media {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Media {
    #[inline]
    fn new() -> Self {
        Self::default()
    }

    fn read_map(&mut self, data: &Map) -> Validation {
        let validation = Validation::new();
        if let Some(id) = data.parse_i64("id") {
            self.id = id;
        }
        if let Some(url) = data.parse_string("url") {
            self.url = url.into_owned();
        }
        if let Some(alt) = data.parse_string("alt") {
            self.alt = alt.into_owned();
        }
        validation
    }
}

#[async_trait]
impl Collection for Media {
    const NAME: &'static str = "media";
}
