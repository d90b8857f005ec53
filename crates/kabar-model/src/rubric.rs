//! The `rubrics` collection.

use crate::{author::derive_slug_from_name, collection::Collection, relation::Entity};
use async_trait::async_trait;
use kabar_core::{Map, error::Error, extension::JsonObjectExt, model::Model, validation::Validation};
use kabar_store::ContentSource;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Layout template a rubric renders its articles with.
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
pub enum RubricTemplate {
    /// Regular article layout. This is the default value.
    #[default]
    Standard,
    /// Immersive long-form layout.
    Longform,
    /// Question-and-answer layout.
    Interview,
    /// Opinion column layout.
    Opinion,
}

/// The `rubric` model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Rubric {
    /// Document id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe slug, derived from the name when absent.
    pub slug: String,
    /// Description shown on the rubric page.
    pub description: String,
    /// Hex accent color (e.g. `#10B981`).
    pub color: String,
    /// Layout template.
    pub template: RubricTemplate,
    /// Whether the rubric is visible on the public site.
    pub is_active: bool,
}

impl Entity for Rubric {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Rubric {
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
        if let Some(template) = data.parse_string("template") {
            match template.parse() {
                Ok(template) => self.template = template,
                Err(err) => validation.record_fail("template", err),
            }
        }
        if let Some(is_active) = data.get_bool("is_active") {
            self.is_active = is_active;
        }
        validation
    }
}

#[async_trait]
impl Collection for Rubric {
    const NAME: &'static str = "rubrics";

    async fn before_save(_source: &dyn ContentSource, data: &mut Map) -> Result<(), Error> {
        derive_slug_from_name(data)?;
        if !data.contains_key("template") {
            data.upsert("template", RubricTemplate::Standard.as_ref());
        }
        if !data.contains_key("is_active") {
            data.upsert("is_active", true);
        }
        Ok(())
    }
}
