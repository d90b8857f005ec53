//! The `categories` collection.

use crate::{
    author::derive_slug_from_name,
    collection::Collection,
    media::Media,
    relation::{Entity, Relation},
};
use async_trait::async_trait;
use kabar_core::{Map, error::Error, extension::JsonObjectExt, model::Model, validation::Validation};
use kabar_store::ContentSource;
use serde::{Deserialize, Serialize};

/// The `category` model. Categories form a forest through the optional
/// parent reference; parent assignments that would close a cycle are
/// rejected at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Category {
    /// Document id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe slug, derived from the name when absent.
    pub slug: String,
    /// Description shown on the category page.
    pub description: String,
    /// Icon image.
    pub icon: Option<Relation<Media>>,
    /// Hex accent color (e.g. `#3B82F6`).
    pub color: String,
    /// Parent category.
    pub parent: Option<Relation<Category>>,
    /// Sort key for stable listings.
    pub order: i64,
    /// Whether the category is visible on the public site.
    pub is_active: bool,
}

impl Entity for Category {
    #[inline]
    fn id(&self) -> i64 {
        self.id
    }
}

impl Model for Category {
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
        if let Some(parent) = data.parse_i64("parent") {
            self.parent = Some(parent.into());
        }
        if let Some(order) = data.parse_i64("order") {
            self.order = order;
        }
        if let Some(is_active) = data.get_bool("is_active") {
            self.is_active = is_active;
        }
        validation
    }
}

#[async_trait]
impl Collection for Category {
    const NAME: &'static str = "categories";

    async fn before_save(source: &dyn ContentSource, data: &mut Map) -> Result<(), Error> {
        derive_slug_from_name(data)?;
        if !data.contains_key("order") {
            data.upsert("order", 0);
        }
        if !data.contains_key("is_active") {
            data.upsert("is_active", true);
        }
        if let Some(parent) = data.parse_i64("parent") {
            check_ancestry(source, data.parse_i64("id"), parent).await?;
        }
        Ok(())
    }
}

/// Walks the ancestor chain from `parent` and rejects the assignment if it
/// reaches the category being saved.
async fn check_ancestry(
    source: &dyn ContentSource,
    own_id: Option<i64>,
    parent: i64,
) -> Result<(), Error> {
    let Some(own_id) = own_id else {
        // A brand-new category has no descendants yet.
        return Ok(());
    };
    let mut visited = vec![own_id];
    let mut next = Some(parent);
    while let Some(ancestor) = next {
        if ancestor == own_id {
            return Err(Error::new(format!(
                "setting parent `{parent}` on category `{own_id}` would create a cycle"
            )));
        }
        if visited.contains(&ancestor) {
            // The stored chain is already cyclic; refuse to extend it.
            return Err(Error::new(format!(
                "the ancestor chain of category `{parent}` is cyclic"
            )));
        }
        visited.push(ancestor);
        next = source
            .find_by_id(Category::NAME, ancestor)
            .await?
            .and_then(|doc| doc.parse_i64("parent"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Category;
    use crate::collection::Collection;
    use kabar_core::{Map, json};
    use kabar_store::MemoryStore;

    fn data(value: kabar_core::JsonValue) -> Map {
        value.as_object().expect("should be an object").clone()
    }

    #[tokio::test]
    async fn it_rejects_parent_cycles() {
        let store = MemoryStore::new(crate::collections(), crate::globals());
        let root = Category::create(&store, data(json!({ "name": "Kegiatan" })))
            .await
            .unwrap();
        let child = Category::create(
            &store,
            data(json!({ "name": "Seminar", "parent": root.id })),
        )
        .await
        .unwrap();

        // Re-parenting the root under its own child closes a cycle.
        let err = Category::update(&store, root.id, data(json!({ "parent": child.id })))
            .await
            .unwrap_err();
        assert!(err.message().contains("cycle"));

        // A self-parent is the smallest cycle.
        let err = Category::update(&store, root.id, data(json!({ "parent": root.id })))
            .await
            .unwrap_err();
        assert!(err.message().contains("cycle"));

        // Valid re-parenting still works.
        let sibling = Category::create(&store, data(json!({ "name": "Lomba" })))
            .await
            .unwrap();
        Category::update(&store, sibling.id, data(json!({ "parent": child.id })))
            .await
            .unwrap();
    }
}
