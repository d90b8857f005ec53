//! Collection and global metadata the backends are constructed with.

/// A relationship field of a collection.
#[derive(Debug, Clone, Copy)]
pub struct RelationField {
    /// Field name on the document; a dotted path traverses nested groups
    /// and arrays (e.g. `seo.og_image`, `header_menu.category`).
    pub field: &'static str,
    /// Target collection name.
    pub target: &'static str,
    /// Whether the field holds many references.
    pub many: bool,
}

impl RelationField {
    /// Creates a single-reference field.
    #[inline]
    pub const fn one(field: &'static str, target: &'static str) -> Self {
        Self {
            field,
            target,
            many: false,
        }
    }

    /// Creates a many-references field.
    #[inline]
    pub const fn many(field: &'static str, target: &'static str) -> Self {
        Self {
            field,
            target,
            many: true,
        }
    }
}

/// Static metadata of a content collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    /// Collection name.
    pub name: &'static str,
    /// Relationship fields.
    pub relations: &'static [RelationField],
    /// Fields whose values must be unique within the collection.
    pub unique_fields: &'static [&'static str],
}

impl CollectionSpec {
    /// Returns the relationship field with the given name.
    #[inline]
    pub fn relation(&self, field: &str) -> Option<&RelationField> {
        self.relations.iter().find(|r| r.field == field)
    }
}

/// Static metadata of a singleton global document.
#[derive(Debug, Clone, Copy)]
pub struct GlobalSpec {
    /// Global slug.
    pub slug: &'static str,
    /// Relationship fields, addressed by dotted paths.
    pub relations: &'static [RelationField],
}
