//! Typed content documents for the `kabar` content platform.
//!
//! Each collection model mirrors its schema in the content store: articles,
//! authors, categories, rubrics, tags and media, plus the singleton
//! site-settings and navigation globals. Relationship fields are the
//! [`Relation`] id-or-document union, so consuming code reads nested names
//! without casts. The [`Collection`] trait is the editorial write path,
//! applying each collection's save rules before data reaches the store.

mod article;
mod author;
mod category;
mod collection;
mod globals;
mod media;
mod relation;
mod rubric;
mod tag;

pub use article::{Article, ArticleStatus, GalleryItem, Seo};
pub use author::{Author, AuthorRole, SocialLink, SocialPlatform};
pub use category::Category;
pub use collection::Collection;
pub use globals::{
    FooterGroup, FooterLink, MenuChild, MenuItem, MenuItemKind, Navigation, SiteSettings,
};
pub use media::Media;
pub use relation::{Entity, Relation};
pub use rubric::{Rubric, RubricTemplate};
pub use tag::Tag;

use kabar_store::{CollectionSpec, GlobalSpec, RelationField};

const COLLECTIONS: &[CollectionSpec] = &[
    CollectionSpec {
        name: "articles",
        relations: &[
            RelationField::one("author", "authors"),
            RelationField::many("categories", "categories"),
            RelationField::one("rubric", "rubrics"),
            RelationField::many("tags", "tags"),
            RelationField::one("featured_image", "media"),
            RelationField::one("gallery.image", "media"),
            RelationField::one("seo.og_image", "media"),
        ],
        unique_fields: &["slug"],
    },
    CollectionSpec {
        name: "authors",
        relations: &[RelationField::one("avatar", "media")],
        unique_fields: &["slug"],
    },
    CollectionSpec {
        name: "categories",
        relations: &[
            RelationField::one("icon", "media"),
            RelationField::one("parent", "categories"),
        ],
        unique_fields: &["slug"],
    },
    CollectionSpec {
        name: "rubrics",
        relations: &[],
        unique_fields: &["slug"],
    },
    CollectionSpec {
        name: "tags",
        relations: &[],
        unique_fields: &["slug"],
    },
    CollectionSpec {
        name: "media",
        relations: &[],
        unique_fields: &[],
    },
];

const GLOBALS: &[GlobalSpec] = &[
    GlobalSpec {
        slug: "site-settings",
        relations: &[
            RelationField::one("logo", "media"),
            RelationField::one("favicon", "media"),
            RelationField::one("default_og_image", "media"),
        ],
    },
    GlobalSpec {
        slug: "navigation",
        relations: &[
            RelationField::one("header_menu.category", "categories"),
            RelationField::one("header_menu.rubric", "rubrics"),
            RelationField::one("header_menu.children.category", "categories"),
        ],
    },
];

/// Returns the collection metadata the store backends are constructed with.
#[inline]
pub fn collections() -> &'static [CollectionSpec] {
    COLLECTIONS
}

/// Returns the global metadata the store backends are constructed with.
#[inline]
pub fn globals() -> &'static [GlobalSpec] {
    GLOBALS
}
