//! Singleton site-wide documents: settings and navigation.
//!
//! Globals are read-only from the site's perspective; editors manage them
//! through the CMS.

use crate::{author::SocialLink, category::Category, media::Media, relation::Relation, rubric::Rubric};
use kabar_core::JsonValue;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// The `site-settings` global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct SiteSettings {
    /// Site name.
    pub site_name: String,
    /// Site description.
    pub site_description: String,
    /// Site logo.
    pub logo: Option<Relation<Media>>,
    /// Favicon.
    pub favicon: Option<Relation<Media>>,
    /// Organization social profiles.
    pub social_links: Vec<SocialLink>,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Postal address.
    pub contact_address: String,
    /// Default meta title for pages without their own.
    pub default_meta_title: String,
    /// Default meta description.
    pub default_meta_description: String,
    /// Default Open Graph image.
    pub default_og_image: Option<Relation<Media>>,
}

impl SiteSettings {
    /// Global slug in the store.
    pub const SLUG: &'static str = "site-settings";
}

/// Kind of a header menu entry.
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
pub enum MenuItemKind {
    /// A link within the site. This is the default value.
    #[default]
    Internal,
    /// A link to another site.
    External,
    /// A link to a category listing.
    Category,
    /// A link to a rubric listing.
    Rubric,
}

/// A nested entry under a header menu item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuChild {
    /// Label shown in the menu.
    pub label: String,
    /// Link target for plain entries.
    pub url: Option<String>,
    /// Linked category for category entries.
    pub category: Option<Relation<Category>>,
}

/// A header menu entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    /// Label shown in the menu.
    pub label: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: MenuItemKind,
    /// Link target for internal/external entries.
    pub url: Option<String>,
    /// Linked category for category entries.
    pub category: Option<Relation<Category>>,
    /// Linked rubric for rubric entries.
    pub rubric: Option<Relation<Rubric>>,
    /// Whether the link opens in a new tab.
    pub open_in_new_tab: bool,
    /// Nested entries.
    pub children: Vec<MenuChild>,
}

/// A labeled group of footer links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterGroup {
    /// Group heading.
    pub group_label: String,
    /// Links in the group.
    pub links: Vec<FooterLink>,
}

/// A footer link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    /// Label shown in the footer.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// The `navigation` global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(default)]
pub struct Navigation {
    /// Header menu tree.
    pub header_menu: Vec<MenuItem>,
    /// Footer link groups.
    pub footer_menu: Vec<FooterGroup>,
    /// Rich-text footer note.
    pub footer_text: JsonValue,
}

impl Navigation {
    /// Global slug in the store.
    pub const SLUG: &'static str = "navigation";
}

#[cfg(test)]
mod tests {
    use super::{MenuItemKind, Navigation};

    #[test]
    fn it_deserializes_menu_trees() {
        let navigation: Navigation = serde_json::from_value(kabar_core::json!({
            "header_menu": [
                { "label": "Beranda", "type": "internal", "url": "/" },
                {
                    "label": "Berita",
                    "type": "category",
                    "category": { "id": 1, "name": "Berita", "slug": "berita" },
                    "children": [{ "label": "Opini", "category": 2 }],
                },
            ],
            "footer_menu": [
                { "group_label": "Tautan", "links": [{ "label": "Tentang", "url": "/tentang" }] },
            ],
        }))
        .unwrap();

        let berita = &navigation.header_menu[1];
        assert_eq!(berita.kind, MenuItemKind::Category);
        let category = berita.category.as_ref().and_then(|c| c.get()).unwrap();
        assert_eq!(category.slug, "berita");
        assert!(berita.children[0].category.as_ref().unwrap().get().is_none());
        assert_eq!(navigation.footer_menu[0].links[0].url, "/tentang");
    }
}
