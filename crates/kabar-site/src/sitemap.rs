//! Sitemap generation.
//!
//! Renders the published content into the sitemap XML format:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.org/artikel/kabar-terbaru</loc>
//!     <lastmod>2024-05-14</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::controller::AppState;
use kabar_core::error::Error;
use kabar_query::ArticleListOptions;

/// XML namespace of the sitemap format.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Upper bound on the article entries; beyond this the site needs a sitemap
/// index.
const ARTICLE_LIMIT: u64 = 1000;

/// A single URL entry.
pub(crate) struct UrlEntry {
    /// Full URL location.
    pub(crate) loc: String,
    /// Last modification date (`YYYY-MM-DD`).
    pub(crate) lastmod: Option<String>,
    /// Suggested crawl frequency.
    pub(crate) changefreq: &'static str,
    /// Relative priority.
    pub(crate) priority: &'static str,
}

/// Collects the sitemap entries: the static pages plus every published
/// article and active taxonomy page.
pub(crate) async fn collect(state: &AppState) -> Result<Vec<UrlEntry>, Error> {
    let base = state.site_url.as_str();
    let mut urls = vec![
        UrlEntry {
            loc: base.to_owned(),
            lastmod: None,
            changefreq: "daily",
            priority: "1.0",
        },
        UrlEntry {
            loc: format!("{base}/artikel"),
            lastmod: None,
            changefreq: "daily",
            priority: "0.9",
        },
        UrlEntry {
            loc: format!("{base}/cari"),
            lastmod: None,
            changefreq: "monthly",
            priority: "0.5",
        },
    ];

    let articles = state
        .client
        .list_articles(&ArticleListOptions {
            page_size: ARTICLE_LIMIT,
            ..Default::default()
        })
        .await?;
    for article in &articles.items {
        urls.push(UrlEntry {
            loc: format!("{base}/artikel/{}", article.slug),
            lastmod: article
                .updated_at
                .map(|at| at.format("%Y-%m-%d").to_string()),
            changefreq: "weekly",
            priority: "0.8",
        });
    }
    for category in &state.client.categories().await? {
        urls.push(UrlEntry {
            loc: format!("{base}/kategori/{}", category.slug),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.7",
        });
    }
    for rubric in &state.client.rubrics().await? {
        urls.push(UrlEntry {
            loc: format!("{base}/rubrik/{}", rubric.slug),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.7",
        });
    }
    for author in &state.client.authors().await? {
        urls.push(UrlEntry {
            loc: format!("{base}/penulis/{}", author.slug),
            lastmod: None,
            changefreq: "monthly",
            priority: "0.6",
        });
    }
    Ok(urls)
}

/// Renders the entries as sitemap XML.
pub(crate) fn render(urls: &[UrlEntry]) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));
    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&url.loc)));
        if let Some(lastmod) = &url.lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            url.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", url.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escapes the XML special characters in a URL.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::{UrlEntry, render};

    #[test]
    fn it_renders_sitemap_entries() {
        let urls = vec![
            UrlEntry {
                loc: "https://ppidk-timtengka.org".to_owned(),
                lastmod: None,
                changefreq: "daily",
                priority: "1.0",
            },
            UrlEntry {
                loc: "https://ppidk-timtengka.org/artikel/kabar?x=1&y=2".to_owned(),
                lastmod: Some("2024-05-14".to_owned()),
                changefreq: "weekly",
                priority: "0.8",
            },
        ];
        let xml = render(&urls);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://ppidk-timtengka.org</loc>"));
        assert!(xml.contains("kabar?x=1&amp;y=2"));
        assert!(xml.contains("<lastmod>2024-05-14</lastmod>"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
