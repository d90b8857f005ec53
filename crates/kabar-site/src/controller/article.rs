//! Article listing and detail pages.

use super::{AppState, Rejection, parse_page};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use kabar_core::{JsonValue, json};
use kabar_query::ArticleListOptions;
use serde::Deserialize;

/// Query string of the listing page.
#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    page: Option<String>,
    kategori: Option<String>,
}

/// `GET /artikel`: the paginated listing, with the headline and featured
/// blocks on the unfiltered first page.
pub(crate) async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<JsonValue>, Rejection> {
    let page = parse_page(params.page.as_deref());
    let kategori = params.kategori.filter(|slug| !slug.is_empty());
    let is_first_page = page == 1 && kategori.is_none();

    let articles = state
        .client
        .list_articles(&ArticleListOptions {
            page,
            page_size: state.page_size,
            category_slug: kategori,
            ..Default::default()
        })
        .await?;

    let mut headline = None;
    let mut featured = Vec::new();
    if is_first_page {
        headline = state
            .client
            .list_articles(&ArticleListOptions {
                headline: true,
                page_size: 1,
                ..Default::default()
            })
            .await?
            .items
            .pop();
        featured = state
            .client
            .list_articles(&ArticleListOptions {
                featured: true,
                page_size: 4,
                exclude_id: headline.as_ref().map(|article| article.id),
                ..Default::default()
            })
            .await?
            .items;
    }
    let categories = state.client.categories().await?;

    Ok(Json(json!({
        "articles": articles,
        "headline": headline,
        "featured": featured,
        "categories": categories,
    })))
}

/// `GET /artikel/{slug}`: the resolved article, its related articles and
/// the resolved SEO metadata. Every hit adds one view.
pub(crate) async fn view(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<JsonValue>, Rejection> {
    let article = state
        .client
        .article_by_slug(&slug)
        .await?
        .ok_or_else(|| Rejection::not_found(format!("no article with slug `{slug}`")))?;
    state.client.increment_view_count(article.id).await?;

    let related = state
        .client
        .related_articles(article.id, &article.category_ids(), 4)
        .await?;
    let meta = json!({
        "title": article.resolved_meta_title(),
        "description": article.resolved_meta_description(),
        "og_image": article
            .resolved_og_image()
            .and_then(|image| image.get())
            .map(|image| image.url.clone()),
        "published_at": article.published_at,
    });

    Ok(Json(json!({
        "article": article,
        "related": related,
        "meta": meta,
    })))
}
