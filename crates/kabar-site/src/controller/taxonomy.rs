//! Category, rubric and author scoped listings.

use super::{AppState, Rejection, parse_page};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use kabar_core::{JsonValue, json};
use kabar_query::ArticleListOptions;
use serde::Deserialize;

/// Query string of the scoped listing pages.
#[derive(Debug, Deserialize)]
pub(crate) struct PageParams {
    page: Option<String>,
}

/// `GET /kategori/{slug}`: articles in one category.
pub(crate) async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<JsonValue>, Rejection> {
    let category = state
        .client
        .category_by_slug(&slug)
        .await?
        .ok_or_else(|| Rejection::not_found(format!("no category with slug `{slug}`")))?;
    let articles = state
        .client
        .list_articles(&ArticleListOptions {
            page: parse_page(params.page.as_deref()),
            page_size: state.page_size,
            category_slug: Some(slug),
            ..Default::default()
        })
        .await?;
    let categories = state.client.categories().await?;

    Ok(Json(json!({
        "category": category,
        "articles": articles,
        "categories": categories,
    })))
}

/// `GET /rubrik/{slug}`: articles under one rubric.
pub(crate) async fn rubric(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<JsonValue>, Rejection> {
    let rubric = state
        .client
        .rubric_by_slug(&slug)
        .await?
        .ok_or_else(|| Rejection::not_found(format!("no rubric with slug `{slug}`")))?;
    let articles = state
        .client
        .list_articles(&ArticleListOptions {
            page: parse_page(params.page.as_deref()),
            page_size: state.page_size,
            rubric_slug: Some(slug),
            ..Default::default()
        })
        .await?;
    let rubrics = state.client.rubrics().await?;

    Ok(Json(json!({
        "rubric": rubric,
        "articles": articles,
        "rubrics": rubrics,
    })))
}

/// `GET /penulis/{slug}`: articles by one author.
pub(crate) async fn author(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<JsonValue>, Rejection> {
    let author = state
        .client
        .author_by_slug(&slug)
        .await?
        .ok_or_else(|| Rejection::not_found(format!("no author with slug `{slug}`")))?;
    let articles = state
        .client
        .list_articles(&ArticleListOptions {
            page: parse_page(params.page.as_deref()),
            page_size: state.page_size,
            author_slug: Some(slug),
            ..Default::default()
        })
        .await?;

    Ok(Json(json!({
        "author": author,
        "articles": articles,
    })))
}
