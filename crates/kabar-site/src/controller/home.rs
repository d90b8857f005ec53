//! The marketing home page payload.

use super::{AppState, Rejection};
use axum::{Json, extract::State};
use kabar_core::{JsonValue, json};
use kabar_query::ArticleListOptions;

/// `GET /`: one featured article plus the latest news strip.
pub(crate) async fn index(State(state): State<AppState>) -> Result<Json<JsonValue>, Rejection> {
    let featured = state
        .client
        .list_articles(&ArticleListOptions {
            featured: true,
            page_size: 1,
            ..Default::default()
        })
        .await?
        .items
        .pop();
    let latest = state
        .client
        .list_articles(&ArticleListOptions {
            page_size: 4,
            exclude_id: featured.as_ref().map(|article| article.id),
            ..Default::default()
        })
        .await?
        .items;
    let settings = state.client.site_settings().await?;

    Ok(Json(json!({
        "featured": featured,
        "latest": latest,
        "settings": settings,
    })))
}
