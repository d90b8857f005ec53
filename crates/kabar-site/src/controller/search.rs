//! Free-text article search.

use super::{AppState, Rejection, parse_page};
use axum::{
    Json,
    extract::{Query, State},
};
use kabar_core::{JsonValue, json};
use kabar_query::ContentPage;
use serde::Deserialize;

/// Query string of the search page.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    q: Option<String>,
    page: Option<String>,
}

/// `GET /cari`: substring search over title and excerpt. A blank query
/// renders the empty state without touching the store.
pub(crate) async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<JsonValue>, Rejection> {
    let page = parse_page(params.page.as_deref());
    let keyword = params.q.unwrap_or_default();
    let keyword = keyword.trim();

    let results = if keyword.is_empty() {
        ContentPage::empty()
    } else {
        state
            .client
            .search_articles(keyword, page, state.page_size)
            .await?
    };

    Ok(Json(json!({
        "query": keyword,
        "results": results,
    })))
}
