//! Site-wide globals and the sitemap.

use super::{AppState, Rejection};
use crate::sitemap;
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use kabar_model::{Navigation, SiteSettings};

/// `GET /pengaturan`: the site settings global.
pub(crate) async fn settings(
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>, Rejection> {
    Ok(Json(state.client.site_settings().await?))
}

/// `GET /navigasi`: the navigation global with its menu relations resolved.
pub(crate) async fn navigation(
    State(state): State<AppState>,
) -> Result<Json<Navigation>, Rejection> {
    Ok(Json(state.client.navigation().await?))
}

/// `GET /sitemap.xml`: published content for search engine indexing.
pub(crate) async fn sitemap(State(state): State<AppState>) -> Result<Response, Rejection> {
    let urls = sitemap::collect(&state).await?;
    let xml = sitemap::render(&urls);
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}
