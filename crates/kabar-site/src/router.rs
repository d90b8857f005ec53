//! Route registration.

use crate::controller::{self, AppState};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Builds the public-site router, mirroring the front-end routes.
pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(controller::home::index))
        .route("/artikel", get(controller::article::list))
        .route("/artikel/:slug", get(controller::article::view))
        .route("/cari", get(controller::search::index))
        .route("/kategori/:slug", get(controller::taxonomy::category))
        .route("/rubrik/:slug", get(controller::taxonomy::rubric))
        .route("/penulis/:slug", get(controller::taxonomy::author))
        .route("/navigasi", get(controller::site::navigation))
        .route("/pengaturan", get(controller::site::settings))
        .route("/sitemap.xml", get(controller::site::sitemap))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
