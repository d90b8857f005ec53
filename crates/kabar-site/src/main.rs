//! Public site server for the `kabar` content platform.
//!
//! Boot order: config, tracing, store backend, query client, router, serve.
//! The memory backend starts with the seeded demo dataset; the HTTP backend
//! talks to the CMS configured under `[store]`.

mod config;
mod controller;
mod logger;
mod router;
mod seed;
mod sitemap;

use crate::config::{SiteConfig, StoreBackend};
use controller::AppState;
use kabar_query::ContentClient;
use kabar_store::{ContentSource, HttpStore, MemoryStore};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = SiteConfig::load().expect("failed to load the site config");
    let _guard = logger::init(&config);

    let backend = config
        .store_backend()
        .expect("failed to read the store config");
    let source: Arc<dyn ContentSource> = match backend {
        StoreBackend::Memory => {
            let store = MemoryStore::new(kabar_model::collections(), kabar_model::globals());
            seed::load(&store)
                .await
                .expect("failed to seed the memory store");
            tracing::info!("memory store seeded with the demo dataset");
            Arc::new(store)
        }
        StoreBackend::Http { base_url } => {
            tracing::info!(%base_url, "using the remote content store");
            Arc::new(HttpStore::try_new(&base_url).expect("invalid store base URL"))
        }
    };

    let state = AppState {
        client: ContentClient::new(source),
        page_size: config.page_size(),
        site_url: config.site_url(),
    };
    let app = router::routes(state);

    let addr = config.listener();
    tracing::info!(env = config.env(), %addr, "kabar-site listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind the listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}
