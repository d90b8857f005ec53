//! Request handlers for the public site.
//!
//! Each handler returns the page payload its template renders; markup is the
//! front end's concern.

pub(crate) mod article;
pub(crate) mod home;
pub(crate) mod search;
pub(crate) mod site;
pub(crate) mod taxonomy;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kabar_core::{error::Error, json};
use kabar_query::ContentClient;

/// Shared state of the request handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The query layer handle.
    pub(crate) client: ContentClient,
    /// Articles per listing page.
    pub(crate) page_size: u64,
    /// Canonical base URL of the site.
    pub(crate) site_url: String,
}

/// A rejection response.
pub(crate) enum Rejection {
    /// 404 Not Found
    NotFound(Error),
    /// 500 Internal Server Error
    InternalServerError(Error),
}

impl Rejection {
    /// Creates a `NotFound` rejection.
    #[inline]
    pub(crate) fn not_found(message: impl Into<kabar_core::SharedString>) -> Self {
        Rejection::NotFound(Error::new(message))
    }
}

impl From<Error> for Rejection {
    #[inline]
    fn from(err: Error) -> Self {
        Rejection::InternalServerError(err)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let (status, err) = match self {
            Rejection::NotFound(err) => (StatusCode::NOT_FOUND, err),
            Rejection::InternalServerError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };
        if status.is_server_error() {
            tracing::error!(error = err.message(), "request failed");
        }
        (status, Json(json!({ "error": err.message() }))).into_response()
    }
}

/// Parses a `page` query parameter permissively: anything unparseable or
/// below one is the first page.
pub(crate) fn parse_page(param: Option<&str>) -> u64 {
    param
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::parse_page;

    #[test]
    fn it_parses_page_parameters_permissively() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("7")), 7);
    }
}
