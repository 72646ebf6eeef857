//! HTTP handler errors
//!
//! Clients get a short plain-text message; the detail goes to the log.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use film_catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unsupported method: {0}")]
    MethodNotAllowed(Method),

    #[error("unsupported Content-Type: {0:?}")]
    UnsupportedContentType(String),

    #[error("failed to decode request body")]
    Decode(#[source] serde_json::Error),

    #[error("request did not name a film")]
    MissingHash,

    #[error("failed to render template")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Only POST requests are supported",
            ),
            AppError::UnsupportedContentType(_) => {
                (StatusCode::BAD_REQUEST, "Unsupported Content-Type")
            }
            AppError::Catalog(CatalogError::Empty) => {
                (StatusCode::NOT_FOUND, "There are no films yet")
            }
            // Decode failures stay 500; existing clients only distinguish 405/400
            AppError::Decode(_)
            | AppError::MissingHash
            | AppError::Template(_)
            | AppError::Catalog(_) => (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let report = color_eyre::eyre::Report::new(self);
        if status.is_server_error() {
            tracing::error!("request failed: {:#}", report);
        } else {
            tracing::warn!("bad request: {:#}", report);
        }

        (status, message).into_response()
    }
}
