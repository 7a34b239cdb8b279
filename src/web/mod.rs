//! Web layer - HTTP routes, form handling and HTML views.
//!
//! Handlers parse submissions with [`forms`], call into [`crate::core`], then either
//! render a view or redirect (`303 See Other`) to the matching listing.

/// Form submission parsing into typed inputs
pub mod forms;
/// Request handlers, one module per record type
pub mod handlers;
/// Template rendering
pub mod views;

use crate::errors::Error;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, warn};

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Compiled templates
    pub views: Arc<views::Views>,
}

impl AppState {
    /// Creates a new `AppState` with the given connection and views.
    #[must_use]
    pub fn new(database: Arc<DatabaseConnection>, views: views::Views) -> Self {
        Self {
            database,
            views: Arc::new(views),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::home::health))
        .merge(handlers::suppliers::routes())
        .merge(handlers::inventory::routes())
        .merge(handlers::menu::routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

impl Error {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Config { .. } | Self::Database(_) | Self::Template(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
            (status, "Internal Server Error").into_response()
        } else {
            warn!(error = %self, "Request rejected");
            (status, self.to_string()).into_response()
        }
    }
}
