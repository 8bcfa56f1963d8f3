//! Router configuration.

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;
use crate::provider::AsyncHttpClient;

/// Create the router with all routes.
pub fn create_router<C: AsyncHttpClient + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/api/countries", get(handlers::countries::<C>))
        .route("/api/locate", get(handlers::locate::<C>))
        .route("/health", get(handlers::health::<C>))
        .with_state(state)
}
