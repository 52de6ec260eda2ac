//! HTTP route handlers.

pub mod api;
pub mod console;
pub mod extension;
pub mod health;
pub mod theme;

use axum::Router;

use crate::state::AppState;

/// All application routes, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(api::router())
        .merge(extension::router())
        .merge(console::router())
        .merge(theme::router())
}
