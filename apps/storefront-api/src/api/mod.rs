//! API routes module

pub mod accounts;
pub mod catalog;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

pub use health::ready_router;

/// Domain routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    let (users, sellers) = accounts::routers(state);

    Router::new()
        .nest("/products", catalog::router(state))
        .nest("/users", users)
        .nest("/sellers", sellers)
}

/// Prometheus scrape endpoint
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(observability::metrics_handler))
}
