//! Account registration routes

use axum::Router;
use domain_accounts::{AccountService, PgAccountRepository, handlers};

use crate::state::AppState;

/// Routers for `/users` and `/sellers`.
pub fn routers(state: &AppState) -> (Router, Router) {
    let repository = PgAccountRepository::new(state.db.clone());
    let service = AccountService::new(repository, state.config.password_policy.clone());
    handlers::routers(service)
}
