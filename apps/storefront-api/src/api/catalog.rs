//! Catalog API routes

use axum::Router;
use domain_catalog::{CatalogService, PgCatalogRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgCatalogRepository::new(state.db.clone());
    let service = CatalogService::new(repository, state.config.media.clone());
    handlers::router(service)
}
