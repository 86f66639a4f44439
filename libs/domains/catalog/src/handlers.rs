//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{
    UuidPath,
    errors::responses::{
        BadRequestUuidResponse, DatabaseUnavailableResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::ProductFilter;
use crate::repository::CatalogRepository;
use crate::service::CatalogService;
use crate::views::{ProductDetailView, ProductListView, PropertyView, UnitView};

#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product),
    components(
        schemas(ProductListView, ProductDetailView, UnitView, PropertyView),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse,
            DatabaseUnavailableResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Product listing and detail")
    )
)]
pub struct ApiDoc;

/// Routes relative to where the router is nested (e.g. `/products`).
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// List products
#[utoipa::path(
    get,
    path = "",
    tag = "Catalog",
    params(ProductFilter),
    responses(
        (status = 200, description = "Page of products", body = Vec<ProductListView>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> CatalogResult<Json<Vec<ProductListView>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Get a product with its units
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductDetailView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn get_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductDetailView>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}
