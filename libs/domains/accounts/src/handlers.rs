//! HTTP handlers for account registration

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConsistencyErrorResponse, DatabaseUnavailableResponse,
        InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AccountResult;
use crate::models::{RegisterSeller, RegisterUser, SellerResponse, UserResponse};
use crate::repository::AccountRepository;
use crate::service::AccountService;

#[derive(OpenApi)]
#[openapi(
    paths(register_user, register_seller),
    components(
        schemas(RegisterUser, RegisterSeller, UserResponse, SellerResponse),
        responses(
            BadRequestValidationResponse,
            ConsistencyErrorResponse,
            InternalServerErrorResponse,
            DatabaseUnavailableResponse
        )
    ),
    tags(
        (name = "Accounts", description = "User and seller registration")
    )
)]
pub struct ApiDoc;

/// Routers for `/users` and `/sellers`, sharing one service.
pub fn routers<R: AccountRepository + 'static>(service: AccountService<R>) -> (Router, Router) {
    let shared_service = Arc::new(service);

    let users = Router::new()
        .route("/", post(register_user))
        .with_state(shared_service.clone());
    let sellers = Router::new()
        .route("/", post(register_seller))
        .with_state(shared_service);

    (users, sellers)
}

/// Register a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Accounts",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn register_user<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> AccountResult<(StatusCode, Json<UserResponse>)> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Register a seller with its staff user
#[utoipa::path(
    post,
    path = "/sellers",
    tag = "Accounts",
    request_body = RegisterSeller,
    responses(
        (status = 201, description = "Seller registered", body = SellerResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = ConsistencyErrorResponse),
        (status = 503, response = DatabaseUnavailableResponse)
    )
)]
async fn register_seller<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterSeller>,
) -> AccountResult<(StatusCode, Json<SellerResponse>)> {
    let created = service.create_seller(input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
