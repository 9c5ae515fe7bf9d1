use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    products::{
        dto::{CreateProductRequest, DeleteParams, ProductData, UpdateProductRequest},
        filter::{filter_products, ProductFilter},
        repo_types::Product,
    },
    state::AppState,
};

pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/product", get(list_catalog))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_owned))
        .route(
            "/product",
            axum::routing::post(create_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

/// Public catalog. Optional query params (search, min_price, max_price,
/// min_rating) apply the shared filter; without them the full set returns.
#[instrument(skip(state))]
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = Product::list_all(&state.db).await?;
    if filter.is_empty() {
        return Ok(Json(products));
    }
    Ok(Json(filter_products(&products, &filter)))
}

#[instrument(skip(state, user))]
pub async fn list_owned(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = Product::list_by_owner(&state.db, user.id).await?;
    Ok(Json(products))
}

#[instrument(skip(state, user, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ProductData>, ApiError> {
    let new = payload.validate()?;
    let product = Product::insert(&state.db, user.id, &new).await?;
    info!(product_id = %product.id, owner = %user.id, "product created");
    Ok(Json(ProductData { data: product }))
}

#[instrument(skip(state, user, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductData>, ApiError> {
    let (id, patch) = payload.validate()?;
    check_ownership(&state, id, user.id).await?;

    // The row can disappear between the ownership check and the update.
    let product = Product::update(&state.db, id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    info!(product_id = %id, owner = %user.id, "product updated");
    Ok(Json(ProductData { data: product }))
}

#[instrument(skip(state, user))]
pub async fn delete_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, ApiError> {
    check_ownership(&state, params.id, user.id).await?;

    Product::delete(&state.db, params.id).await?;
    info!(product_id = %params.id, owner = %user.id, "product deleted");
    Ok(StatusCode::OK)
}

/// Mutations require the product to exist and belong to the caller.
fn authorize(found: Option<&Product>, caller_id: Uuid) -> Result<(), ApiError> {
    let product = found.ok_or(ApiError::NotFound("Product"))?;
    if product.user_id != caller_id {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

async fn check_ownership(state: &AppState, id: Uuid, owner_id: Uuid) -> Result<(), ApiError> {
    let existing = Product::find_by_id(&state.db, id).await?;
    authorize(existing.as_ref(), owner_id)
}
