//! Product route handlers.
//!
//! Handlers stay thin: parse the identifier, run the validator or the
//! normalizer, call the store, project the result. All policy lives in
//! [`crate::listing`] and [`crate::validate`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use catalog_core::ProductId;

use crate::error::{AppError, Result, ValidationError};
use crate::listing::{self, ListParams, ListQuery, Page};
use crate::models::ProductResponse;
use crate::state::AppState;
use crate::validate::{CreateProductRequest, NewProduct, ProductPatch, UpdateProductRequest};

/// Parse an identifier token before any storage lookup is attempted.
///
/// A malformed token is a client input error (400); a well-formed token
/// that matches nothing is a not-found outcome (404) reported by the
/// individual handlers.
fn parse_id(token: &str) -> Result<ProductId> {
    Ok(ProductId::parse(token).map_err(ValidationError::from)?)
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let product = NewProduct::validate(body)?;
    let created = state.store().insert(product).await?;
    tracing::debug!(id = %created.id, "Product created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List products with filtering and pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<ProductResponse>>> {
    let query = ListQuery::from_params(params)?;
    let page = listing::list_products(state.store(), &query).await?;
    Ok(Json(page))
}

/// Fetch a single product by identifier.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&token)?;
    let product = state
        .store()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    Ok(Json(product.into()))
}

/// Apply a partial update to a product.
pub async fn update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&token)?;
    let patch = ProductPatch::validate(body)?;
    let updated = state
        .store()
        .update_by_id(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    tracing::debug!(id = %updated.id, "Product updated");
    Ok(Json(updated.into()))
}

/// Delete a product.
pub async fn remove(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&token)?;
    if state.store().delete_by_id(id).await? {
        tracing::debug!(%id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Product".to_string()))
    }
}
