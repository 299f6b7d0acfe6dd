//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! POST   /products       - Create a product (201)
//! GET    /products       - List products (filter + pagination envelope)
//! GET    /products/{id}  - Fetch one product (200 / 404)
//! PUT    /products/{id}  - Partial update (200 / 404)
//! DELETE /products/{id}  - Delete (204 / 404)
//! ```
//!
//! Health probes (`/health`, `/health/ready`) live in `main.rs`.

pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the catalog routes. State is applied by the caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::create).get(products::list))
        .route(
            "/products/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::remove),
        )
}
