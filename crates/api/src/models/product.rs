//! Product domain type and its wire projection.
//!
//! The domain type is what the store hands back; the response type is the
//! stable external representation. Keeping them separate means the wire shape
//! never drifts when storage details change.

use chrono::{DateTime, Utc};
use serde::Serialize;

use catalog_core::ProductId;

/// A catalog product (domain type).
///
/// Every persisted product satisfies the field constraints enforced by
/// [`crate::validate`]: validation happens before any write, so code reading
/// these fields can rely on them.
#[derive(Debug, Clone)]
pub struct Product {
    /// Storage-assigned unique ID, immutable after creation.
    pub id: ProductId,
    /// Display name, trimmed, non-empty, at most 200 characters.
    pub name: String,
    /// Unit price, finite and strictly positive.
    pub price: f64,
    /// Category label, trimmed, non-empty, at most 100 characters.
    pub category: String,
    /// When the product was created. Set once.
    pub created_at: DateTime<Utc>,
    /// When the product was last mutated. Equals `created_at` until the
    /// first update.
    pub updated_at: DateTime<Utc>,
}

/// External representation of a product.
///
/// The identifier is rendered as an opaque string token regardless of the
/// storage engine's native key type, and field order is stable:
/// `id`, `name`, `price`, `category`, `createdAt`, `updatedAt`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price: product.price,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
