//! Storage collaborators for the catalog.
//!
//! [`ProductStore`] is the boundary contract the core depends on: counting
//! and fetching against a [`ProductFilter`] predicate plus the usual by-id
//! operations. The service runs against [`postgres::PgProductStore`]; unit
//! and router tests run against [`memory::MemoryStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;

use crate::listing::ProductFilter;
use crate::models::Product;
use crate::validate::{NewProduct, ProductPatch};

/// Error from a storage collaborator.
///
/// These are infrastructural failures, never validation outcomes. The core
/// does not retry them; they surface at the boundary as opaque server-side
/// failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database rejected or failed an operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The storage collaborator contract.
///
/// `find` returns matches sorted by creation time descending. `count` and
/// `find` are independent reads with no transactional guarantee between
/// them.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Count records matching the predicate.
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError>;

    /// Fetch a slice of matches sorted by creation time descending,
    /// skipping `skip` records and returning at most `limit`.
    async fn find(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Product>, StoreError>;

    /// Insert a validated product, assigning its identifier and timestamps.
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Fetch a record by identifier, or `None` if absent.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Apply a validated partial update, refreshing `updated_at`. Returns
    /// the updated record, or `None` if absent.
    async fn update_by_id(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    /// Delete a record by identifier. Returns whether a record was deleted.
    async fn delete_by_id(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Cheap connectivity probe for the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
