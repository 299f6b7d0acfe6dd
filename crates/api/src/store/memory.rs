//! In-memory product store.
//!
//! Backs unit and router-level tests; implements the same contract as the
//! `PostgreSQL` store, including newest-first ordering and the predicate
//! semantics.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use catalog_core::ProductId;

use super::{ProductStore, StoreError};
use crate::listing::ProductFilter;
use crate::models::Product;
use crate::validate::{NewProduct, ProductPatch};

/// A product store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| filter.matches(p)).count() as i64)
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        // Reverse insertion order, then a stable sort on the timestamp:
        // records created in the same instant stay newest-inserted-first.
        let mut matches: Vec<Product> = products
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(matches.into_iter().skip(skip).take(limit).collect())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let now = Utc::now();
        let record = Product {
            id: ProductId::new(Uuid::new_v4()),
            name: product.name,
            price: product.price,
            category: product.category,
            created_at: now,
            updated_at: now,
        };
        self.products.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        let Some(record) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(price) = patch.price {
            record.price = price;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
