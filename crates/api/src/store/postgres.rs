//! `PostgreSQL` product store.
//!
//! The dynamic predicate is rendered with `QueryBuilder` so the crate
//! compiles without a live database. Schema-level constraints in the
//! migration mirror the validator's rules as a last line of defense.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use catalog_core::ProductId;

use super::{ProductStore, StoreError};
use crate::listing::ProductFilter;
use crate::models::Product;
use crate::validate::{NewProduct, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, price, category, created_at, updated_at";

/// A product store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn connect(database_url: &secrecy::SecretString) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;
        Ok(Self { pool })
    }

    /// Run embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError` if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Access the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Row shape as stored; converted into the domain type after fetching.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: f64,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Append the predicate as a `WHERE` clause (empty for match-all).
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut prefix = " WHERE ";
    if let Some(category) = &filter.category {
        builder.push(prefix).push("category = ").push_bind(category.clone());
        prefix = " AND ";
    }
    if let Some(min) = filter.min_price {
        builder.push(prefix).push("price >= ").push_bind(min);
        prefix = " AND ";
    }
    if let Some(max) = filter.max_price {
        builder.push(prefix).push("price <= ").push_bind(max);
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM products");
        push_filter(&mut builder, filter);
        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Product>, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(skip);

        let rows: Vec<ProductRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products (name, price, category) VALUES ($1, $2, $3) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.name)
        .bind(product.price)
        .bind(product.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }

    async fn update_by_id(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = now()");
        if let Some(name) = patch.name {
            builder.push(", name = ").push_bind(name);
        }
        if let Some(price) = patch.price {
            builder.push(", price = ").push_bind(price);
        }
        if let Some(category) = patch.category {
            builder.push(", category = ").push_bind(category);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id.as_uuid());
        builder.push(format!(" RETURNING {PRODUCT_COLUMNS}"));

        let row: Option<ProductRow> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Product::from))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
