//! The query-and-pagination engine.
//!
//! Turns the optional, loosely-typed query parameters of a list request into
//! a bounded, validated store query and a consistent paginated envelope:
//!
//! 1. [`ListQuery::from_params`] normalizes raw string parameters.
//! 2. [`ProductFilter`] is the storage-agnostic predicate (a conjunction of
//!    an optional category equality and an optional inclusive price range).
//! 3. [`resolve_page`] reconciles the requested page against the actual
//!    match count, clamping rather than rejecting.
//! 4. [`list_products`] drives a store through count-then-fetch and shapes
//!    the [`Page`] envelope.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{Product, ProductResponse};
use crate::store::{ProductStore, StoreError};

/// Page number used when none (or garbage) is supplied.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none (or garbage) is supplied.
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on page size; larger requests are silently clamped.
pub const MAX_LIMIT: i64 = 100;

/// Raw query parameters as they arrive on the wire.
///
/// Everything is an optional string: `page`/`limit` are parsed tolerantly,
/// price bounds strictly. See [`ListQuery::from_params`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

/// A normalized, bounded list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Requested page, at least 1. May still exceed the last available page;
    /// [`resolve_page`] clamps it once the match count is known.
    pub page: i64,
    /// Page size, within `[1, MAX_LIMIT]`.
    pub limit: i64,
    /// The filter predicate.
    pub filter: ProductFilter,
}

impl ListQuery {
    /// Normalize raw parameters into a bounded query.
    ///
    /// `page` and `limit` are parsed tolerantly: non-numeric input falls
    /// back to the default, out-of-range values are clamped. A present
    /// `category` is trimmed, with empty-after-trim meaning "not provided".
    /// Price bounds are strict: a present bound is explicit filter intent,
    /// so one that does not parse to a finite number >= 0 is an error
    /// naming the offending parameter.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a malformed `minPrice` or `maxPrice`.
    pub fn from_params(params: ListParams) -> Result<Self, ValidationError> {
        let page = parse_lenient(params.page.as_deref())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);
        let limit = parse_lenient(params.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        let category = params
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(str::to_owned);
        let min_price = parse_price_bound(params.min_price.as_deref(), "minPrice")?;
        let max_price = parse_price_bound(params.max_price.as_deref(), "maxPrice")?;

        Ok(Self {
            page,
            limit,
            filter: ProductFilter {
                category,
                min_price,
                max_price,
            },
        })
    }
}

/// Tolerant integer parsing: `None` or non-numeric input yields `None`.
///
/// Numeric input too large for `i64` saturates instead of falling back to
/// the default, so an absurdly large page number still clamps down to the
/// last page rather than silently becoming page 1.
fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    #[allow(clippy::cast_possible_truncation)] // `as` saturates at the i64 bounds
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value as i64),
        _ => None,
    }
}

/// Strict price-bound parsing: a present bound must be a finite number >= 0.
fn parse_price_bound(raw: Option<&str>, name: &str) -> Result<Option<f64>, ValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(ValidationError::single(format!(
            "{name} must be a number greater than or equal to 0"
        ))),
    }
}

/// A storage-agnostic predicate over products.
///
/// A conjunction of an optional exact-match category constraint and an
/// optional price range where both bounds are inclusive. With no
/// constraints, this is the match-all predicate. When `min_price` exceeds
/// `max_price` the predicate simply matches no records; that is deliberate,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Whether a product satisfies every constraint of the predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

/// The reconciled position of a page within the full match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Effective page, always within `[1, pages]`.
    pub page: i64,
    /// Total page count, at least 1 even for an empty match set.
    pub pages: i64,
    /// Offset of the first record of the effective page.
    pub skip: i64,
}

/// Reconcile a requested page against the actual match count.
///
/// `pages = max(1, ceil(total / limit))`; a requested page beyond the last
/// available one is silently clamped down to the last page. An empty match
/// set resolves to `page = 1, pages = 1` rather than a zero or negative
/// page count.
///
/// Callers must pass `limit >= 1` and `requested_page >= 1`, which
/// [`ListQuery::from_params`] guarantees.
#[must_use]
pub fn resolve_page(total: i64, limit: i64, requested_page: i64) -> ResolvedPage {
    let pages = ((total + limit - 1) / limit).max(1);
    let page = requested_page.min(pages);
    let skip = (page - 1) * limit;
    ResolvedPage { page, pages, skip }
}

/// The paginated response envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

/// Execute a normalized list query against a store.
///
/// Counts the matches, resolves the effective page, then fetches the slice
/// sorted by creation time descending. The two reads are not transactional:
/// under concurrent writes `total` and `records` may be drawn from slightly
/// different states. The fetch is issued after the count because the
/// clamped offset depends on the match total.
///
/// # Errors
///
/// Propagates `StoreError` unchanged; this function adds no failure modes
/// of its own and performs no retries.
pub async fn list_products(
    store: &dyn ProductStore,
    query: &ListQuery,
) -> Result<Page<ProductResponse>, StoreError> {
    let total = store.count(&query.filter).await?;
    let resolved = resolve_page(total, query.limit, query.page);
    let records = store
        .find(&query.filter, resolved.skip, query.limit)
        .await?;

    debug_assert!(records.len() as i64 <= query.limit);
    Ok(Page {
        records: records.into_iter().map(ProductResponse::from).collect(),
        total,
        page: resolved.page,
        pages: resolved.pages,
    })
}
