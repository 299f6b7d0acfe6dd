//! Field-level validation for create and partial-update requests.
//!
//! Create requires all three mutable fields; every violation is collected so
//! a single response lists all broken rules. Partial update accepts any
//! subset, where an empty string (`name`/`category`) or a zero `price` is
//! normalized to "not provided" before validation - that normalization is
//! one explicit pre-processing step, not an implicit falsy check.

use serde::Deserialize;

use crate::error::ValidationError;

/// Maximum length of a product name, after trimming.
pub const MAX_NAME_LEN: usize = 200;
/// Maximum length of a category label, after trimming.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Wire shape of a create request. All fields optional so that missing
/// fields surface as validation messages rather than deserialization errors.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Wire shape of a partial-update request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// A fully validated create payload. Strings are already trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// A validated partial update. Only `Some` fields are written; strings are
/// already trimmed. Never empty: validation rejects an all-absent patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl ProductPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none()
    }
}

impl NewProduct {
    /// Validate a create request, aggregating every violated rule.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing all violations when any field is
    /// missing or out of constraint.
    pub fn validate(request: CreateProductRequest) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        let name = match request.name.as_deref().map(str::trim) {
            None => {
                violations.push("name is required".to_string());
                None
            }
            Some(name) => {
                check_text("name", name, MAX_NAME_LEN, &mut violations);
                Some(name.to_owned())
            }
        };

        let price = match request.price {
            None => {
                violations.push("price is required".to_string());
                None
            }
            Some(price) => {
                check_price(price, &mut violations);
                Some(price)
            }
        };

        let category = match request.category.as_deref().map(str::trim) {
            None => {
                violations.push("category is required".to_string());
                None
            }
            Some(category) => {
                check_text("category", category, MAX_CATEGORY_LEN, &mut violations);
                Some(category.to_owned())
            }
        };

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        // All three are Some when no violation was recorded.
        match (name, price, category) {
            (Some(name), Some(price), Some(category)) => Ok(Self {
                name,
                price,
                category,
            }),
            _ => unreachable!("missing fields always record a violation"),
        }
    }
}

impl ProductPatch {
    /// Validate a partial-update request.
    ///
    /// Empty strings and a zero price mean "leave unchanged" and are dropped
    /// before validation. Each remaining field must independently satisfy
    /// its constraint; if nothing remains the request is rejected.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when a supplied field is out of
    /// constraint, or when no effective field remains after normalization.
    pub fn validate(request: UpdateProductRequest) -> Result<Self, ValidationError> {
        // Explicit empty-equals-absent normalization, in one place.
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let price = request.price.filter(|&price| price != 0.0);
        let category = request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty());

        let mut violations = Vec::new();
        if let Some(name) = name {
            check_text("name", name, MAX_NAME_LEN, &mut violations);
        }
        if let Some(price) = price {
            check_price(price, &mut violations);
        }
        if let Some(category) = category {
            check_text("category", category, MAX_CATEGORY_LEN, &mut violations);
        }
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        let patch = Self {
            name: name.map(str::to_owned),
            price,
            category: category.map(str::to_owned),
        };
        if patch.is_empty() {
            return Err(ValidationError::single(
                "at least one field must be provided",
            ));
        }
        Ok(patch)
    }
}

fn check_text(field: &str, value: &str, max_len: usize, violations: &mut Vec<String>) {
    if value.is_empty() {
        violations.push(format!("{field} must not be empty"));
    } else if value.chars().count() > max_len {
        violations.push(format!("{field} must be at most {max_len} characters"));
    }
}

fn check_price(price: f64, violations: &mut Vec<String>) {
    if !price.is_finite() || price <= 0.0 {
        violations.push("price must be a finite number greater than 0".to_string());
    }
}
