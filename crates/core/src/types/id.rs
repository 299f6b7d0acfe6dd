//! Newtype ID for type-safe product references.
//!
//! The identifier is opaque to clients: it is rendered as a string token on
//! the wire and parsed back with structural validation. A token that does not
//! parse is a client input error and is rejected before any storage lookup.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when an identifier token is structurally malformed.
#[derive(Debug, thiserror::Error)]
#[error("invalid product id: {0}")]
pub struct ParseProductIdError(String);

/// A type-safe product identifier.
///
/// Wraps a UUID assigned by the storage layer. Serializes transparently as
/// its canonical hyphenated string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Create an ID from an already-validated UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier token, validating its structure.
    ///
    /// # Errors
    ///
    /// Returns `ParseProductIdError` if the token is not a well-formed UUID.
    /// This check is purely structural: a well-formed token may still refer
    /// to no existing record.
    pub fn parse(token: &str) -> Result<Self, ParseProductIdError> {
        Uuid::parse_str(token)
            .map(Self)
            .map_err(|_| ParseProductIdError(token.to_owned()))
    }

    /// Get the underlying UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ProductId> for Uuid {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ProductId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ProductId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ProductId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
