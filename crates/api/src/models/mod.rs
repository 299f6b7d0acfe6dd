//! Domain and wire types for catalog entities.

pub mod product;

pub use product::{Product, ProductResponse};
