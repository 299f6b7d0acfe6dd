//! Catalog API library.
//!
//! This crate provides the catalog service as a library, allowing the router
//! to be built against any [`store::ProductStore`] implementation and driven
//! directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod validate;
