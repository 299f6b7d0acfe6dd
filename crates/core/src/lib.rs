//! Catalog Core - Shared types library.
//!
//! This crate provides common types used across the catalog components:
//! - `api` - HTTP service exposing the product catalog
//! - `integration-tests` - Router-level tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
