//! Integration tests for the catalog service.
//!
//! The tests in `tests/` build the real router against the in-memory store
//! and drive it with `tower::ServiceExt::oneshot`, so no database or
//! running server is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
