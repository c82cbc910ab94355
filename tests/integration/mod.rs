//! Integration tests
//!
//! End-to-end tests through the full router over the in-memory store.

pub mod api;
