//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine components:
//! - `catalog` - Facet extraction, price bucketing, filtering, and sorting
//! - `favorites` - Per-shopper favorites reconciliation
//! - `docstore` - Hosted document store client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no document store
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, products, and
//!   order summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
