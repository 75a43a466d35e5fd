//! Clementine Document Store - client for the hosted multi-tenant store.
//!
//! The platform's backing store is an external, hierarchical document store
//! addressed by `{collection}/{id}` paths. The core only ever needs four
//! operations - read-all-in-collection, read-by-key, upsert-by-key, and
//! delete-by-key - and this crate provides exactly those over REST, plus:
//!
//! - [`config`] - environment-driven configuration with secret redaction
//! - [`paths`] - the tenant/shopper addressing scheme
//! - [`products`] - a cached repository over tenant product collections
//!
//! There are no transactions, joins, or server-side queries; tenant equality
//! filtering is pushed down by addressing tenant-scoped collections, and all
//! faceting happens client-side on the returned set.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod config;
mod error;
pub mod paths;
pub mod products;

pub use client::{DocStoreClient, Document};
pub use config::{ConfigError, DocStoreConfig};
pub use error::DocStoreError;
pub use products::ProductCatalog;
