//! Clementine Favorites - per-shopper favorites reconciliation.
//!
//! Every shopper has up to two copies of their favorite-product set per
//! tenant: an anonymous copy in device-local storage and an authoritated
//! copy in the remote document store. This crate owns the canonical
//! in-memory list and the rules for keeping the two scopes straight:
//!
//! - [`store`] - the injected capabilities for each scope
//! - [`local`] - the device-local scope (text key-value storage)
//! - [`remote`] - the document-store-backed authoritated scope
//! - [`reconciler`] - the two-state machine with the one-time sign-in merge
//!
//! Favorites are a low-stakes, per-shopper resource: writes are
//! last-write-wins and eventually consistent, never transactional.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod entry;
pub mod local;
pub mod reconciler;
pub mod remote;
pub mod store;

pub use entry::FavoriteEntry;
pub use local::{DeviceStorage, DeviceStorageFavorites, InMemoryStorage};
pub use reconciler::{FavoritesReconciler, ShopperScope};
pub use remote::DocStoreFavorites;
pub use store::{FavoritesError, LocalFavoriteStore, RemoteFavoriteStore};
