//! Device-local favorites scope.
//!
//! The anonymous scope lives in whatever synchronous key-value storage the
//! host platform provides (browser local storage, a mobile preferences file).
//! Values are the favorite list serialized as JSON text under
//! `favorites_{tenantId}`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use clementine_core::TenantId;

use crate::entry::FavoriteEntry;
use crate::store::{FavoritesError, LocalFavoriteStore};

/// Synchronous text key-value storage provided by the host platform.
pub trait DeviceStorage {
    /// Read the text value at a key, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Local` if storage is unreachable.
    fn get_item(&self, key: &str) -> Result<Option<String>, FavoritesError>;

    /// Write a text value at a key.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Local` if storage is unreachable or full.
    fn set_item(&self, key: &str, value: &str) -> Result<(), FavoritesError>;

    /// Remove a key. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError::Local` if storage is unreachable.
    fn remove_item(&self, key: &str) -> Result<(), FavoritesError>;
}

/// The storage key for a tenant's anonymous favorites.
fn storage_key(tenant: &TenantId) -> String {
    format!("favorites_{tenant}")
}

/// The anonymous favorites scope over any [`DeviceStorage`].
#[derive(Debug, Clone)]
pub struct DeviceStorageFavorites<S> {
    storage: S,
}

impl<S: DeviceStorage> DeviceStorageFavorites<S> {
    /// Wrap a device storage as the anonymous favorites scope.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: DeviceStorage> LocalFavoriteStore for DeviceStorageFavorites<S> {
    fn load(&self, tenant: &TenantId) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        match self.storage.get_item(&storage_key(tenant))? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, tenant: &TenantId, entries: &[FavoriteEntry]) -> Result<(), FavoritesError> {
        let text = serde_json::to_string(entries)?;
        self.storage.set_item(&storage_key(tenant), &text)
    }

    fn clear(&self, tenant: &TenantId) -> Result<(), FavoritesError> {
        self.storage.remove_item(&storage_key(tenant))
    }
}

/// In-memory device storage, used in tests and headless embeddings.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// An empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), FavoritesError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), FavoritesError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

impl<S: DeviceStorage> DeviceStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        S::get_item(self, key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), FavoritesError> {
        S::set_item(self, key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), FavoritesError> {
        S::remove_item(self, key)
    }
}
