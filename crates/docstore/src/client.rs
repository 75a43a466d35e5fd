//! REST client for the hosted document store.
//!
//! Speaks the store's plain `v1` document API with bearer authentication.
//! The client is cheap to clone; all state lives behind an `Arc`.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::DocStoreConfig;
use crate::error::DocStoreError;

/// A document read from a collection, with its id alongside the decoded body.
#[derive(Debug, Clone)]
pub struct Document<T> {
    pub id: String,
    pub data: T,
}

/// Wire envelope for a single document.
#[derive(Debug, serde::Deserialize)]
struct DocumentEnvelope {
    id: String,
    data: serde_json::Value,
}

/// Wire envelope for a collection read.
#[derive(Debug, serde::Deserialize)]
struct CollectionEnvelope {
    #[serde(default)]
    documents: Vec<DocumentEnvelope>,
}

/// Client for the hosted document store.
///
/// Supports exactly the four operations the platform needs:
/// read-all-in-collection, read-by-key, upsert-by-key, delete-by-key.
#[derive(Clone)]
pub struct DocStoreClient {
    inner: Arc<DocStoreClientInner>,
}

struct DocStoreClientInner {
    client: reqwest::Client,
    config: DocStoreConfig,
}

impl DocStoreClient {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: DocStoreConfig) -> Self {
        Self {
            inner: Arc::new(DocStoreClientInner {
                client: reqwest::Client::new(),
                config,
            }),
        }
    }

    /// The configured cache TTL, shared with repositories built on top.
    #[must_use]
    pub fn cache_ttl(&self) -> std::time::Duration {
        self.inner.config.cache_ttl
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.config.base_url.as_str().trim_end_matches('/');
        format!("{base}/v1/{path}")
    }

    /// Read every document in a collection.
    ///
    /// Documents whose body fails to decode as `T` are logged and skipped -
    /// one malformed document must not take the whole collection down. A
    /// missing collection reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` on transport failure or a non-success status.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<Document<T>>, DocStoreError> {
        let url = self.endpoint(collection);
        let response = self.send(self.inner.client.get(&url)).await?;

        let Some(response) = response else {
            return Ok(Vec::new());
        };

        let envelope: CollectionEnvelope = response.json().await?;
        debug!(
            collection,
            count = envelope.documents.len(),
            "Read collection"
        );

        let mut documents = Vec::with_capacity(envelope.documents.len());
        for doc in envelope.documents {
            match serde_json::from_value::<T>(doc.data) {
                Ok(data) => documents.push(Document { id: doc.id, data }),
                Err(e) => {
                    warn!(
                        collection,
                        id = %doc.id,
                        error = %e,
                        "Skipping malformed document"
                    );
                }
            }
        }
        Ok(documents)
    }

    /// Read a single document by key. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` on transport failure, a non-success status,
    /// or a body that fails to decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, DocStoreError> {
        let path = format!("{collection}/{id}");
        let url = self.endpoint(&path);
        let response = self.send(self.inner.client.get(&url)).await?;

        let Some(response) = response else {
            return Ok(None);
        };

        let envelope: DocumentEnvelope = response.json().await?;
        let data = serde_json::from_value(envelope.data)
            .map_err(|source| DocStoreError::Decode { path, source })?;
        Ok(Some(data))
    }

    /// Upsert a document by key.
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` on transport failure or a non-success status.
    pub async fn put<T: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        data: &T,
    ) -> Result<(), DocStoreError> {
        let url = self.endpoint(&format!("{collection}/{id}"));
        self.send(self.inner.client.put(&url).json(data)).await?;
        debug!(collection, id, "Upserted document");
        Ok(())
    }

    /// Delete a document by key. Deleting a missing document is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` on transport failure or a non-success status.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), DocStoreError> {
        let url = self.endpoint(&format!("{collection}/{id}"));
        self.send(self.inner.client.delete(&url)).await?;
        debug!(collection, id, "Deleted document");
        Ok(())
    }

    /// Send a request with auth, mapping the store's failure statuses.
    ///
    /// Returns `Ok(None)` for 404 so callers can treat missing documents and
    /// collections as absent rather than as errors.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<reqwest::Response>, DocStoreError> {
        let response = request
            .bearer_auth(self.inner.config.api_key.expose_secret())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(DocStoreError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocStoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(Some(response))
    }
}
