//! Catalog service abstraction and HTTP implementation.
//!
//! This module defines the [`CatalogService`] trait that abstracts over the
//! remote museum catalog, plus [`HttpCatalog`], the implementation backed by
//! the public Met collection API. Keeping the trait at this seam lets the
//! gallery session be driven by an in-memory fake in tests without touching
//! the network.

use crate::catalog::models::{ObjectResponse, SearchResponse};
use crate::domain::Result;
use async_trait::async_trait;

/// Default base URL of the public Met collection API.
pub const DEFAULT_BASE_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1";

/// Abstraction over the remote museum catalog.
///
/// Two operations, matching the two endpoints the gallery consumes: free-text
/// search returning ordered candidate IDs, and per-object lookup. Both are
/// plain reads; the catalog is never mutated.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Searches the catalog and returns matching object IDs in relevance order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level. A term
    /// that matches nothing is `Ok(vec![])`, not an error.
    async fn search(&self, term: &str) -> Result<Vec<u64>>;

    /// Fetches a single object by ID.
    ///
    /// An unknown ID is not an error at this layer: the catalog answers with
    /// an effectively empty body, which the caller rejects during conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    async fn fetch_object(&self, id: u64) -> Result<ObjectResponse>;
}

/// [`CatalogService`] implementation over the live Met collection API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client against the given API base URL.
    ///
    /// Trailing slashes on `base_url` are tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn search(&self, term: &str) -> Result<Vec<u64>> {
        let url = format!("{}/search", self.base_url);
        let response: SearchResponse = self
            .http
            .get(url)
            .query(&[("q", term)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids = response.into_ids();
        tracing::debug!(term = %term, result_count = ids.len(), "catalog search complete");
        Ok(ids)
    }

    async fn fetch_object(&self, id: u64) -> Result<ObjectResponse> {
        let url = format!("{}/objects/{id}", self.base_url);
        let response: ObjectResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::trace!(object_id = id, found = response.object_id.is_some(), "object fetched");
        Ok(response)
    }
}
