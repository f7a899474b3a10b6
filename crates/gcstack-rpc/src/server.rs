//! The storage server handle: shared backend plus advertised address.
//!
//! [`StorageServer`] is the object the transport shell dispatches into. It
//! owns nothing but an injected, shared backend handle and the two address
//! strings; there is no hidden global state. Construction cannot fail, and
//! helpers that can fail return `Result` so the embedding process decides
//! whether a failure is fatal.

use std::sync::Arc;

use futures::Stream;
use tracing::info;

use gcstack_core::backend::{BackendResult, StorageBackend};
use gcstack_model::StorageError;
use gcstack_model::types::{
    ListBucketsResponse, ListObjectsRequest, ListObjectsResponse, WriteObjectRequest,
    WriteObjectResponse,
};

use crate::{listing, upload};

/// The RPC-facing server state shared across all concurrent calls.
///
/// Cloning is cheap; all clones share the same backend.
#[derive(Clone)]
pub struct StorageServer {
    backend: Arc<dyn StorageBackend>,
    bound_addr: String,
    external_url: String,
}

impl std::fmt::Debug for StorageServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageServer")
            .field("bound_addr", &self.bound_addr)
            .field("external_url", &self.external_url)
            .finish_non_exhaustive()
    }
}

impl StorageServer {
    /// Create a server over an injected backend.
    ///
    /// `bound_addr` is the address the listener actually bound to;
    /// `external_url` is the configured externally advertised URL, empty
    /// when unset.
    #[must_use]
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        bound_addr: impl Into<String>,
        external_url: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            bound_addr: bound_addr.into(),
            external_url: external_url.into(),
        }
    }

    /// The externally resolvable URL of this server.
    ///
    /// Resolved lazily on every call: the configured external URL if set,
    /// otherwise the bound listen address, otherwise empty.
    #[must_use]
    pub fn url(&self) -> &str {
        if !self.external_url.is_empty() {
            return &self.external_url;
        }
        if !self.bound_addr.is_empty() {
            return &self.bound_addr;
        }
        ""
    }

    /// Shared handle to the backend.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        Arc::clone(&self.backend)
    }

    /// Create a bucket directly on the backend, for startup seeding.
    pub async fn create_bucket_with_opts(
        &self,
        name: &str,
        versioning_enabled: bool,
    ) -> BackendResult<()> {
        self.backend.create_bucket(name, versioning_enabled).await?;
        info!(bucket = name, versioning_enabled, "seeded bucket");
        Ok(())
    }

    /// Serve a ListBuckets call.
    pub async fn list_buckets(&self) -> Result<ListBucketsResponse, StorageError> {
        listing::list_buckets(self.backend.as_ref()).await
    }

    /// Serve a ListObjects call.
    pub async fn list_objects(
        &self,
        request: &ListObjectsRequest,
    ) -> Result<ListObjectsResponse, StorageError> {
        listing::list_objects(self.backend.as_ref(), request).await
    }

    /// Serve a WriteObject client stream.
    pub async fn write_object<S>(&self, frames: S) -> Result<WriteObjectResponse, StorageError>
    where
        S: Stream<Item = Result<WriteObjectRequest, StorageError>> + Unpin,
    {
        upload::ingest(self.backend.as_ref(), frames).await
    }
}

#[cfg(test)]
mod tests {
    use gcstack_core::MemoryBackend;

    use super::*;

    fn server(bound: &str, external: &str) -> StorageServer {
        StorageServer::new(Arc::new(MemoryBackend::new()), bound, external)
    }

    #[test]
    fn test_should_prefer_external_url() {
        let s = server("127.0.0.1:4443", "https://storage.example.test");
        assert_eq!(s.url(), "https://storage.example.test");
    }

    #[test]
    fn test_should_fall_back_to_bound_address() {
        let s = server("127.0.0.1:4443", "");
        assert_eq!(s.url(), "127.0.0.1:4443");
    }

    #[test]
    fn test_should_yield_empty_url_when_nothing_is_set() {
        let s = server("", "");
        assert_eq!(s.url(), "");
    }

    #[tokio::test]
    async fn test_should_seed_buckets_and_surface_backend_errors() {
        let s = server("127.0.0.1:4443", "");
        s.create_bucket_with_opts("b", true).await.expect("first seed");
        assert!(s.create_bucket_with_opts("b", true).await.is_err());
    }

    #[tokio::test]
    async fn test_should_list_seeded_buckets() {
        let s = server("127.0.0.1:4443", "");
        s.create_bucket_with_opts("b", false).await.expect("seed");
        let response = s.list_buckets().await.expect("list");
        assert_eq!(response.buckets.len(), 1);
        assert_eq!(response.buckets[0].name, "b");
    }
}
