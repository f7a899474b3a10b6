//! The abstract storage backend contract.
//!
//! The wire layer consumes storage exclusively through [`StorageBackend`].
//! Persistence strategy, versioning semantics, and cross-call consistency
//! are entirely the implementor's responsibility; the wire layer adds no
//! locking of its own and propagates every backend error verbatim.

use async_trait::async_trait;

use crate::types::{BucketRecord, ObjectRecord, ObjectWriteRequest};

/// Errors produced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The referenced bucket does not exist.
    #[error("bucket not found: {bucket}")]
    BucketNotFound {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The bucket being created already exists.
    #[error("bucket already exists: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// Internal backend failure with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<BackendError> for gcstack_model::StorageError {
    fn from(err: BackendError) -> Self {
        use gcstack_model::RpcCode;

        let message = err.to_string();
        let code = match err {
            BackendError::BucketNotFound { .. } => RpcCode::NotFound,
            BackendError::BucketAlreadyExists { .. } => RpcCode::AlreadyExists,
            BackendError::Internal(_) => RpcCode::Internal,
        };
        Self::with_message(code, message)
    }
}

/// Convenience result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// The capability set the wire layer requires from storage.
///
/// A single backend instance is shared across all concurrent RPC calls via
/// `Arc<dyn StorageBackend>`; implementations must be safe for concurrent
/// reads and writes.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Create a bucket, optionally with versioning enabled.
    async fn create_bucket(&self, name: &str, versioning_enabled: bool) -> BackendResult<()>;

    /// Enumerate all buckets.
    async fn list_buckets(&self) -> BackendResult<Vec<BucketRecord>>;

    /// Enumerate objects in `parent` whose names start with `prefix`,
    /// optionally including noncurrent versions.
    async fn list_objects(
        &self,
        parent: &str,
        prefix: &str,
        versions: bool,
    ) -> BackendResult<Vec<ObjectRecord>>;

    /// Commit one object atomically and return the authoritative record.
    async fn create_object(&self, request: ObjectWriteRequest) -> BackendResult<ObjectRecord>;
}

#[cfg(test)]
mod tests {
    use gcstack_model::{RpcCode, StorageError};

    use super::*;

    #[test]
    fn test_should_map_bucket_not_found_to_not_found_status() {
        let err = BackendError::BucketNotFound {
            bucket: "missing".to_owned(),
        };
        let status: StorageError = err.into();
        assert_eq!(status.code, RpcCode::NotFound);
        assert!(status.message.contains("missing"));
    }

    #[test]
    fn test_should_map_duplicate_bucket_to_already_exists_status() {
        let err = BackendError::BucketAlreadyExists {
            bucket: "taken".to_owned(),
        };
        let status: StorageError = err.into();
        assert_eq!(status.code, RpcCode::AlreadyExists);
    }

    #[test]
    fn test_should_map_internal_error_and_keep_message() {
        let err = BackendError::Internal(anyhow::anyhow!("disk I/O failure"));
        let status: StorageError = err.into();
        assert_eq!(status.code, RpcCode::Internal);
        assert!(status.message.contains("disk I/O failure"));
    }
}
