//! Enumeration dispatch for buckets and objects.
//!
//! Both operations delegate to the backend with the caller's filter
//! arguments unchanged and project the results through the name-only
//! summary translations. This layer imposes no filtering or ordering of
//! its own; an empty backend result yields an empty (present) sequence.

use tracing::debug;

use gcstack_core::StorageBackend;
use gcstack_model::StorageError;
use gcstack_model::types::{
    ListBucketsResponse, ListObjectsRequest, ListObjectsResponse,
};

use crate::translate;

/// Serve a ListBuckets call.
pub async fn list_buckets(
    backend: &dyn StorageBackend,
) -> Result<ListBucketsResponse, StorageError> {
    let buckets = backend.list_buckets().await?;
    debug!(count = buckets.len(), "listed buckets");
    Ok(ListBucketsResponse {
        buckets: buckets.iter().map(translate::bucket_to_wire).collect(),
    })
}

/// Serve a ListObjects call.
pub async fn list_objects(
    backend: &dyn StorageBackend,
    request: &ListObjectsRequest,
) -> Result<ListObjectsResponse, StorageError> {
    let objects = backend
        .list_objects(&request.parent, &request.prefix, request.versions)
        .await?;
    debug!(
        parent = %request.parent,
        prefix = %request.prefix,
        versions = request.versions,
        count = objects.len(),
        "listed objects"
    );
    Ok(ListObjectsResponse {
        objects: objects.iter().map(translate::object_summary_to_wire).collect(),
    })
}
