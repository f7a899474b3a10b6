//! Method-level dispatch from decoded operation to handler.
//!
//! The transport shell hands this module the resolved [`StorageOperation`]
//! and the raw request body; it decodes the per-method request message,
//! invokes the matching server handler, and serializes the response. Every
//! recognized-but-unsupported method falls through to a uniform
//! `UNIMPLEMENTED` error carrying the method name.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use gcstack_model::types::{ListBucketsRequest, ListObjectsRequest};
use gcstack_model::{StorageError, StorageOperation};

use crate::frames;
use crate::server::StorageServer;

fn decode_request<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, StorageError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| StorageError::invalid_argument(format!("malformed request: {err}")))
}

fn encode_response<T: Serialize>(response: &T) -> Result<Bytes, StorageError> {
    let encoded = serde_json::to_vec(response)
        .map_err(|err| StorageError::internal(format!("response serialization: {err}")))?;
    Ok(Bytes::from(encoded))
}

/// Route one call to its handler and return the serialized response body.
pub async fn dispatch(
    server: &StorageServer,
    op: StorageOperation,
    body: Bytes,
) -> Result<Bytes, StorageError> {
    if !op.is_supported() {
        return Err(StorageError::unimplemented(op.as_str()));
    }
    debug!(method = %op, body_len = body.len(), "dispatching call");
    match op {
        StorageOperation::ListBuckets => {
            let _request: ListBucketsRequest = decode_request(&body)?;
            encode_response(&server.list_buckets().await?)
        }
        StorageOperation::ListObjects => {
            let request: ListObjectsRequest = decode_request(&body)?;
            encode_response(&server.list_objects(&request).await?)
        }
        StorageOperation::WriteObject => {
            let stream = frames::frame_stream(&body);
            encode_response(&server.write_object(stream).await?)
        }
        // is_supported() gates every other member above.
        _ => Err(StorageError::unimplemented(op.as_str())),
    }
}
