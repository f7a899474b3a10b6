//! Streamed-upload ingestion.
//!
//! A WriteObject stream moves through four states:
//!
//! ```text
//! AwaitingSpec -> Accumulating -> Committing -> Acknowledged | Failed
//! ```
//!
//! The first frame must carry both a non-empty data payload and the upload
//! spec; anything else aborts the stream with the fixed protocol-violation
//! status before the backend is contacted. Payload bytes accumulate in
//! arrival order; the optional CRC32C is read from the first frame only.
//! Commit is a single atomic backend call and the acknowledgment is the one
//! terminal response of the stream. No state is retried; any failure is
//! terminal.

use bytes::BytesMut;
use futures::{Stream, StreamExt};
use tracing::debug;

use gcstack_core::StorageBackend;
use gcstack_core::acl::acl_for_preset;
use gcstack_core::checksum::{encode_crc32c, encoded_md5_hash, etag_for};
use gcstack_core::types::ObjectWriteRequest;
use gcstack_model::StorageError;
use gcstack_model::types::{WriteObjectRequest, WriteObjectResponse};

use crate::translate;

/// Consume a WriteObject frame stream and commit exactly one object.
///
/// Returns the single terminal response on success. Backend errors
/// propagate verbatim; no partial commit survives a mid-stream failure.
pub async fn ingest<S>(
    backend: &dyn StorageBackend,
    mut frames: S,
) -> Result<WriteObjectResponse, StorageError>
where
    S: Stream<Item = Result<WriteObjectRequest, StorageError>> + Unpin,
{
    // AwaitingSpec: the first frame carries both the payload head and the spec.
    let Some(first) = frames.next().await else {
        return Err(StorageError::unsupported_write_operation());
    };
    let first = first?;

    let Some(data) = first.checksummed_data else {
        return Err(StorageError::unsupported_write_operation());
    };
    if data.content.is_empty() {
        return Err(StorageError::unsupported_write_operation());
    }
    let Some(spec) = first.write_object_spec else {
        return Err(StorageError::unsupported_write_operation());
    };

    // CRC32C is declared on the first frame only; later values are ignored.
    let declared_crc32c = data.crc32c;

    // Accumulating: concatenate payload chunks in arrival order.
    let mut payload = BytesMut::from(&data.content[..]);
    let mut finished = first.finish_write;
    while !finished {
        let Some(frame) = frames.next().await else {
            break;
        };
        let frame = frame?;
        if let Some(chunk) = frame.checksummed_data {
            payload.extend_from_slice(&chunk.content);
        }
        finished = frame.finish_write;
    }
    let content = payload.freeze();

    // Committing: synthesize hash, tag, and ACL, then one backend write.
    let md5_hash = encoded_md5_hash(&content);
    let etag = etag_for(&md5_hash);
    let resource = spec.resource;
    debug!(
        bucket = %resource.bucket,
        name = %resource.name,
        size = content.len(),
        "committing streamed upload"
    );

    let request = ObjectWriteRequest {
        bucket_name: resource.bucket,
        name: resource.name,
        content_type: resource.content_type,
        content_encoding: resource.content_encoding,
        md5_hash,
        etag,
        crc32c: declared_crc32c.map(encode_crc32c),
        acl: acl_for_preset(&spec.predefined_acl),
        content,
    };

    let committed = backend.create_object(request).await?;
    let resource = translate::object_to_wire(&committed)?;
    Ok(WriteObjectResponse { resource })
}
