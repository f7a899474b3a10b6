//! Decoding of client-streamed upload frames.
//!
//! The transport carries a WriteObject stream as newline-delimited JSON:
//! one [`WriteObjectRequest`] per line. Frames decode lazily so that the
//! ingestion state machine sees a malformed later frame only when it
//! reaches it, matching how a real stream would fail mid-flight.

use bytes::Bytes;
use futures::Stream;
use futures::stream;

use gcstack_model::StorageError;
use gcstack_model::types::WriteObjectRequest;

/// Turn a collected request body into a stream of upload frames.
///
/// Blank lines are skipped; each remaining line must be one JSON-encoded
/// [`WriteObjectRequest`]. Decode errors surface as `INVALID_ARGUMENT`
/// items at the position of the bad frame.
pub fn frame_stream(
    body: &Bytes,
) -> impl Stream<Item = Result<WriteObjectRequest, StorageError>> + Unpin + use<> {
    let lines: Vec<Vec<u8>> = body
        .split(|&b| b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(<[u8]>::to_vec)
        .collect();

    stream::iter(lines.into_iter().map(|line| {
        serde_json::from_slice::<WriteObjectRequest>(&line)
            .map_err(|err| StorageError::invalid_argument(format!("malformed frame: {err}")))
    }))
}
