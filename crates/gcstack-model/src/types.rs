//! Wire record shapes for the storage RPC surface.
//!
//! Field names and nesting follow the `google.storage.v2` message layout.
//! JSON encoding uses the protobuf JSON mapping conventions: camelCase
//! fields, absent optionals, base64 text for raw byte payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A protobuf-style timestamp: seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds, in `0..1_000_000_000`.
    pub nanos: i32,
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// The project team a grant belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectTeam {
    /// The project number owning the team.
    pub project_number: String,
    /// The team name (e.g. `owners`, `editors`, `viewers`).
    pub team: String,
}

/// One access-control entry on an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectAccessControl {
    /// The access role granted (e.g. `READER`, `OWNER`).
    pub role: String,
    /// The stable identifier of the grantee entity.
    pub id: String,
    /// The grantee entity reference (e.g. `allUsers`, `user-jane`).
    pub entity: String,
    /// Email address of the grantee, when applicable.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Domain of the grantee, when applicable.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Project team of the grantee, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_team: Option<ProjectTeam>,
}

// ---------------------------------------------------------------------------
// Checksums and upload frames
// ---------------------------------------------------------------------------

/// Server-computed checksums attached to a committed object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectChecksums {
    /// CRC32C of the full content, as an unsigned 32-bit value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32c: Option<u32>,
    /// Base64 text of the raw MD5 digest of the full content.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub md5_hash: String,
}

/// One chunk of an upload: payload bytes plus an optional cumulative CRC32C.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecksummedData {
    /// Raw payload bytes, base64 text on the wire.
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
    /// CRC32C of the cumulative payload up to and including this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32c: Option<u32>,
}

/// The declared intent of an upload, sent once on the first stream frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteObjectSpec {
    /// Destination resource: bucket, name, and content metadata.
    pub resource: Object,
    /// Predefined ACL preset name (e.g. `publicRead`); empty for none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub predefined_acl: String,
}

/// One message on a WriteObject client stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteObjectRequest {
    /// The upload spec; present only on the first frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_object_spec: Option<WriteObjectSpec>,
    /// The payload chunk carried by this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksummed_data: Option<ChecksummedData>,
    /// Marks the final frame of the stream.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub finish_write: bool,
}

/// The single terminal response of a WriteObject stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteObjectResponse {
    /// The committed object resource.
    pub resource: Object,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// An object resource as surfaced on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Object {
    /// Object name within its bucket.
    pub name: String,
    /// Name of the parent bucket.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bucket: String,
    /// Content length in bytes.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub size: i64,
    /// Backend-assigned generation number.
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub generation: i64,
    /// MIME content type.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    /// Content encoding (e.g. `gzip`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_encoding: String,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Timestamp>,
    /// Deletion time; absent for live objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_time: Option<Timestamp>,
    /// Last metadata update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<Timestamp>,
    /// User-provided metadata key/value pairs.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    /// Server-computed content checksums.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksums: Option<ObjectChecksums>,
    /// Access-control entries, order-preserving.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<ObjectAccessControl>,
}

/// A bucket resource as surfaced on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bucket {
    /// Bucket name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// List envelopes
// ---------------------------------------------------------------------------

/// Request for the ListBuckets operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListBucketsRequest {
    /// Parent project reference; accepted but not used for filtering.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent: String,
}

/// Response for the ListBuckets operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListBucketsResponse {
    /// All known buckets. Always present, possibly empty.
    pub buckets: Vec<Bucket>,
}

/// Request for the ListObjects operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListObjectsRequest {
    /// Parent bucket name.
    pub parent: String,
    /// Object name prefix filter.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Whether to include noncurrent versions.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub versions: bool,
}

/// Response for the ListObjects operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListObjectsResponse {
    /// Matching objects in backend order. Always present, possibly empty.
    pub objects: Vec<Object>,
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

/// Serde adapter encoding raw bytes as base64 text, per the protobuf JSON
/// mapping for `bytes` fields.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
