//! Backend-native record types.
//!
//! These are the shapes the storage backend owns: committed objects with
//! their attributes, bucket records, and the write request assembled by the
//! upload ingestion path. The wire layer reads these records but never
//! mutates them after commit.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The project team a backend ACL grant belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGrant {
    /// The project number owning the team.
    pub project_number: String,
    /// The team name.
    pub team: String,
}

/// One access-control entry held by a backend record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    /// The granted role (e.g. `READER`, `OWNER`).
    pub role: String,
    /// Stable identifier of the grantee entity.
    pub entity_id: String,
    /// The grantee entity reference (e.g. `allUsers`).
    pub entity: String,
    /// Email address of the grantee, if any.
    pub email: String,
    /// Domain of the grantee, if any.
    pub domain: String,
    /// Project team of the grantee, if any.
    pub project_team: Option<TeamGrant>,
}

/// Metadata attributes of a committed object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttrs {
    /// Name of the bucket holding the object.
    pub bucket_name: String,
    /// Object name within the bucket.
    pub name: String,
    /// MIME content type.
    pub content_type: String,
    /// Content encoding.
    pub content_encoding: String,
    /// Base64 text of the raw MD5 digest of the content.
    pub md5_hash: String,
    /// The entity tag: the MD5 hash in double quotes.
    pub etag: String,
    /// Decimal text form of the content CRC32C.
    pub crc32c: String,
    /// Stored content length. The wire layer recomputes size from the
    /// actual content and ignores this field.
    pub size: i64,
    /// Backend-assigned monotonically increasing generation number.
    pub generation: i64,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
    /// Deletion time; `None` for live objects.
    pub deleted: Option<DateTime<Utc>>,
    /// User-provided metadata.
    pub metadata: HashMap<String, String>,
    /// Access-control entries, order-preserving.
    pub acl: Vec<AclEntry>,
}

/// A committed object: attributes plus the full content bytes.
///
/// Owned exclusively by the backend after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRecord {
    /// Object metadata.
    pub attrs: ObjectAttrs,
    /// The full content bytes.
    pub content: Bytes,
}

/// The request handed to the backend's object-creation operation.
///
/// Assembled by the upload ingestion path; the backend fills in generation
/// and timestamps at commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectWriteRequest {
    /// Destination bucket name.
    pub bucket_name: String,
    /// Object name.
    pub name: String,
    /// MIME content type.
    pub content_type: String,
    /// Content encoding.
    pub content_encoding: String,
    /// Base64 text of the raw MD5 digest of `content`.
    pub md5_hash: String,
    /// The entity tag derived from `md5_hash`.
    pub etag: String,
    /// Decimal text form of the client-declared CRC32C, if any. When absent
    /// the backend computes one over `content`.
    pub crc32c: Option<String>,
    /// Access-control entries to attach.
    pub acl: Vec<AclEntry>,
    /// The full payload bytes.
    pub content: Bytes,
}

/// A bucket record held by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Bucket name.
    pub name: String,
    /// Whether object versioning is enabled.
    pub versioning_enabled: bool,
    /// Creation time.
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_object_record_to_empty_content() {
        let record = ObjectRecord::default();
        assert!(record.content.is_empty());
        assert!(record.attrs.acl.is_empty());
        assert!(record.attrs.deleted.is_none());
    }

    #[test]
    fn test_should_serialize_attrs_round_trip() {
        let attrs = ObjectAttrs {
            bucket_name: "b".to_owned(),
            name: "o".to_owned(),
            md5_hash: "XUFAKrxLKna5cZ2REBfFkg==".to_owned(),
            etag: "\"XUFAKrxLKna5cZ2REBfFkg==\"".to_owned(),
            crc32c: "907060870".to_owned(),
            generation: 7,
            ..ObjectAttrs::default()
        };
        let json = serde_json::to_string(&attrs).expect("test serialization");
        let back: ObjectAttrs = serde_json::from_str(&json).expect("test deserialization");
        assert_eq!(back, attrs);
    }
}
