//! Translation between backend-native records and wire-protocol shapes.
//!
//! [`object_to_wire`] is the full projection used for committed objects:
//! every attribute maps onto its wire counterpart, size is recomputed from
//! the actual content bytes, and the stored decimal CRC32C is re-parsed to
//! its 32-bit form. A CRC32C that no longer parses is an error — it must
//! never degrade to a silent zero.
//!
//! The summary projections used by enumeration responses intentionally
//! surface only the resource name; callers expecting more fields must fetch
//! the full resource.

use gcstack_core::checksum::parse_crc32c;
use gcstack_core::types::{AclEntry, BucketRecord, ObjectRecord};
use gcstack_model::StorageError;
use gcstack_model::types::{
    Bucket, Object, ObjectAccessControl, ObjectChecksums, ProjectTeam, Timestamp,
};

/// Project a committed object onto the full wire layout.
pub fn object_to_wire(record: &ObjectRecord) -> Result<Object, StorageError> {
    let attrs = &record.attrs;
    let crc32c =
        parse_crc32c(&attrs.crc32c).map_err(|err| StorageError::internal(err.to_string()))?;

    Ok(Object {
        name: attrs.name.clone(),
        bucket: attrs.bucket_name.clone(),
        // Byte length of the committed content; the stored size field is
        // ignored so the two can never drift apart.
        size: i64::try_from(record.content.len()).unwrap_or(i64::MAX),
        generation: attrs.generation,
        content_type: attrs.content_type.clone(),
        content_encoding: attrs.content_encoding.clone(),
        create_time: Some(Timestamp::from(attrs.created)),
        delete_time: attrs.deleted.map(Timestamp::from),
        update_time: Some(Timestamp::from(attrs.updated)),
        metadata: attrs.metadata.clone(),
        checksums: Some(ObjectChecksums {
            crc32c: Some(crc32c),
            md5_hash: attrs.md5_hash.clone(),
        }),
        acl: attrs.acl.iter().map(acl_entry_to_wire).collect(),
    })
}

/// Project one backend ACL entry onto the wire layout.
fn acl_entry_to_wire(entry: &AclEntry) -> ObjectAccessControl {
    ObjectAccessControl {
        role: entry.role.clone(),
        id: entry.entity_id.clone(),
        entity: entry.entity.clone(),
        email: entry.email.clone(),
        domain: entry.domain.clone(),
        project_team: entry.project_team.as_ref().map(|team| ProjectTeam {
            project_number: team.project_number.clone(),
            team: team.team.clone(),
        }),
    }
}

/// Name-only bucket projection for enumeration responses.
#[must_use]
pub fn bucket_to_wire(record: &BucketRecord) -> Bucket {
    Bucket {
        name: record.name.clone(),
    }
}

/// Name-only object projection for enumeration responses.
#[must_use]
pub fn object_summary_to_wire(record: &ObjectRecord) -> Object {
    Object {
        name: record.attrs.name.clone(),
        ..Object::default()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use gcstack_core::checksum::{encoded_md5_hash, etag_for};
    use gcstack_core::types::{ObjectAttrs, TeamGrant};
    use gcstack_model::RpcCode;

    use super::*;

    fn committed(content: &[u8], crc32c: &str) -> ObjectRecord {
        let md5_hash = encoded_md5_hash(content);
        ObjectRecord {
            attrs: ObjectAttrs {
                bucket_name: "b".to_owned(),
                name: "o".to_owned(),
                content_type: "text/plain".to_owned(),
                content_encoding: "identity".to_owned(),
                etag: etag_for(&md5_hash),
                md5_hash,
                crc32c: crc32c.to_owned(),
                size: 999, // deliberately wrong; translation must ignore it
                generation: 3,
                created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap(),
                deleted: None,
                metadata: std::collections::HashMap::new(),
                acl: vec![AclEntry {
                    role: "OWNER".to_owned(),
                    entity_id: "project-owners-1".to_owned(),
                    entity: "project-owners-1".to_owned(),
                    project_team: Some(TeamGrant {
                        project_number: "1".to_owned(),
                        team: "owners".to_owned(),
                    }),
                    ..AclEntry::default()
                }],
            },
            content: Bytes::copy_from_slice(content),
        }
    }

    #[test]
    fn test_should_recompute_size_from_content() {
        let record = committed(b"hello", "907060870");
        let wire = object_to_wire(&record).expect("translation");
        assert_eq!(wire.size, 5);
    }

    #[test]
    fn test_should_derive_etag_from_md5_hash() {
        let record = committed(b"hello", "907060870");
        let wire = object_to_wire(&record).expect("translation");
        let checksums = wire.checksums.expect("checksums present");
        assert_eq!(checksums.md5_hash, "XUFAKrxLKna5cZ2REBfFkg==");
        assert_eq!(record.attrs.etag, format!("\"{}\"", checksums.md5_hash));
    }

    #[test]
    fn test_should_parse_crc32c_back_to_binary_form() {
        let record = committed(b"hello", "4294967295");
        let wire = object_to_wire(&record).expect("translation");
        assert_eq!(wire.checksums.expect("checksums").crc32c, Some(u32::MAX));
    }

    #[test]
    fn test_should_fail_loudly_on_corrupted_crc32c() {
        let record = committed(b"hello", "not-a-number");
        let err = object_to_wire(&record).unwrap_err();
        assert_eq!(err.code, RpcCode::Internal);
        assert!(err.message.contains("not-a-number"));
    }

    #[test]
    fn test_should_fail_loudly_on_stripped_crc32c() {
        let record = committed(b"hello", "");
        assert!(object_to_wire(&record).is_err());
    }

    #[test]
    fn test_should_project_acl_with_project_team() {
        let record = committed(b"x", "0");
        let wire = object_to_wire(&record).expect("translation");
        assert_eq!(wire.acl.len(), 1);
        let team = wire.acl[0].project_team.as_ref().expect("team present");
        assert_eq!(team.project_number, "1");
        assert_eq!(team.team, "owners");
    }

    #[test]
    fn test_should_omit_project_team_when_entry_has_none() {
        let mut record = committed(b"x", "0");
        record.attrs.acl = vec![AclEntry {
            role: "READER".to_owned(),
            entity: "allUsers".to_owned(),
            ..AclEntry::default()
        }];
        let wire = object_to_wire(&record).expect("translation");
        assert!(wire.acl[0].project_team.is_none());
    }

    #[test]
    fn test_should_leave_delete_time_absent_for_live_objects() {
        let record = committed(b"x", "0");
        let wire = object_to_wire(&record).expect("translation");
        assert!(wire.delete_time.is_none());
        assert!(wire.create_time.is_some());
        assert!(wire.update_time.is_some());
    }

    #[test]
    fn test_should_project_bucket_to_name_only() {
        let record = BucketRecord {
            name: "my-bucket".to_owned(),
            versioning_enabled: true,
            created: Utc::now(),
        };
        let wire = bucket_to_wire(&record);
        assert_eq!(wire, Bucket { name: "my-bucket".to_owned() });
    }

    #[test]
    fn test_should_project_object_summary_to_name_only() {
        let record = committed(b"hello", "907060870");
        let wire = object_summary_to_wire(&record);
        assert_eq!(wire.name, "o");
        // The reduced field set is deliberate; nothing else is populated.
        assert!(wire.bucket.is_empty());
        assert_eq!(wire.size, 0);
        assert!(wire.checksums.is_none());
        assert!(wire.acl.is_empty());
    }
}
