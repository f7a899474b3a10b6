//! In-memory storage backend.
//!
//! [`MemoryBackend`] keeps buckets and objects in [`DashMap`]s, assigns
//! generation numbers from a process-wide counter, and stamps commit
//! timestamps. It holds only the current version of each object; the
//! `versions` listing flag is accepted but has no additional effect here.
//!
//! Enumeration results are returned in lexicographic name order, which is
//! this backend's defined ordering; callers above must not re-sort.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::backend::{BackendError, BackendResult, StorageBackend};
use crate::checksum::encode_crc32c;
use crate::types::{BucketRecord, ObjectAttrs, ObjectRecord, ObjectWriteRequest};

/// A bucket and the objects it holds.
#[derive(Debug)]
struct BucketState {
    record: BucketRecord,
    objects: DashMap<String, ObjectRecord>,
}

/// Thread-safe in-memory implementation of [`StorageBackend`].
///
/// # Examples
///
/// ```
/// use gcstack_core::{MemoryBackend, StorageBackend};
///
/// # tokio_test::block_on(async {
/// let backend = MemoryBackend::new();
/// backend.create_bucket("b", false).await.unwrap();
/// assert_eq!(backend.list_buckets().await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    buckets: DashMap<String, BucketState>,
    next_generation: AtomicI64,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn create_bucket(&self, name: &str, versioning_enabled: bool) -> BackendResult<()> {
        // Existence check and insert must be one atomic step; a racing
        // create must never replace an existing bucket state.
        match self.buckets.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(BackendError::BucketAlreadyExists {
                bucket: name.to_owned(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(BucketState {
                    record: BucketRecord {
                        name: name.to_owned(),
                        versioning_enabled,
                        created: Utc::now(),
                    },
                    objects: DashMap::new(),
                });
                debug!(bucket = name, versioning_enabled, "created bucket");
                Ok(())
            }
        }
    }

    async fn list_buckets(&self) -> BackendResult<Vec<BucketRecord>> {
        let mut buckets: Vec<BucketRecord> = self
            .buckets
            .iter()
            .map(|entry| entry.record.clone())
            .collect();
        buckets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(buckets)
    }

    async fn list_objects(
        &self,
        parent: &str,
        prefix: &str,
        _versions: bool,
    ) -> BackendResult<Vec<ObjectRecord>> {
        let bucket = self
            .buckets
            .get(parent)
            .ok_or_else(|| BackendError::BucketNotFound {
                bucket: parent.to_owned(),
            })?;

        let mut objects: Vec<ObjectRecord> = bucket
            .objects
            .iter()
            .filter(|entry| entry.attrs.name.starts_with(prefix))
            .map(|entry| entry.clone())
            .collect();
        objects.sort_by(|a, b| a.attrs.name.cmp(&b.attrs.name));
        Ok(objects)
    }

    async fn create_object(&self, request: ObjectWriteRequest) -> BackendResult<ObjectRecord> {
        let bucket =
            self.buckets
                .get(&request.bucket_name)
                .ok_or_else(|| BackendError::BucketNotFound {
                    bucket: request.bucket_name.clone(),
                })?;

        let now = Utc::now();
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let crc32c = request
            .crc32c
            .unwrap_or_else(|| encode_crc32c(crc32c::crc32c(&request.content)));

        let record = ObjectRecord {
            attrs: ObjectAttrs {
                bucket_name: request.bucket_name,
                name: request.name,
                content_type: request.content_type,
                content_encoding: request.content_encoding,
                md5_hash: request.md5_hash,
                etag: request.etag,
                crc32c,
                size: i64::try_from(request.content.len()).unwrap_or(i64::MAX),
                generation,
                created: now,
                updated: now,
                deleted: None,
                metadata: std::collections::HashMap::new(),
                acl: request.acl,
            },
            content: request.content,
        };

        debug!(
            bucket = %record.attrs.bucket_name,
            name = %record.attrs.name,
            generation,
            size = record.attrs.size,
            "committed object"
        );
        bucket
            .objects
            .insert(record.attrs.name.clone(), record.clone());
        Ok(record)
    }
}
