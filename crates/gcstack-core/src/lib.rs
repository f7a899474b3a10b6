//! Core services for the gcstack storage emulator.
//!
//! This crate hosts everything beneath the wire layer:
//!
//! - the [`backend::StorageBackend`] contract the RPC surface consumes,
//! - the [`checksum`] codec used to synthesize content hashes and entity
//!   tags,
//! - the [`acl`] predefined-preset expansion rule,
//! - an in-memory [`memory::MemoryBackend`] used by the server binary and
//!   by tests,
//! - service [`config`].
//!
//! # Architecture
//!
//! ```text
//! gcstack-rpc (dispatch, translation, upload ingestion)
//!        |
//!        v
//! StorageBackend trait  <-- this crate
//!        |
//!        v
//! MemoryBackend (buckets, objects, generation counter)
//! ```

pub mod acl;
pub mod backend;
pub mod checksum;
pub mod config;
pub mod memory;
pub mod types;

pub use backend::{BackendError, BackendResult, StorageBackend};
pub use config::ServerConfig;
pub use memory::MemoryBackend;
