//! The wire-facing layer of the gcstack storage emulator.
//!
//! This crate translates storage RPC requests into calls against a
//! [`gcstack_core::StorageBackend`] and backend records into wire-protocol
//! responses, synthesizing the server-side fields along the way (MD5
//! content hash, quoted ETag, generation number, timestamps, ACL entries).
//!
//! # Request lifecycle
//!
//! ```text
//! hyper Service (service.rs)
//!        |  route /google.storage.v2.Storage/<Method>
//!        v
//! dispatch (dispatch.rs) -- unknown/unsupported -> UNIMPLEMENTED
//!        |
//!        +--> listing.rs  (ListBuckets, ListObjects)
//!        +--> upload.rs   (WriteObject client stream)
//!                |
//!                v
//!        translate.rs  (backend records -> wire records)
//! ```

pub mod dispatch;
pub mod frames;
pub mod listing;
pub mod response;
pub mod server;
pub mod service;
pub mod translate;
pub mod upload;

pub use server::StorageServer;
pub use service::StorageRpcService;
