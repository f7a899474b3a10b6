//! Wire-protocol model for the gcstack storage emulator.
//!
//! This crate defines the record shapes exchanged on the
//! `google.storage.v2`-style RPC surface: object and bucket resources,
//! checksummed upload frames, list request/response envelopes, the fixed
//! enumeration of RPC methods, and the status type carried back to callers
//! on failure.
//!
//! Everything here is plain data. Translation between these shapes and
//! backend-native records lives in `gcstack-rpc`.

pub mod operations;
pub mod status;
pub mod types;

pub use operations::StorageOperation;
pub use status::{RpcCode, StorageError};
