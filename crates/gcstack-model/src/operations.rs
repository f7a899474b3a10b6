//! The fixed enumeration of storage RPC methods.
//!
//! The dispatcher routes every inbound call through [`StorageOperation`].
//! Methods outside the supported subset still have enum members so they can
//! be recognized and answered with a standard `Unimplemented` status instead
//! of a routing failure.

/// All RPC methods on the storage surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// The ListBuckets operation.
    ListBuckets,
    /// The ListObjects operation.
    ListObjects,
    /// The WriteObject (client-streamed upload) operation.
    WriteObject,
    /// The GetBucket operation.
    GetBucket,
    /// The CreateBucket operation.
    CreateBucket,
    /// The DeleteBucket operation.
    DeleteBucket,
    /// The UpdateBucket operation.
    UpdateBucket,
    /// The GetObject operation.
    GetObject,
    /// The ReadObject (server-streamed download) operation.
    ReadObject,
    /// The UpdateObject operation.
    UpdateObject,
    /// The DeleteObject operation.
    DeleteObject,
    /// The ComposeObject operation.
    ComposeObject,
    /// The RewriteObject operation.
    RewriteObject,
    /// The StartResumableWrite operation.
    StartResumableWrite,
    /// The QueryWriteStatus operation.
    QueryWriteStatus,
}

impl StorageOperation {
    /// Returns the protocol method name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::ListObjects => "ListObjects",
            Self::WriteObject => "WriteObject",
            Self::GetBucket => "GetBucket",
            Self::CreateBucket => "CreateBucket",
            Self::DeleteBucket => "DeleteBucket",
            Self::UpdateBucket => "UpdateBucket",
            Self::GetObject => "GetObject",
            Self::ReadObject => "ReadObject",
            Self::UpdateObject => "UpdateObject",
            Self::DeleteObject => "DeleteObject",
            Self::ComposeObject => "ComposeObject",
            Self::RewriteObject => "RewriteObject",
            Self::StartResumableWrite => "StartResumableWrite",
            Self::QueryWriteStatus => "QueryWriteStatus",
        }
    }

    /// Parse a protocol method name into a [`StorageOperation`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ListBuckets" => Some(Self::ListBuckets),
            "ListObjects" => Some(Self::ListObjects),
            "WriteObject" => Some(Self::WriteObject),
            "GetBucket" => Some(Self::GetBucket),
            "CreateBucket" => Some(Self::CreateBucket),
            "DeleteBucket" => Some(Self::DeleteBucket),
            "UpdateBucket" => Some(Self::UpdateBucket),
            "GetObject" => Some(Self::GetObject),
            "ReadObject" => Some(Self::ReadObject),
            "UpdateObject" => Some(Self::UpdateObject),
            "DeleteObject" => Some(Self::DeleteObject),
            "ComposeObject" => Some(Self::ComposeObject),
            "RewriteObject" => Some(Self::RewriteObject),
            "StartResumableWrite" => Some(Self::StartResumableWrite),
            "QueryWriteStatus" => Some(Self::QueryWriteStatus),
            _ => None,
        }
    }

    /// Whether the emulator actually serves this method.
    ///
    /// Unsupported members are answered with an `Unimplemented` status by
    /// the dispatcher.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::ListBuckets | Self::ListObjects | Self::WriteObject)
    }
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_round_trip_operation_names() {
        let ops = [
            StorageOperation::ListBuckets,
            StorageOperation::ListObjects,
            StorageOperation::WriteObject,
            StorageOperation::GetBucket,
            StorageOperation::CreateBucket,
            StorageOperation::DeleteBucket,
            StorageOperation::UpdateBucket,
            StorageOperation::GetObject,
            StorageOperation::ReadObject,
            StorageOperation::UpdateObject,
            StorageOperation::DeleteObject,
            StorageOperation::ComposeObject,
            StorageOperation::RewriteObject,
            StorageOperation::StartResumableWrite,
            StorageOperation::QueryWriteStatus,
        ];
        for op in ops {
            assert_eq!(StorageOperation::from_name(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_should_reject_unknown_operation_name() {
        assert_eq!(StorageOperation::from_name("FrobnicateObject"), None);
        assert_eq!(StorageOperation::from_name(""), None);
    }

    #[test]
    fn test_should_mark_supported_subset() {
        assert!(StorageOperation::ListBuckets.is_supported());
        assert!(StorageOperation::ListObjects.is_supported());
        assert!(StorageOperation::WriteObject.is_supported());
        assert!(!StorageOperation::ReadObject.is_supported());
        assert!(!StorageOperation::StartResumableWrite.is_supported());
    }

    #[test]
    fn test_should_display_operation_name() {
        assert_eq!(StorageOperation::WriteObject.to_string(), "WriteObject");
    }
}
