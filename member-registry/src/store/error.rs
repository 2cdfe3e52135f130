use shared::ErrorCode;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("Persisted roster is malformed: {0}")]
    Deserialization(String),

    #[error("Persisted roster version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("Storage quota exceeded: {required} bytes required, quota is {quota} bytes")]
    QuotaExceeded { required: usize, quota: usize },

    #[error("Roster has not been read yet, refusing to overwrite it")]
    NotLoaded,
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Read failures the registry recovers from by starting with an empty roster
    pub fn is_deserialization(&self) -> bool {
        matches!(
            self,
            StorageError::Deserialization(_) | StorageError::UnsupportedVersion { .. }
        )
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.code() == ErrorCode::StorageFull
    }

    /// Map to a user-facing error code (front end localizes)
    pub fn code(&self) -> ErrorCode {
        match self {
            StorageError::Deserialization(_) => return ErrorCode::StorageUnreadable,
            StorageError::UnsupportedVersion { .. } => {
                return ErrorCode::StorageVersionUnsupported;
            }
            StorageError::QuotaExceeded { .. } => return ErrorCode::StorageFull,
            StorageError::NotLoaded => return ErrorCode::SystemBusy,
            StorageError::Serialization(_) => return ErrorCode::Unknown,
            _ => {}
        }

        // redb errors are classified by message
        let err_str = self.to_string().to_lowercase();

        if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
        {
            return ErrorCode::StorageFull;
        }

        if err_str.contains("corrupt") || err_str.contains("invalid database") {
            return ErrorCode::StorageCorrupted;
        }

        ErrorCode::SystemBusy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let quota = StorageError::QuotaExceeded {
            required: 10,
            quota: 5,
        };
        assert!(quota.is_quota_exceeded());
        assert_eq!(quota.code(), ErrorCode::StorageFull);

        let malformed = StorageError::Deserialization("expected value".into());
        assert!(malformed.is_deserialization());
        assert_eq!(malformed.code(), ErrorCode::StorageUnreadable);

        let newer = StorageError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert!(newer.is_deserialization());
        assert!(!newer.is_quota_exceeded());
    }

    #[test]
    fn test_io_no_space_is_quota() {
        let io = std::io::Error::other("No space left on device");
        let err = StorageError::Storage(redb::StorageError::Io(io));
        assert!(err.is_quota_exceeded());
    }
}
