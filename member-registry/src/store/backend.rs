//! Key-value persistence backends
//!
//! The registry only needs a tiny string-keyed substrate (two entries: the
//! roster and the theme preference). [`KeyValueBackend`] is the seam the store
//! is constructed with; [`RedbBackend`] is the production implementation.
//!
//! # Durability
//!
//! Each `put` runs in its own redb write transaction. A commit is atomic, so
//! a failed or rejected write leaves the previous value intact.
//!
//! # Quota
//!
//! Browsers cap local storage per origin. The backend mirrors that with an
//! optional byte quota over all keys and values; a write that would exceed it
//! is aborted with [`StorageError::QuotaExceeded`].

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

use super::error::{StorageError, StorageResult};

/// Single table: key = entry name, value = raw bytes
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// String-keyed byte storage the registry persists into
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the value under `key`. All-or-nothing.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Key-value backend backed by redb
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
    quota_bytes: Option<usize>,
}

impl RedbBackend {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>, quota_bytes: Option<usize>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db, quota_bytes)
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory(quota_bytes: Option<usize>) -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, quota_bytes)
    }

    fn init(db: Database, quota_bytes: Option<usize>) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            quota_bytes,
        })
    }

    pub fn quota_bytes(&self) -> Option<usize> {
        self.quota_bytes
    }

    /// Bytes used by every entry except `skip_key`
    fn used_bytes<T>(table: &T, skip_key: &str) -> StorageResult<usize>
    where
        T: ReadableTable<&'static str, &'static [u8]>,
    {
        let mut used = 0usize;
        for entry in table.iter()? {
            let (key, value) = entry?;
            if key.value() != skip_key {
                used += key.value().len() + value.value().len();
            }
        }
        Ok(used)
    }
}

impl KeyValueBackend for RedbBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        let rejected = {
            let mut table = write_txn.open_table(KV_TABLE)?;
            let over_quota = match self.quota_bytes {
                Some(quota) => {
                    let required = Self::used_bytes(&table, key)? + key.len() + value.len();
                    (required > quota).then_some(StorageError::QuotaExceeded { required, quota })
                }
                None => None,
            };
            if over_quota.is_none() {
                table.insert(key, value)?;
            }
            over_quota
        };

        if let Some(err) = rejected {
            write_txn.abort()?;
            tracing::warn!(key = %key, error = %err, "Write rejected by storage quota");
            return Err(err);
        }

        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory backend whose next `get` can be made to fail with an I/O error
    pub(crate) struct FlakyRead {
        inner: RedbBackend,
        fail_next_get: AtomicBool,
    }

    impl FlakyRead {
        pub(crate) fn new() -> Self {
            Self {
                inner: RedbBackend::open_in_memory(None).unwrap(),
                fail_next_get: AtomicBool::new(false),
            }
        }

        pub(crate) fn fail_next_get(&self) {
            self.fail_next_get.store(true, Ordering::SeqCst);
        }
    }

    impl KeyValueBackend for FlakyRead {
        fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
            if self.fail_next_get.swap(false, Ordering::SeqCst) {
                let io = std::io::Error::other("transient read failure");
                return Err(StorageError::Storage(redb::StorageError::Io(io)));
            }
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
            self.inner.put(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_get_missing_key() {
        let backend = RedbBackend::open_in_memory(None).unwrap();
        assert!(backend.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_put_get_remove() {
        let backend = RedbBackend::open_in_memory(None).unwrap();
        backend.put("k", b"v1").unwrap();
        backend.put("k", b"v2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some(&b"v2"[..]));

        backend.remove("k").unwrap();
        assert!(backend.get("k").unwrap().is_none());
    }

    #[test]
    fn test_quota_rejects_without_touching_previous_value() {
        let backend = RedbBackend::open_in_memory(Some(16)).unwrap();
        backend.put("k", b"small").unwrap();

        let err = backend.put("k", &[0u8; 64]).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some(&b"small"[..]));
    }

    #[test]
    fn test_quota_counts_other_keys() {
        let backend = RedbBackend::open_in_memory(Some(20)).unwrap();
        backend.put("a", &[1u8; 10]).unwrap();
        // "b" + 10 bytes + existing 11 bytes = 22 > 20
        assert!(backend.put("b", &[2u8; 10]).is_err());
        // Replacing "a" only counts the new value
        backend.put("a", &[3u8; 15]).unwrap();
    }

    #[test]
    fn test_file_backed_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.redb");
        {
            let backend = RedbBackend::open(&path, None).unwrap();
            backend.put("k", b"persisted").unwrap();
        }
        let backend = RedbBackend::open(&path, None).unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some(&b"persisted"[..]));
    }
}
