//! Membership store
//!
//! Owns the ordered roster and keeps it in step with the persisted copy:
//!
//! - [`MembershipStore::load`] reads the persisted roster (absent = empty)
//! - [`MembershipStore::save`] writes the full roster, all-or-nothing
//! - [`MembershipStore::append`] adds one record and saves, rolling the
//!   in-memory addition back if the save fails
//!
//! The distinct-state facet is cached here and recomputed on every mutation.
//!
//! Writes are refused until a read has succeeded (or found the roster
//! unreadable), so a transient read failure can never lead to the persisted
//! roster being replaced by a partial one.

pub mod backend;
pub mod error;
pub mod roster;
pub mod theme;

pub use backend::{KeyValueBackend, RedbBackend};
pub use error::{StorageError, StorageResult};
pub use theme::ThemeStore;

use shared::Member;
use std::sync::Arc;

use crate::query;

/// Storage key for the roster
pub const MEMBERS_KEY: &str = "pstcsl_members";

/// Where an unreadable roster is copied before it can be overwritten
pub const UNREADABLE_MEMBERS_KEY: &str = "pstcsl_members_unreadable";

pub struct MembershipStore {
    backend: Arc<dyn KeyValueBackend>,
    members: Vec<Member>,
    states: Vec<String>,
    /// Set once memory reflects the persisted roster
    loaded: bool,
}

impl std::fmt::Debug for MembershipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipStore")
            .field("backend", &"<dyn KeyValueBackend>")
            .field("members", &self.members.len())
            .field("states", &self.states)
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl MembershipStore {
    /// Empty store over `backend`. Nothing is read, and appends are refused,
    /// until [`Self::reload`] runs.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            members: Vec::new(),
            states: Vec::new(),
            loaded: false,
        }
    }

    /// Create the store and load the persisted roster.
    ///
    /// A read failure never fails the open: the store starts empty and the
    /// error is handed back so the caller can tell the user. Unless the
    /// roster was malformed, appends stay refused until a read succeeds.
    pub fn open(backend: Arc<dyn KeyValueBackend>) -> (Self, Option<StorageError>) {
        let mut store = Self::new(backend);
        let load_error = store.reload().err();
        (store, load_error)
    }

    /// Read the persisted roster without touching in-memory state
    pub fn load(&self) -> StorageResult<Vec<Member>> {
        match self.backend.get(MEMBERS_KEY)? {
            None => Ok(Vec::new()),
            Some(bytes) => {
                let decoded = roster::decode(&bytes)?;
                if decoded.version < roster::ROSTER_VERSION {
                    tracing::info!(
                        from_version = decoded.version,
                        to_version = roster::ROSTER_VERSION,
                        count = decoded.members.len(),
                        "Roster will be migrated on next save"
                    );
                }
                Ok(decoded.members)
            }
        }
    }

    /// Replace in-memory state with the persisted roster.
    ///
    /// On a malformed roster the store is left empty, the raw bytes are copied
    /// to [`UNREADABLE_MEMBERS_KEY`], and the error is returned. Any other read
    /// failure leaves memory untouched.
    pub fn reload(&mut self) -> StorageResult<usize> {
        match self.load() {
            Ok(members) => {
                self.members = members;
                self.loaded = true;
                self.refresh_facets();
                tracing::debug!(count = self.members.len(), "Roster loaded");
                Ok(self.members.len())
            }
            Err(e) if e.is_deserialization() => {
                self.members.clear();
                self.loaded = true;
                self.refresh_facets();
                tracing::warn!(error = %e, "Roster unreadable, starting with an empty roster");
                self.preserve_unreadable();
                Err(e)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    loaded = self.loaded,
                    count = self.members.len(),
                    "Roster read failed, keeping current roster"
                );
                Err(e)
            }
        }
    }

    /// Whether memory reflects the persisted roster
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Retry the initial read if it never succeeded
    pub fn ensure_loaded(&mut self) -> StorageResult<()> {
        if !self.loaded {
            self.reload()?;
        }
        Ok(())
    }

    fn preserve_unreadable(&self) {
        let raw = match self.backend.get(MEMBERS_KEY) {
            Ok(Some(raw)) => raw,
            _ => return,
        };
        if let Err(e) = self.backend.put(UNREADABLE_MEMBERS_KEY, &raw) {
            tracing::warn!(error = %e, "Failed to preserve unreadable roster");
        }
    }

    /// Serialize and persist the full collection
    pub fn save(&self, members: &[Member]) -> StorageResult<()> {
        let bytes = roster::encode(members)?;
        self.backend.put(MEMBERS_KEY, &bytes)
    }

    /// Append one record and persist. On failure the store is unchanged.
    ///
    /// Fails with [`StorageError::NotLoaded`] while the persisted roster has
    /// not been read.
    pub fn append(&mut self, member: Member) -> StorageResult<&Member> {
        if !self.loaded {
            tracing::warn!(member_id = member.id, "Roster not loaded, append refused");
            return Err(StorageError::NotLoaded);
        }
        debug_assert!(
            self.members.last().is_none_or(|last| last.id < member.id),
            "member ids must increase with insertion order"
        );

        self.members.push(member);
        if let Err(e) = self.save(&self.members) {
            self.members.pop();
            tracing::error!(error = %e, "Failed to persist roster, append rolled back");
            return Err(e);
        }
        self.refresh_facets();

        let appended = self.members.len() - 1;
        Ok(&self.members[appended])
    }

    /// Next id: one past the largest id in the roster
    pub fn next_id(&self) -> u64 {
        self.members.iter().map(|m| m.id).max().map_or(1, |max| max + 1)
    }

    /// Remove the persisted roster and clear memory. Administrative only.
    pub fn reset(&mut self) -> StorageResult<()> {
        self.backend.remove(MEMBERS_KEY)?;
        self.members.clear();
        self.loaded = true;
        self.refresh_facets();
        tracing::info!("Roster reset");
        Ok(())
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Distinct states for the filter control, always current
    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    fn refresh_facets(&mut self) {
        self.states = query::distinct_states(&self.members);
    }
}
