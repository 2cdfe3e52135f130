//! PSTCSL membership registry
//!
//! # Overview
//!
//! The core behind the cooperative's registration page:
//!
//! - **Attachments** (`attachment`): size check, MIME resolution, async previews
//! - **Notifications** (`notification`): transient, self-dismissing feedback
//! - **Store** (`store`): persisted roster over a pluggable key-value backend (redb)
//! - **Query** (`query`): search/state filtering and the state facet
//! - **Registration** (`registration`): form parsing and the session controller
//! - **Directory** (`directory`): render boundary implemented by the host
//!
//! # Layout
//!
//! ```text
//! member-registry/src/
//! ├── core/          # configuration
//! ├── attachment/    # validator, previews, slots
//! ├── notification/  # notification service
//! ├── store/         # roster, theme, backends
//! ├── query/         # filter + facets
//! ├── registration/  # form + controller
//! ├── directory/     # renderer trait
//! └── utils/         # logger, validation helpers
//! ```

pub mod attachment;
pub mod core;
pub mod directory;
pub mod error;
pub mod notification;
pub mod query;
pub mod registration;
pub mod store;
pub mod utils;

pub use attachment::{AttachmentKind, AttachmentValidator, FileDescriptor, Preview};
pub use crate::core::RegistryConfig;
pub use directory::{DirectoryRenderer, DirectoryView};
pub use error::{RegistryError, RegistryResult, ValidationError};
pub use notification::{NotificationChannel, NotificationKind, NotificationService};
pub use query::MemberQuery;
pub use registration::{FormFields, RegistrationController};
pub use store::{KeyValueBackend, MembershipStore, RedbBackend, StorageError, ThemeStore};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Create the working directory and start logging
pub fn setup_environment(config: &RegistryConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, log_dir.to_str())?;
    Ok(())
}
