use std::path::PathBuf;
use std::time::Duration;

/// Registry configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | data and log root |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON log format |
/// | MAX_ATTACHMENT_BYTES | 5242880 | attachment size limit |
/// | STORAGE_QUOTA_BYTES | 5242880 | key-value storage quota (0 = unlimited) |
/// | REGISTRATION_NOTICE_MS | 5000 | registration notification lifetime |
/// | CONTACT_NOTICE_MS | 3000 | contact notification lifetime |
/// | PREVIEW_MAX_DIMENSION | 256 | image preview bound in pixels |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/pstcsl LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Working directory: roster database and logs
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    /// Attachments larger than this are rejected
    pub max_attachment_bytes: u64,
    /// Quota across all stored entries; `None` disables the check
    pub storage_quota_bytes: Option<usize>,
    pub registration_notice_ms: u64,
    pub contact_notice_ms: u64,
    /// Longest edge of decoded image previews
    pub preview_max_dimension: u32,
}

/// 5 MiB
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl RegistryConfig {
    /// Load from environment variables, using defaults for anything unset
    pub fn from_env() -> Self {
        let quota: usize = env_or("STORAGE_QUOTA_BYTES", DEFAULT_STORAGE_QUOTA_BYTES);
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            max_attachment_bytes: env_or("MAX_ATTACHMENT_BYTES", DEFAULT_MAX_ATTACHMENT_BYTES),
            storage_quota_bytes: (quota > 0).then_some(quota),
            registration_notice_ms: env_or("REGISTRATION_NOTICE_MS", 5000),
            contact_notice_ms: env_or("CONTACT_NOTICE_MS", 3000),
            preview_max_dimension: env_or("PREVIEW_MAX_DIMENSION", 256),
        }
    }

    /// Defaults with a custom working directory; used by tests
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            log_level: "info".into(),
            log_json: false,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            registration_notice_ms: 5000,
            contact_notice_ms: 3000,
            preview_max_dimension: 256,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("registry.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn registration_notice(&self) -> Duration {
        Duration::from_millis(self.registration_notice_ms)
    }

    pub fn contact_notice(&self) -> Duration {
        Duration::from_millis(self.contact_notice_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
