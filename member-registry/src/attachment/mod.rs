//! Attachment validation
//!
//! The form accepts three optional files. Only their presence reaches the
//! roster; bytes are held just long enough to render a preview.
//!
//! - [`AttachmentValidator::validate`] - size check and MIME resolution
//! - [`preview::render_preview`] - async thumbnail decode for images
//! - [`slots::AttachmentSlots`] - per-input selection with generation tags

pub mod preview;
pub mod slots;

pub use preview::Preview;
pub use slots::{AttachmentSlots, PreviewTicket};

use std::sync::Arc;

use crate::core::RegistryConfig;
use crate::error::ValidationError;

/// The three file inputs on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    PassportPhoto,
    StaffId,
    IdCard,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] = [
        AttachmentKind::PassportPhoto,
        AttachmentKind::StaffId,
        AttachmentKind::IdCard,
    ];

    /// Form input id
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::PassportPhoto => "passportPhoto",
            AttachmentKind::StaffId => "staffId",
            AttachmentKind::IdCard => "idCard",
        }
    }

    /// Prompt shown while nothing is selected
    pub fn placeholder(&self) -> &'static str {
        match self {
            AttachmentKind::PassportPhoto => "Choose passport photo",
            AttachmentKind::StaffId => "Choose staff ID card",
            AttachmentKind::IdCard => "Choose ID card",
        }
    }

    fn index(&self) -> usize {
        match self {
            AttachmentKind::PassportPhoto => 0,
            AttachmentKind::StaffId => 1,
            AttachmentKind::IdCard => 2,
        }
    }
}

/// A file picked in the browser (or any other host)
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    /// Declared MIME type, if the host supplied one
    pub mime_type: Option<String>,
    /// Content, used only for previews
    pub data: Arc<[u8]>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            mime_type: mime_type.map(str::to_string),
            data: data.into(),
        }
    }

    /// Descriptor without content; previews fall back to metadata
    pub fn metadata_only(name: impl Into<String>, size: u64, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.map(str::to_string),
            data: Arc::from(Vec::new()),
        }
    }
}

/// Result of a successful validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAttachment {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl ValidatedAttachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttachmentValidator {
    max_bytes: u64,
    preview_max_dimension: u32,
}

impl AttachmentValidator {
    pub fn new(max_bytes: u64, preview_max_dimension: u32) -> Self {
        Self {
            max_bytes,
            preview_max_dimension,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.max_attachment_bytes, config.preview_max_dimension)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn preview_max_dimension(&self) -> u32 {
        self.preview_max_dimension
    }

    /// Check size and resolve the MIME type. No side effects.
    pub fn validate(&self, file: &FileDescriptor) -> Result<ValidatedAttachment, ValidationError> {
        if file.size > self.max_bytes {
            return Err(ValidationError::SizeExceeded {
                name: file.name.clone(),
                size: file.size,
                limit: self.max_bytes,
            });
        }

        let mime_type = file
            .mime_type
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&file.name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        Ok(ValidatedAttachment {
            name: file.name.clone(),
            size: file.size,
            mime_type,
        })
    }
}
