//! Attachment previews
//!
//! Images are decoded off the async thread and downscaled to a PNG data URL.
//! Anything else, including images that fail to decode, gets a name-only
//! preview.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use serde::Serialize;
use std::io::Cursor;

use super::{FileDescriptor, ValidatedAttachment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preview {
    Image {
        name: String,
        data_url: String,
        width: u32,
        height: u32,
    },
    Metadata {
        name: String,
    },
}

impl Preview {
    pub fn name(&self) -> &str {
        match self {
            Preview::Image { name, .. } | Preview::Metadata { name } => name,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Preview::Image { .. })
    }
}

/// Build the preview for a validated attachment
pub async fn render_preview(
    file: FileDescriptor,
    attachment: ValidatedAttachment,
    max_dimension: u32,
) -> Preview {
    if !attachment.is_image() || file.data.is_empty() {
        return Preview::Metadata {
            name: attachment.name,
        };
    }

    let data = file.data.clone();
    let decoded = tokio::task::spawn_blocking(move || decode_thumbnail(&data, max_dimension)).await;

    match decoded {
        Ok(Ok((data_url, width, height))) => Preview::Image {
            name: attachment.name,
            data_url,
            width,
            height,
        },
        Ok(Err(e)) => {
            tracing::warn!(file = %attachment.name, error = %e, "Image preview decode failed");
            Preview::Metadata {
                name: attachment.name,
            }
        }
        Err(e) => {
            tracing::warn!(file = %attachment.name, error = %e, "Image preview task failed");
            Preview::Metadata {
                name: attachment.name,
            }
        }
    }
}

/// Decode, downscale to fit `max_dimension`, re-encode as a PNG data URL
fn decode_thumbnail(data: &[u8], max_dimension: u32) -> image::ImageResult<(String, u32, u32)> {
    let img = image::load_from_memory(data)?;
    let thumb = if img.width() > max_dimension || img.height() > max_dimension {
        img.thumbnail(max_dimension, max_dimension)
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    thumb.write_to(&mut buffer, ImageFormat::Png)?;
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(buffer.into_inner()));

    Ok((data_url, thumb.width(), thumb.height()))
}
