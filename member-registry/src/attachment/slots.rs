//! Per-input attachment state
//!
//! Every selection or clear bumps the slot's generation. A preview is tagged
//! with the generation it was requested for and is only applied while that
//! generation is still current, so a slow decode cannot overwrite the preview
//! of a newer selection.

use shared::AttachmentFlags;

use super::{AttachmentKind, Preview, ValidatedAttachment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    pub kind: AttachmentKind,
    pub generation: u64,
}

#[derive(Debug, Default, Clone)]
struct AttachmentSlot {
    generation: u64,
    selection: Option<ValidatedAttachment>,
    preview: Option<Preview>,
}

#[derive(Debug, Default, Clone)]
pub struct AttachmentSlots {
    slots: [AttachmentSlot; 3],
}

impl AttachmentSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection; any pending preview for the slot goes stale
    pub fn select(&mut self, kind: AttachmentKind, attachment: ValidatedAttachment) -> PreviewTicket {
        let slot = &mut self.slots[kind.index()];
        slot.generation += 1;
        slot.selection = Some(attachment);
        slot.preview = None;
        PreviewTicket {
            kind,
            generation: slot.generation,
        }
    }

    /// Drop the selection and its preview
    pub fn clear(&mut self, kind: AttachmentKind) {
        let slot = &mut self.slots[kind.index()];
        slot.generation += 1;
        slot.selection = None;
        slot.preview = None;
    }

    pub fn clear_all(&mut self) {
        for kind in AttachmentKind::ALL {
            self.clear(kind);
        }
    }

    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        let slot = &self.slots[ticket.kind.index()];
        slot.generation == ticket.generation && slot.selection.is_some()
    }

    /// Apply a finished preview. Returns false (and drops it) when stale.
    pub fn apply_preview(&mut self, ticket: PreviewTicket, preview: Preview) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                slot = ticket.kind.as_str(),
                generation = ticket.generation,
                "Discarding stale attachment preview"
            );
            return false;
        }
        self.slots[ticket.kind.index()].preview = Some(preview);
        true
    }

    pub fn selection(&self, kind: AttachmentKind) -> Option<&ValidatedAttachment> {
        self.slots[kind.index()].selection.as_ref()
    }

    pub fn preview(&self, kind: AttachmentKind) -> Option<&Preview> {
        self.slots[kind.index()].preview.as_ref()
    }

    /// Presence flags for the submission
    pub fn flags(&self) -> AttachmentFlags {
        AttachmentFlags {
            passport_photo: self.selection(AttachmentKind::PassportPhoto).is_some(),
            staff_id: self.selection(AttachmentKind::StaffId).is_some(),
            id_card: self.selection(AttachmentKind::IdCard).is_some(),
        }
    }
}
