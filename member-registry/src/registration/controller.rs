//! Registration form controller
//!
//! Orchestrates one page session: form submission, attachment inputs and the
//! directory's search/filter controls. Every outcome is reported through the
//! notification service; the directory is redrawn through the host renderer.

use parking_lot::Mutex;
use shared::{AttachmentFlags, Member};
use std::sync::Arc;

use super::form::{self, FormFields};
use crate::attachment::{
    AttachmentKind, AttachmentSlots, AttachmentValidator, FileDescriptor, Preview, preview,
};
use crate::core::RegistryConfig;
use crate::directory::{DirectoryRenderer, DirectoryView};
use crate::error::{RegistryResult, ValidationError};
use crate::notification::{NotificationKind, NotificationService};
use crate::query::MemberQuery;
use crate::store::{KeyValueBackend, MembershipStore, StorageResult};

pub const REGISTRATION_SUCCESS_MESSAGE: &str =
    "Registration successful! Welcome to PSTCSL. Your application is being processed.";

pub struct RegistrationController<R: DirectoryRenderer> {
    store: MembershipStore,
    validator: AttachmentValidator,
    slots: Mutex<AttachmentSlots>,
    notifications: NotificationService,
    renderer: R,
    query: MemberQuery,
}

impl<R: DirectoryRenderer> RegistrationController<R> {
    pub fn new(
        store: MembershipStore,
        validator: AttachmentValidator,
        notifications: NotificationService,
        renderer: R,
    ) -> Self {
        Self {
            store,
            validator,
            slots: Mutex::new(AttachmentSlots::new()),
            notifications,
            renderer,
            query: MemberQuery::default(),
        }
    }

    /// Load the roster from `backend` and draw the initial directory.
    ///
    /// An unreadable roster is reported to the user; the session continues
    /// with an empty directory.
    pub fn open(config: &RegistryConfig, backend: Arc<dyn KeyValueBackend>, renderer: R) -> Self {
        Self::open_with_query(config, backend, renderer, MemberQuery::default())
    }

    /// Like [`Self::open`], with the directory filtered from the first draw
    pub fn open_with_query(
        config: &RegistryConfig,
        backend: Arc<dyn KeyValueBackend>,
        renderer: R,
        query: MemberQuery,
    ) -> Self {
        let (store, load_error) = MembershipStore::open(backend);
        let mut controller = Self::new(
            store,
            AttachmentValidator::from_config(config),
            NotificationService::from_config(config),
            renderer,
        );
        controller.query = query;

        if let Some(e) = load_error {
            controller
                .notifications
                .notify(e.code().message(), NotificationKind::Error);
        }
        tracing::info!(
            members = controller.store.len(),
            states = controller.store.states().len(),
            "Registry opened"
        );
        controller.render();
        controller
    }

    /// Handle a form submission.
    ///
    /// On success the record is persisted, attachment inputs are cleared, the
    /// directory is redrawn and a success notice is shown; the host resets its
    /// form fields. On failure nothing changes except an error notice.
    pub fn submit(&mut self, fields: &FormFields, attachments: AttachmentFlags) -> RegistryResult<Member> {
        match self.register(fields, attachments) {
            Ok(member) => {
                tracing::info!(
                    member_id = member.id,
                    state = %member.state,
                    teaching_level = %member.teaching_level,
                    "Member registered"
                );
                self.slots.lock().clear_all();
                self.render();
                self.notifications
                    .notify(REGISTRATION_SUCCESS_MESSAGE, NotificationKind::Success);
                Ok(member)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    code = %e.code(),
                    focus = e.focus_target().unwrap_or("-"),
                    "Registration rejected"
                );
                self.notifications.notify(e.user_message(), NotificationKind::Error);
                Err(e)
            }
        }
    }

    /// Submit with the attachments currently held in the slots
    pub fn submit_form(&mut self, fields: &FormFields) -> RegistryResult<Member> {
        let attachments = self.slots.lock().flags();
        self.submit(fields, attachments)
    }

    fn register(&mut self, fields: &FormFields, attachments: AttachmentFlags) -> RegistryResult<Member> {
        // Consent is checked before anything else is looked at
        form::ensure_consent(form::consent_given(fields), attachments)?;
        let create = form::parse_fields(fields)?;

        // Ids come from the persisted roster, so it must have been read
        self.store.ensure_loaded()?;

        let member = create.into_member(self.store.next_id(), attachments, shared::util::now_utc());
        let appended = self.store.append(member)?;
        Ok(appended.clone())
    }

    /// Validate a picked file and build its preview.
    ///
    /// Returns the preview when it was applied, `None` when a newer selection
    /// (or a clear) made it stale. A rejected file empties the slot.
    pub async fn select_attachment(
        &self,
        kind: AttachmentKind,
        file: FileDescriptor,
    ) -> Result<Option<Preview>, ValidationError> {
        let attachment = match self.validator.validate(&file) {
            Ok(attachment) => attachment,
            Err(e) => {
                self.slots.lock().clear(kind);
                tracing::warn!(slot = kind.as_str(), file = %file.name, error = %e, "Attachment rejected");
                self.notifications.notify(e.user_message(), NotificationKind::Error);
                return Err(e);
            }
        };

        let ticket = self.slots.lock().select(kind, attachment.clone());
        tracing::debug!(
            slot = kind.as_str(),
            file = %attachment.name,
            mime = %attachment.mime_type,
            generation = ticket.generation,
            "Attachment selected"
        );

        let rendered =
            preview::render_preview(file, attachment, self.validator.preview_max_dimension()).await;
        let applied = self.slots.lock().apply_preview(ticket, rendered.clone());
        Ok(applied.then_some(rendered))
    }

    /// Remove a selected attachment; a pending preview for it is discarded
    pub fn clear_attachment(&self, kind: AttachmentKind) {
        self.slots.lock().clear(kind);
        tracing::debug!(slot = kind.as_str(), "Attachment cleared");
    }

    pub fn on_search_changed(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.render();
    }

    pub fn on_state_filter_changed(&mut self, state: impl Into<String>) {
        self.query.state = state.into();
        self.render();
    }

    /// Re-read the persisted roster (e.g. after another session wrote to it)
    /// and redraw.
    pub fn refresh(&mut self) -> StorageResult<usize> {
        let result = self.store.reload();
        if let Err(e) = &result {
            self.notifications
                .notify(e.code().message(), NotificationKind::Error);
        }
        self.render();
        result
    }

    /// Redraw the directory with the current query
    pub fn render(&self) {
        let view = DirectoryView {
            members: self.query.apply(self.store.members()),
            total: self.store.len(),
            states: self.store.states(),
            query: &self.query,
        };
        tracing::debug!(
            visible = view.visible_count(),
            total = view.total,
            "Rendering directory"
        );
        self.renderer.render(&view);
    }

    pub fn query(&self) -> &MemberQuery {
        &self.query
    }

    pub fn store(&self) -> &MembershipStore {
        &self.store
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    /// Snapshot of the attachment inputs
    pub fn attachments(&self) -> AttachmentSlots {
        self.slots.lock().clone()
    }
}
