//! Contact use-case service.
//!
//! # Invariants
//! - A save without an id inserts and stamps `date_added` with local time.
//! - A save with an id updates in place and keeps `date_added`.
//! - Follow-up dates the status does not track are cleared before writing.
//! - Logs carry ids and statuses only, never contact details.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoResult;
use crate::service::SaveOutcome;
use chrono::{Local, NaiveDateTime, Timelike};
use log::info;

/// Use-case service wrapper for contact CRUD.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts or updates one contact depending on `id`.
    pub fn save_contact(
        &self,
        id: Option<ContactId>,
        draft: ContactDraft,
    ) -> RepoResult<SaveOutcome> {
        let now = Local::now().naive_local();
        // Stored at second precision.
        let now = now.with_nanosecond(0).unwrap_or(now);
        self.save_contact_at(id, draft, now)
    }

    /// Same as [`save_contact`](Self::save_contact) with an explicit
    /// creation timestamp.
    pub fn save_contact_at(
        &self,
        id: Option<ContactId>,
        draft: ContactDraft,
        now: NaiveDateTime,
    ) -> RepoResult<SaveOutcome> {
        let draft = draft.without_hidden_dates();
        let outcome = match id {
            Some(id) => {
                self.repo.update_contact(id, &draft)?;
                SaveOutcome::Updated(id)
            }
            None => SaveOutcome::Created(self.repo.create_contact(&draft, now)?),
        };

        info!(
            "event=contact_save module=service status=ok action={} contact_id={} contact_status={:?}",
            if outcome.is_created() { "create" } else { "update" },
            outcome.id(),
            draft.status
        );
        Ok(outcome)
    }

    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Lists all contacts, newest first.
    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Permanently removes one contact. Confirmation is the caller's job.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }
}
