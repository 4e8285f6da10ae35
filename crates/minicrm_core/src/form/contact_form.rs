//! Add/edit contact form state.
//!
//! # Responsibility
//! - Hold the values of the contact form independently of any widget toolkit.
//! - Decide which follow-up date pickers are visible for the chosen status.
//! - Produce a trimmed `ContactDraft` for saving.
//!
//! # Invariants
//! - Date pickers always hold a value; it only reaches the draft when the
//!   picker is visible.
//! - A cleared form has no selection and status `Not Contacted`.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Which follow-up date pickers the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateVisibility {
    pub date_called: bool,
    pub date_emailed: bool,
}

impl DateVisibility {
    pub fn for_status(status: ContactStatus) -> Self {
        Self {
            date_called: status.shows_date_called(),
            date_emailed: status.shows_date_emailed(),
        }
    }
}

/// Effect of clicking a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(ContactId),
    Deselected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    selected_id: Option<ContactId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub notes: String,
    status: ContactStatus,
    pub date_called: NaiveDate,
    pub date_emailed: NaiveDate,
}

impl ContactForm {
    /// Creates an empty form whose pickers default to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            notes: String::new(),
            status: ContactStatus::NotContacted,
            date_called: today,
            date_emailed: today,
        }
    }

    pub fn selected_id(&self) -> Option<ContactId> {
        self.selected_id
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ContactStatus) {
        self.status = status;
    }

    pub fn date_visibility(&self) -> DateVisibility {
        DateVisibility::for_status(self.status)
    }

    pub fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Copies a stored contact into the form and selects it.
    pub fn load(&mut self, contact: &Contact, today: NaiveDate) {
        self.selected_id = Some(contact.id);
        self.name = contact.name.clone();
        self.email = contact.email.clone();
        self.phone = contact.phone.clone();
        self.website = contact.website.clone();
        self.notes = contact.notes.clone();
        self.status = contact.status;
        self.date_called = contact.date_called.unwrap_or(today);
        self.date_emailed = contact.date_emailed.unwrap_or(today);
    }

    /// Row click: re-clicking the selected row clears the form.
    pub fn toggle_selection(&mut self, contact: &Contact, today: NaiveDate) -> SelectionChange {
        if self.selected_id == Some(contact.id) {
            self.clear(today);
            return SelectionChange::Deselected;
        }
        self.load(contact, today);
        SelectionChange::Selected(contact.id)
    }

    /// Builds the draft that a save would persist.
    pub fn to_draft(&self) -> ContactDraft {
        let visibility = self.date_visibility();
        ContactDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: self.website.trim().to_string(),
            status: self.status,
            notes: self.notes.trim().to_string(),
            date_called: visibility.date_called.then_some(self.date_called),
            date_emailed: visibility.date_emailed.then_some(self.date_emailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactForm, DateVisibility, SelectionChange};
    use crate::model::contact::{Contact, ContactStatus};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn stored_contact() -> Contact {
        Contact {
            id: 7,
            name: "Robin".to_string(),
            email: "robin@example.com".to_string(),
            phone: String::new(),
            website: String::new(),
            status: ContactStatus::Called,
            notes: "met at expo".to_string(),
            date_added: None,
            date_called: Some(day(2)),
            date_emailed: None,
        }
    }

    #[test]
    fn draft_only_carries_visible_dates() {
        let mut form = ContactForm::new(day(10));
        form.name = "  Robin ".to_string();
        form.set_status(ContactStatus::Emailed);

        let draft = form.to_draft();
        assert_eq!(draft.name, "Robin");
        assert_eq!(draft.date_called, None);
        assert_eq!(draft.date_emailed, Some(day(10)));
    }

    #[test]
    fn visibility_follows_status() {
        let mut form = ContactForm::new(day(1));
        assert_eq!(
            form.date_visibility(),
            DateVisibility {
                date_called: false,
                date_emailed: false
            }
        );
        form.set_status(ContactStatus::CalledAndEmailed);
        assert_eq!(
            form.date_visibility(),
            DateVisibility {
                date_called: true,
                date_emailed: true
            }
        );
    }

    #[test]
    fn load_keeps_stored_dates_and_defaults_missing_ones() {
        let mut form = ContactForm::new(day(10));
        form.load(&stored_contact(), day(10));
        assert_eq!(form.selected_id(), Some(7));
        assert_eq!(form.date_called, day(2));
        assert_eq!(form.date_emailed, day(10));
        assert_eq!(form.to_draft().date_called, Some(day(2)));
    }

    #[test]
    fn clicking_selected_row_twice_clears_form() {
        let contact = stored_contact();
        let mut form = ContactForm::new(day(10));

        assert_eq!(
            form.toggle_selection(&contact, day(10)),
            SelectionChange::Selected(7)
        );
        assert_eq!(
            form.toggle_selection(&contact, day(10)),
            SelectionChange::Deselected
        );
        assert_eq!(form, ContactForm::new(day(10)));
        assert_eq!(form.status(), ContactStatus::NotContacted);
    }
}
