//! Contact repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_contact` and `update_contact` call `ContactDraft::validate()`
//!   before SQL mutations.
//! - `update_contact` never rewrites `date_added`.
//! - Listing order is newest first (`id DESC`).
//! - NULL text columns read back as empty strings and a NULL status as
//!   `Not Contacted`; any other unparseable value is rejected.

use crate::model::contact::{
    Contact, ContactDraft, ContactId, ContactStatus, DATE_ADDED_FORMAT, FOLLOW_UP_DATE_FORMAT,
};
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    website,
    status,
    notes,
    date_added,
    date_called,
    date_emailed
FROM contacts";

const ENTITY: &str = "contact";

/// Repository interface for contact CRUD.
pub trait ContactRepository {
    fn create_contact(
        &self,
        draft: &ContactDraft,
        date_added: NaiveDateTime,
    ) -> RepoResult<ContactId>;
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(
        &self,
        draft: &ContactDraft,
        date_added: NaiveDateTime,
    ) -> RepoResult<ContactId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                name,
                email,
                phone,
                website,
                status,
                notes,
                date_added,
                date_called,
                date_emailed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.website.as_str(),
                draft.status.label(),
                draft.notes.as_str(),
                date_added.format(DATE_ADDED_FORMAT).to_string(),
                draft.date_called.map(format_follow_up_date),
                draft.date_emailed.map(format_follow_up_date),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                email = ?2,
                phone = ?3,
                website = ?4,
                status = ?5,
                notes = ?6,
                date_called = ?7,
                date_emailed = ?8
             WHERE id = ?9;",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.website.as_str(),
                draft.status.label(),
                draft.notes.as_str(),
                draft.date_called.map(format_follow_up_date),
                draft.date_emailed.map(format_follow_up_date),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_contact_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;

    let status = match non_empty_text(row, "status")? {
        Some(value) => value.parse::<ContactStatus>().map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid status `{value}` in contacts.status (id={id})"
            ))
        })?,
        None => ContactStatus::NotContacted,
    };

    let date_added = match non_empty_text(row, "date_added")? {
        Some(value) => Some(
            NaiveDateTime::parse_from_str(&value, DATE_ADDED_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid timestamp `{value}` in contacts.date_added (id={id})"
                ))
            })?,
        ),
        None => None,
    };

    Ok(Contact {
        id,
        name: text_or_empty(row, "name")?,
        email: text_or_empty(row, "email")?,
        phone: text_or_empty(row, "phone")?,
        website: text_or_empty(row, "website")?,
        status,
        notes: text_or_empty(row, "notes")?,
        date_added,
        date_called: parse_follow_up_date(row, "date_called", id)?,
        date_emailed: parse_follow_up_date(row, "date_emailed", id)?,
    })
}

fn parse_follow_up_date(
    row: &Row<'_>,
    column: &'static str,
    id: ContactId,
) -> RepoResult<Option<NaiveDate>> {
    match non_empty_text(row, column)? {
        Some(value) => NaiveDate::parse_from_str(&value, FOLLOW_UP_DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid date `{value}` in contacts.{column} (id={id})"
                ))
            }),
        None => Ok(None),
    }
}

fn text_or_empty(row: &Row<'_>, column: &str) -> RepoResult<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn non_empty_text(row: &Row<'_>, column: &str) -> RepoResult<Option<String>> {
    Ok(row
        .get::<_, Option<String>>(column)?
        .filter(|value| !value.trim().is_empty()))
}

fn format_follow_up_date(date: NaiveDate) -> String {
    date.format(FOLLOW_UP_DATE_FORMAT).to_string()
}
