use super::Session;
use crate::cli::{ContactFields, ContactsCommand};
use anyhow::{bail, Result};
use minicrm_core::model::contact::{DATE_ADDED_FORMAT, FOLLOW_UP_DATE_FORMAT};
use minicrm_core::{render_text_table, Contact, ContactForm, ContactId, ContactRow};
use std::io::Write;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this contact?";

pub fn run(session: &mut Session<'_>, command: ContactsCommand) -> Result<()> {
    match command {
        ContactsCommand::List { json } => list(session, json),
        ContactsCommand::Show { id } => show(session, id),
        ContactsCommand::Add(fields) => add(session, fields),
        ContactsCommand::Edit { id, fields } => edit(session, id, fields),
        ContactsCommand::Delete { id, yes } => delete(session, id, yes),
    }
}

fn list(session: &mut Session<'_>, json: bool) -> Result<()> {
    let rows: Vec<ContactRow> = session
        .contacts()
        .list_contacts()?
        .iter()
        .map(ContactRow::from)
        .collect();

    if json {
        writeln!(session.out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(session.out, "{}", render_text_table(&rows))?;
    }
    Ok(())
}

fn show(session: &mut Session<'_>, id: ContactId) -> Result<()> {
    let contact = require_contact(session, id)?;
    write_details(session, &contact)
}

fn add(session: &mut Session<'_>, fields: ContactFields) -> Result<()> {
    let mut form = ContactForm::new(session.today);
    apply_fields(&mut form, fields);

    let outcome = session
        .contacts()
        .save_contact(form.selected_id(), form.to_draft())?;
    writeln!(session.out, "Contact added. (id {})", outcome.id())?;
    Ok(())
}

fn edit(session: &mut Session<'_>, id: ContactId, fields: ContactFields) -> Result<()> {
    let contact = require_contact(session, id)?;
    let mut form = ContactForm::new(session.today);
    form.load(&contact, session.today);
    apply_fields(&mut form, fields);

    session
        .contacts()
        .save_contact(form.selected_id(), form.to_draft())?;
    writeln!(session.out, "Contact updated.")?;
    Ok(())
}

fn delete(session: &mut Session<'_>, id: ContactId, yes: bool) -> Result<()> {
    require_contact(session, id)?;
    if !yes && !session.prompter.confirm(DELETE_PROMPT)? {
        writeln!(session.out, "Delete cancelled.")?;
        return Ok(());
    }

    session.contacts().delete_contact(id)?;
    writeln!(session.out, "Contact deleted.")?;
    Ok(())
}

pub(crate) fn require_contact(session: &Session<'_>, id: ContactId) -> Result<Contact> {
    match session.contacts().get_contact(id)? {
        Some(contact) => Ok(contact),
        None => bail!("contact not found: {id}"),
    }
}

/// Overlays the flags that were given; absent flags keep the form value.
fn apply_fields(form: &mut ContactForm, fields: ContactFields) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(email) = fields.email {
        form.email = email;
    }
    if let Some(phone) = fields.phone {
        form.phone = phone;
    }
    if let Some(website) = fields.website {
        form.website = website;
    }
    if let Some(notes) = fields.notes {
        form.notes = notes;
    }
    if let Some(status) = fields.status {
        form.set_status(status);
    }
    if let Some(date) = fields.date_called {
        form.date_called = date;
    }
    if let Some(date) = fields.date_emailed {
        form.date_emailed = date;
    }
}

fn write_details(session: &mut Session<'_>, contact: &Contact) -> Result<()> {
    let out = &mut *session.out;
    writeln!(out, "ID:           {}", contact.id)?;
    writeln!(out, "Name:         {}", contact.name)?;
    writeln!(out, "Email:        {}", contact.email)?;
    writeln!(out, "Phone:        {}", contact.phone)?;
    writeln!(out, "Website:      {}", contact.website)?;
    writeln!(out, "Status:       {}", contact.status)?;
    if let Some(added) = contact.date_added {
        writeln!(out, "Date Added:   {}", added.format(DATE_ADDED_FORMAT))?;
    }
    if let Some(called) = contact.date_called {
        writeln!(out, "Date Called:  {}", called.format(FOLLOW_UP_DATE_FORMAT))?;
    }
    if let Some(emailed) = contact.date_emailed {
        writeln!(out, "Date Emailed: {}", emailed.format(FOLLOW_UP_DATE_FORMAT))?;
    }
    if !contact.notes.is_empty() {
        writeln!(out, "Notes:\n{}", contact.notes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, DELETE_PROMPT};
    use crate::cli::{ContactFields, ContactsCommand};
    use crate::commands::testing::{run_captured, RecordingMailClient, ScriptedPrompter};
    use minicrm_core::db::open_db_in_memory;
    use minicrm_core::{ContactRepository, ContactStatus, SqliteContactRepository};

    fn fields(name: &str, email: &str) -> ContactFields {
        ContactFields {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            ..ContactFields::default()
        }
    }

    #[test]
    fn add_trims_input_and_defaults_visible_dates_to_today() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(
                session,
                ContactsCommand::Add(ContactFields {
                    status: Some(ContactStatus::Called),
                    ..fields("  Ada  ", " ada@example.com ")
                }),
            )
        })
        .unwrap();
        assert!(output.starts_with("Contact added."));

        let contacts = SqliteContactRepository::new(&conn).list_contacts().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[0].email, "ada@example.com");
        assert_eq!(contacts[0].date_called, Some(crate::commands::testing::today()));
        assert_eq!(contacts[0].date_emailed, None);
    }

    #[test]
    fn add_without_name_or_email_fails() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let err = run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Add(fields("  ", "")))
        })
        .unwrap_err();
        assert!(err.to_string().contains("name or email"));
    }

    #[test]
    fn edit_keeps_fields_that_were_not_passed() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Add(fields("Grace", "grace@example.com")))
        })
        .unwrap();
        let id = SqliteContactRepository::new(&conn).list_contacts().unwrap()[0].id;

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(
                session,
                ContactsCommand::Edit {
                    id,
                    fields: ContactFields {
                        phone: Some("555-0100".to_string()),
                        ..ContactFields::default()
                    },
                },
            )
        })
        .unwrap();
        assert_eq!(output, "Contact updated.\n");

        let stored = SqliteContactRepository::new(&conn)
            .get_contact(id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Grace");
        assert_eq!(stored.email, "grace@example.com");
        assert_eq!(stored.phone, "555-0100");
    }

    #[test]
    fn declined_delete_keeps_the_contact() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Add(fields("Linus", "")))
        })
        .unwrap();
        let id = SqliteContactRepository::new(&conn).list_contacts().unwrap()[0].id;

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Delete { id, yes: false })
        })
        .unwrap();
        assert_eq!(output, "Delete cancelled.\n");
        assert_eq!(prompter.asked.borrow().as_slice(), [DELETE_PROMPT]);
        assert!(SqliteContactRepository::new(&conn)
            .get_contact(id)
            .unwrap()
            .is_some());
    }

    #[test]
    fn delete_with_yes_skips_the_prompt() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Add(fields("Linus", "")))
        })
        .unwrap();
        let id = SqliteContactRepository::new(&conn).list_contacts().unwrap()[0].id;

        run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Delete { id, yes: true })
        })
        .unwrap();
        assert!(prompter.asked.borrow().is_empty());
        assert!(SqliteContactRepository::new(&conn)
            .get_contact(id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn list_json_emits_table_rows() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Add(fields("Ada", "ada@example.com")))
        })
        .unwrap();
        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::List { json: true })
        })
        .unwrap();

        let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(rows[0]["name"], "Ada");
        assert_eq!(rows[0]["status"], "Not Contacted");
        assert_eq!(rows[0]["action"], "Email");
    }

    #[test]
    fn show_unknown_contact_is_an_error() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let err = run_captured(&conn, &prompter, &mail, |session| {
            run(session, ContactsCommand::Show { id: 42 })
        })
        .unwrap_err();
        assert!(err.to_string().contains("contact not found: 42"));
    }
}
