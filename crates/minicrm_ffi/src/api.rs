//! UI-facing API for the desktop front-end (via FRB).
//!
//! # Responsibility
//! - Expose use-case level contact/template/email calls.
//! - Translate core errors into envelopes a form can show as a message.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call opens the store, performs one use-case, and drops it.
//! - The default template is seeded by the first open of the process only.
//! - Delete confirmation is owned by the caller.

use chrono::{Local, NaiveDate};
use log::{error, info};
use minicrm_core::db::{open_db, open_db_unseeded};
use minicrm_core::model::contact::FOLLOW_UP_DATE_FORMAT;
use minicrm_core::{
    compose_for_contact, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, to_mailto_url, Contact, ContactForm, ContactRow, ContactService,
    ContactStatus, DateVisibility, MailClient, MailDraft, MailHandoff, SqliteContactRepository,
    SqliteTemplateRepository, SystemMailClient, Template, TemplateForm, TemplateService,
};
use rusqlite::Connection;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "minicrm.sqlite3";
static STORE: OnceLock<Store> = OnceLock::new();

/// Health check.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic result of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmActionResponse {
    pub ok: bool,
    /// Affected row id on success.
    pub id: Option<i64>,
    pub message: String,
}

impl CrmActionResponse {
    fn success(message: impl Into<String>, id: i64) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Which date pickers to show for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDateFields {
    pub show_date_called: bool,
    pub show_date_emailed: bool,
}

impl From<DateVisibility> for ContactDateFields {
    fn from(value: DateVisibility) -> Self {
        Self {
            show_date_called: value.date_called,
            show_date_emailed: value.date_emailed,
        }
    }
}

/// One row of the contacts table, cells as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTableRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: String,
    pub date_added: String,
    pub date_called: String,
    pub date_emailed: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub ok: bool,
    pub items: Vec<ContactTableRow>,
    pub message: String,
}

/// Form payload for the add/edit contact form.
///
/// `id = None` creates. Dates use `YYYY-MM-DD`; a missing date for a
/// visible picker defaults to today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: String,
    pub notes: String,
    pub date_called: Option<String>,
    pub date_emailed: Option<String>,
}

/// Values to load into the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: String,
    pub notes: String,
    pub date_added: String,
    pub date_called: String,
    pub date_emailed: String,
    pub date_fields: ContactDateFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetailResponse {
    pub ok: bool,
    pub contact: Option<ContactDetail>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItem {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListResponse {
    pub ok: bool,
    pub items: Vec<TemplateItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDetailResponse {
    pub ok: bool,
    pub template: Option<TemplateItem>,
    pub message: String,
}

/// Template editor payload; `id = None` creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateInput {
    pub id: Option<i64>,
    pub name: String,
    pub subject: String,
    pub body: String,
}

/// Rendered email for preview or handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailComposeResponse {
    pub ok: bool,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub mailto_url: String,
    pub message: String,
}

impl EmailComposeResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            to: String::new(),
            subject: String::new(),
            body: String::new(),
            mailto_url: String::new(),
            message: message.into(),
        }
    }
}

/// Status dropdown values in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_status_options() -> Vec<String> {
    ContactStatus::ALL
        .iter()
        .map(|status| status.label().to_string())
        .collect()
}

/// Date-picker visibility for a status label; unknown labels show none.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_date_fields(status: String) -> ContactDateFields {
    status
        .parse::<ContactStatus>()
        .map(DateVisibility::for_status)
        .map(ContactDateFields::from)
        .unwrap_or(ContactDateFields {
            show_date_called: false,
            show_date_emailed: false,
        })
}

/// Loads the contacts table, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list() -> ContactListResponse {
    let result = with_connection(|conn| {
        let service = ContactService::new(SqliteContactRepository::new(conn));
        service.list_contacts().map_err(|err| err.to_string())
    });
    match result {
        Ok(contacts) => ContactListResponse {
            ok: true,
            message: format!("{} contact(s).", contacts.len()),
            items: contacts.iter().map(to_table_row).collect(),
        },
        Err(err) => ContactListResponse {
            ok: false,
            items: Vec::new(),
            message: failed("contacts_list", err),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_get(id: i64) -> ContactDetailResponse {
    let result = with_connection(|conn| {
        let service = ContactService::new(SqliteContactRepository::new(conn));
        service.get_contact(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(contact)) => ContactDetailResponse {
            ok: true,
            contact: Some(to_contact_detail(&contact)),
            message: String::new(),
        },
        Ok(None) => ContactDetailResponse {
            ok: false,
            contact: None,
            message: "Contact not found.".to_string(),
        },
        Err(err) => ContactDetailResponse {
            ok: false,
            contact: None,
            message: failed("contact_get", err),
        },
    }
}

/// Saves the contact form (create or update).
#[flutter_rust_bridge::frb(sync)]
pub fn contact_save(input: ContactInput) -> CrmActionResponse {
    let form = match contact_form_from_input(&input) {
        Ok(form) => form,
        Err(err) => {
            log_failure("contact_save");
            return CrmActionResponse::failure(err);
        }
    };
    let result = with_connection(|conn| {
        let service = ContactService::new(SqliteContactRepository::new(conn));
        service
            .save_contact(input.id, form.to_draft())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(outcome) if outcome.is_created() => {
            CrmActionResponse::success("Contact added.", outcome.id())
        }
        Ok(outcome) => CrmActionResponse::success("Contact updated.", outcome.id()),
        Err(err) => CrmActionResponse::failure(failed("contact_save", err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(id: i64) -> CrmActionResponse {
    let result = with_connection(|conn| {
        let service = ContactService::new(SqliteContactRepository::new(conn));
        service.delete_contact(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => CrmActionResponse::success("Contact deleted.", id),
        Err(err) => CrmActionResponse::failure(failed("contact_delete", err)),
    }
}

/// Lists templates sorted by name.
#[flutter_rust_bridge::frb(sync)]
pub fn templates_list() -> TemplateListResponse {
    let result = with_connection(|conn| {
        let service = TemplateService::new(SqliteTemplateRepository::new(conn));
        service.list_templates().map_err(|err| err.to_string())
    });
    match result {
        Ok(templates) => TemplateListResponse {
            ok: true,
            message: format!("{} template(s).", templates.len()),
            items: templates.iter().map(to_template_item).collect(),
        },
        Err(err) => TemplateListResponse {
            ok: false,
            items: Vec::new(),
            message: failed("templates_list", err),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn template_get(id: i64) -> TemplateDetailResponse {
    let result = with_connection(|conn| {
        let service = TemplateService::new(SqliteTemplateRepository::new(conn));
        service.get_template(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(template)) => TemplateDetailResponse {
            ok: true,
            template: Some(to_template_item(&template)),
            message: String::new(),
        },
        Ok(None) => TemplateDetailResponse {
            ok: false,
            template: None,
            message: "Template not found.".to_string(),
        },
        Err(err) => TemplateDetailResponse {
            ok: false,
            template: None,
            message: failed("template_get", err),
        },
    }
}

/// Saves the template editor (create or update).
#[flutter_rust_bridge::frb(sync)]
pub fn template_save(input: TemplateInput) -> CrmActionResponse {
    let mut form = TemplateForm::default();
    form.name = input.name;
    form.subject = input.subject;
    form.body = input.body;
    let result = with_connection(|conn| {
        let service = TemplateService::new(SqliteTemplateRepository::new(conn));
        service
            .save_template(input.id, &form.to_draft())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(outcome) if outcome.is_created() => {
            CrmActionResponse::success("Template created.", outcome.id())
        }
        Ok(outcome) => CrmActionResponse::success("Template updated.", outcome.id()),
        Err(err) => CrmActionResponse::failure(failed("template_save", err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn template_delete(id: i64) -> CrmActionResponse {
    let result = with_connection(|conn| {
        let service = TemplateService::new(SqliteTemplateRepository::new(conn));
        service.delete_template(id).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => CrmActionResponse::success("Template deleted.", id),
        Err(err) => CrmActionResponse::failure(failed("template_delete", err)),
    }
}

/// Renders an email for a contact without launching anything.
///
/// `template_id = None` picks the first template by name.
#[flutter_rust_bridge::frb(sync)]
pub fn email_compose(contact_id: i64, template_id: Option<i64>) -> EmailComposeResponse {
    match compose_draft(contact_id, template_id) {
        Ok(draft) => EmailComposeResponse {
            ok: true,
            mailto_url: to_mailto_url(&draft),
            to: draft.to,
            subject: draft.subject,
            body: draft.body,
            message: String::new(),
        },
        Err(err) => {
            log_failure("email_compose");
            EmailComposeResponse::failure(err)
        }
    }
}

/// Renders an email and opens it in the desktop mail client.
#[flutter_rust_bridge::frb(sync)]
pub fn email_open(contact_id: i64, template_id: Option<i64>) -> CrmActionResponse {
    let draft = match compose_draft(contact_id, template_id) {
        Ok(draft) => draft,
        Err(err) => {
            log_failure("email_open");
            return CrmActionResponse::failure(err);
        }
    };
    match SystemMailClient.compose(&draft) {
        Ok(MailHandoff::AppleMail) => CrmActionResponse::success("Opened in Mail.", contact_id),
        Ok(MailHandoff::MailtoUrl) => {
            CrmActionResponse::success("Opened default mail client.", contact_id)
        }
        Err(err) => {
            log_failure("email_open");
            CrmActionResponse::failure(format!("Email error: {err}"))
        }
    }
}

fn compose_draft(contact_id: i64, template_id: Option<i64>) -> Result<MailDraft, String> {
    with_connection(|conn| {
        let contacts = ContactService::new(SqliteContactRepository::new(conn));
        let templates = TemplateService::new(SqliteTemplateRepository::new(conn));
        let contact = contacts
            .get_contact(contact_id)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| "Contact not found.".to_string())?;
        let template = templates
            .resolve_template(template_id)
            .map_err(|err| err.to_string())?;
        compose_for_contact(&contact, &template).map_err(|err| err.to_string())
    })
}

fn contact_form_from_input(input: &ContactInput) -> Result<ContactForm, String> {
    let today = Local::now().date_naive();
    let mut form = ContactForm::new(today);
    form.name = input.name.clone();
    form.email = input.email.clone();
    form.phone = input.phone.clone();
    form.website = input.website.clone();
    form.notes = input.notes.clone();
    if !input.status.trim().is_empty() {
        form.set_status(
            input
                .status
                .parse::<ContactStatus>()
                .map_err(|err| err.to_string())?,
        );
    }
    if let Some(value) = input.date_called.as_deref() {
        form.date_called = parse_date(value)?.unwrap_or(today);
    }
    if let Some(value) = input.date_emailed.as_deref() {
        form.date_emailed = parse_date(value)?.unwrap_or(today);
    }
    Ok(form)
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, FOLLOW_UP_DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("invalid date `{trimmed}`; expected YYYY-MM-DD"))
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var("MINICRM_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

/// Database file shared by every call, seeded on its first open only.
///
/// Deleting the last template leaves the list empty until the next launch.
struct Store {
    path: PathBuf,
    seeded: AtomicBool,
}

impl Store {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            seeded: AtomicBool::new(false),
        }
    }

    fn open(&self) -> Result<Connection, String> {
        let conn = if self.seeded.load(Ordering::Acquire) {
            open_db_unseeded(&self.path)
        } else {
            open_db(&self.path)
        }
        .map_err(|err| format!("database open failed: {err}"))?;

        if !self.seeded.swap(true, Ordering::AcqRel) {
            info!("event=ffi_store_open module=ffi status=ok first_open=true");
        }
        Ok(conn)
    }
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let store = STORE.get_or_init(|| Store::new(resolve_db_path()));
    let conn = store.open()?;
    f(&conn)
}

/// Logs a failed call by name only; messages may carry contact details.
fn log_failure(call: &'static str) {
    error!("event=ffi_call module=ffi status=error call={call}");
}

fn failed(call: &'static str, err: impl Display) -> String {
    log_failure(call);
    format!("{call} failed: {err}")
}

fn to_table_row(contact: &Contact) -> ContactTableRow {
    let row = ContactRow::from(contact);
    ContactTableRow {
        id: row.id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        website: row.website,
        status: row.status,
        date_added: row.date_added,
        date_called: row.date_called,
        date_emailed: row.date_emailed,
        action: row.action.to_string(),
    }
}

fn to_contact_detail(contact: &Contact) -> ContactDetail {
    let row = ContactRow::from(contact);
    ContactDetail {
        id: contact.id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        website: row.website,
        status: row.status,
        notes: contact.notes.clone(),
        date_added: row.date_added,
        date_called: row.date_called,
        date_emailed: row.date_emailed,
        date_fields: DateVisibility::for_status(contact.status).into(),
    }
}

fn to_template_item(template: &Template) -> TemplateItem {
    TemplateItem {
        id: template.id,
        name: template.name.clone(),
        subject: template.subject.clone(),
        body: template.body.clone(),
    }
}
