//! Template repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes call `TemplateDraft::validate()` first.
//! - Name uniqueness is enforced by the `templates.name` UNIQUE constraint
//!   and surfaced as `RepoError::DuplicateTemplateName`.
//! - Listing order is by name ascending.

use crate::model::template::{Template, TemplateDraft, TemplateId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const TEMPLATE_SELECT_SQL: &str = "SELECT id, name, subject, body FROM templates";

const ENTITY: &str = "template";

/// Repository interface for template CRUD.
pub trait TemplateRepository {
    fn create_template(&self, draft: &TemplateDraft) -> RepoResult<TemplateId>;
    fn update_template(&self, id: TemplateId, draft: &TemplateDraft) -> RepoResult<()>;
    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>>;
    fn list_templates(&self) -> RepoResult<Vec<Template>>;
    fn delete_template(&self, id: TemplateId) -> RepoResult<()>;
}

/// SQLite-backed template repository.
pub struct SqliteTemplateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTemplateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TemplateRepository for SqliteTemplateRepository<'_> {
    fn create_template(&self, draft: &TemplateDraft) -> RepoResult<TemplateId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO templates (name, subject, body) VALUES (?1, ?2, ?3);",
                params![
                    draft.name.as_str(),
                    draft.subject.as_str(),
                    draft.body.as_str()
                ],
            )
            .map_err(|err| map_unique_violation(err, &draft.name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_template(&self, id: TemplateId, draft: &TemplateDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE templates SET name = ?1, subject = ?2, body = ?3 WHERE id = ?4;",
                params![
                    draft.name.as_str(),
                    draft.subject.as_str(),
                    draft.body.as_str(),
                    id
                ],
            )
            .map_err(|err| map_unique_violation(err, &draft.name))?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEMPLATE_SELECT_SQL} WHERE id = ?1;"))?;
        let template = stmt.query_row([id], parse_template_row).optional()?;
        Ok(template)
    }

    fn list_templates(&self) -> RepoResult<Vec<Template>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEMPLATE_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let templates = stmt
            .query_map([], parse_template_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    fn delete_template(&self, id: TemplateId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM templates WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn parse_template_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get("id")?,
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        subject: row.get::<_, Option<String>>("subject")?.unwrap_or_default(),
        body: row.get::<_, Option<String>>("body")?.unwrap_or_default(),
    })
}

fn map_unique_violation(err: rusqlite::Error, name: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateTemplateName(name.to_string())
        }
        _ => err.into(),
    }
}
