use super::Session;
use crate::cli::{TemplateFields, TemplatesCommand};
use anyhow::{bail, Context, Result};
use minicrm_core::{Template, TemplateForm, TemplateId};
use std::io::Write;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this template?";

pub fn run(session: &mut Session<'_>, command: TemplatesCommand) -> Result<()> {
    match command {
        TemplatesCommand::List { json } => list(session, json),
        TemplatesCommand::Show { id } => show(session, id),
        TemplatesCommand::Add(fields) => save(session, None, fields),
        TemplatesCommand::Edit { id, fields } => save(session, Some(id), fields),
        TemplatesCommand::Delete { id, yes } => delete(session, id, yes),
    }
}

fn list(session: &mut Session<'_>, json: bool) -> Result<()> {
    let templates = session.templates().list_templates()?;
    if json {
        writeln!(session.out, "{}", serde_json::to_string_pretty(&templates)?)?;
        return Ok(());
    }

    if templates.is_empty() {
        writeln!(session.out, "No templates.")?;
    }
    for template in &templates {
        writeln!(session.out, "{:>4}  {}", template.id, template.name)?;
    }
    Ok(())
}

fn show(session: &mut Session<'_>, id: TemplateId) -> Result<()> {
    let template = require_template(session, id)?;
    writeln!(session.out, "Name:    {}", template.name)?;
    writeln!(session.out, "Subject: {}", template.subject)?;
    writeln!(session.out)?;
    writeln!(session.out, "{}", template.body)?;
    Ok(())
}

/// Creates (`id == None`) or edits a template through the editor form.
fn save(session: &mut Session<'_>, id: Option<TemplateId>, fields: TemplateFields) -> Result<()> {
    let mut form = TemplateForm::default();
    if let Some(id) = id {
        form.load(&require_template(session, id)?);
    }

    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(subject) = fields.subject {
        form.subject = subject;
    }
    if let Some(body) = fields.body {
        form.body = body;
    }
    if let Some(path) = fields.body_file {
        form.body = std::fs::read_to_string(&path)
            .with_context(|| format!("reading template body from {}", path.display()))?;
    }

    let outcome = session
        .templates()
        .save_template(form.current_id(), &form.to_draft())?;

    if outcome.is_created() {
        writeln!(session.out, "Template created. (id {})", outcome.id())?;
    } else {
        writeln!(session.out, "Template updated.")?;
    }
    Ok(())
}

fn delete(session: &mut Session<'_>, id: TemplateId, yes: bool) -> Result<()> {
    require_template(session, id)?;
    if !yes && !session.prompter.confirm(DELETE_PROMPT)? {
        writeln!(session.out, "Delete cancelled.")?;
        return Ok(());
    }

    session.templates().delete_template(id)?;
    writeln!(session.out, "Template deleted.")?;
    Ok(())
}

fn require_template(session: &Session<'_>, id: TemplateId) -> Result<Template> {
    match session.templates().get_template(id)? {
        Some(template) => Ok(template),
        None => bail!("template not found: {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::cli::{TemplateFields, TemplatesCommand};
    use crate::commands::testing::{run_captured, RecordingMailClient, ScriptedPrompter};
    use minicrm_core::db::{open_db_in_memory, DEFAULT_TEMPLATE_NAME};
    use minicrm_core::{SqliteTemplateRepository, TemplateRepository};
    use std::io::Write as _;

    fn fields(name: &str, subject: &str, body: &str) -> TemplateFields {
        TemplateFields {
            name: Some(name.to_string()),
            subject: Some(subject.to_string()),
            body: Some(body.to_string()),
            body_file: None,
        }
    }

    #[test]
    fn list_shows_the_seeded_template() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(session, TemplatesCommand::List { json: false })
        })
        .unwrap();
        assert!(output.contains(DEFAULT_TEMPLATE_NAME));
    }

    #[test]
    fn add_then_edit_updates_in_place() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(
                session,
                TemplatesCommand::Add(fields(" Intro ", "Hello {{name}}", "Hi {{name}}")),
            )
        })
        .unwrap();
        assert!(output.starts_with("Template created."));

        let repo = SqliteTemplateRepository::new(&conn);
        let created = repo
            .list_templates()
            .unwrap()
            .into_iter()
            .find(|template| template.name == "Intro")
            .unwrap();

        let output = run_captured(&conn, &prompter, &mail, |session| {
            run(
                session,
                TemplatesCommand::Edit {
                    id: created.id,
                    fields: TemplateFields {
                        subject: Some("Welcome {{name}}".to_string()),
                        ..TemplateFields::default()
                    },
                },
            )
        })
        .unwrap();
        assert_eq!(output, "Template updated.\n");

        let updated = repo.get_template(created.id).unwrap().unwrap();
        assert_eq!(updated.name, "Intro");
        assert_eq!(updated.subject, "Welcome {{name}}");
        assert_eq!(updated.body, "Hi {{name}}");
    }

    #[test]
    fn body_can_come_from_a_file() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Dear {{{{name}}}},\n\nThanks!").unwrap();

        run_captured(&conn, &prompter, &mail, |session| {
            run(
                session,
                TemplatesCommand::Add(TemplateFields {
                    name: Some("Thanks".to_string()),
                    subject: Some("Thanks".to_string()),
                    body: None,
                    body_file: Some(file.path().to_path_buf()),
                }),
            )
        })
        .unwrap();

        let stored = SqliteTemplateRepository::new(&conn)
            .list_templates()
            .unwrap()
            .into_iter()
            .find(|template| template.name == "Thanks")
            .unwrap();
        assert_eq!(stored.body, "Dear {{name}},\n\nThanks!");
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let err = run_captured(&conn, &prompter, &mail, |session| {
            run(session, TemplatesCommand::Add(fields(DEFAULT_TEMPLATE_NAME, "", "")))
        })
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn missing_name_is_rejected() {
        let conn = open_db_in_memory().unwrap();
        let prompter = ScriptedPrompter::default();
        let mail = RecordingMailClient::default();

        let err = run_captured(&conn, &prompter, &mail, |session| {
            run(session, TemplatesCommand::Add(fields("   ", "Subject", "Body")))
        })
        .unwrap_err();
        assert!(err.to_string().contains("template name"));
    }
}
