use minicrm_core::db::{open_db_in_memory, DEFAULT_TEMPLATE_NAME};
use minicrm_core::{
    RepoError, SaveOutcome, SqliteTemplateRepository, TemplateDraft, TemplateRepository,
    TemplateService, TemplateServiceError, TemplateValidationError,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTemplateRepository::new(&conn);

    let draft = TemplateDraft::new("Intro", "Hello {{name}}", "Nice to meet you, {{name}}.");
    let id = repo.create_template(&draft).unwrap();

    let loaded = repo.get_template(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.to_draft(), draft);
}

#[test]
fn list_is_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTemplateRepository::new(&conn);
    repo.create_template(&TemplateDraft::new("Zebra", "", ""))
        .unwrap();
    repo.create_template(&TemplateDraft::new("Alpha", "", ""))
        .unwrap();

    let names: Vec<String> = repo
        .list_templates()
        .unwrap()
        .into_iter()
        .map(|template| template.name)
        .collect();
    assert_eq!(names, vec!["Alpha", DEFAULT_TEMPLATE_NAME, "Zebra"]);
}

#[test]
fn duplicate_name_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTemplateRepository::new(&conn);

    let err = repo
        .create_template(&TemplateDraft::new(DEFAULT_TEMPLATE_NAME, "s", "b"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateTemplateName(name) if name == DEFAULT_TEMPLATE_NAME));

    let other = repo
        .create_template(&TemplateDraft::new("Other", "", ""))
        .unwrap();
    let err = repo
        .update_template(other, &TemplateDraft::new(DEFAULT_TEMPLATE_NAME, "", ""))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateTemplateName(_)));
}

#[test]
fn blank_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTemplateRepository::new(&conn);

    let err = repo
        .create_template(&TemplateDraft::new("  ", "s", "b"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::TemplateValidation(TemplateValidationError::MissingName)
    ));
}

#[test]
fn update_and_delete_missing_template_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTemplateRepository::new(&conn);

    assert!(matches!(
        repo.update_template(99, &TemplateDraft::new("X", "", "")),
        Err(RepoError::NotFound {
            entity: "template",
            id: 99
        })
    ));
    assert!(matches!(
        repo.delete_template(99),
        Err(RepoError::NotFound { id: 99, .. })
    ));
}

#[test]
fn service_upserts_by_id() {
    let conn = open_db_in_memory().unwrap();
    let service = TemplateService::new(SqliteTemplateRepository::new(&conn));

    let created = service
        .save_template(None, &TemplateDraft::new("Check-in", "Hi", "Body"))
        .unwrap();
    assert!(created.is_created());

    let updated = service
        .save_template(
            Some(created.id()),
            &TemplateDraft::new("Check-in", "Hi {{name}}", "Body"),
        )
        .unwrap();
    assert_eq!(updated, SaveOutcome::Updated(created.id()));

    let loaded = service.get_template(created.id()).unwrap().unwrap();
    assert_eq!(loaded.subject, "Hi {{name}}");
}

#[test]
fn resolve_template_defaults_to_first_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = TemplateService::new(SqliteTemplateRepository::new(&conn));
    service
        .save_template(None, &TemplateDraft::new("Announcement", "", ""))
        .unwrap();

    let picked = service.resolve_template(None).unwrap();
    assert_eq!(picked.name, "Announcement");
}

#[test]
fn resolve_template_reports_missing_and_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = TemplateService::new(SqliteTemplateRepository::new(&conn));

    assert!(matches!(
        service.resolve_template(Some(1234)),
        Err(TemplateServiceError::TemplateNotFound(1234))
    ));

    for template in service.list_templates().unwrap() {
        service.delete_template(template.id).unwrap();
    }
    assert!(matches!(
        service.resolve_template(None),
        Err(TemplateServiceError::NoTemplates)
    ));
}
