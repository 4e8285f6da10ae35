//! Template use-case service.

use crate::model::template::{Template, TemplateDraft, TemplateId};
use crate::repo::template_repo::TemplateRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::SaveOutcome;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while picking a template for an outgoing email.
#[derive(Debug)]
pub enum TemplateServiceError {
    /// The store holds no templates at all.
    NoTemplates,
    /// An explicit template id does not exist.
    TemplateNotFound(TemplateId),
    Repo(RepoError),
}

impl Display for TemplateServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTemplates => write!(f, "no templates; create a template first"),
            Self::TemplateNotFound(id) => write!(f, "template not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TemplateServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TemplateServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::TemplateNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for template CRUD and selection.
pub struct TemplateService<R: TemplateRepository> {
    repo: R,
}

impl<R: TemplateRepository> TemplateService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a template when `id` is `None`, otherwise replaces it.
    pub fn save_template(
        &self,
        id: Option<TemplateId>,
        draft: &TemplateDraft,
    ) -> RepoResult<SaveOutcome> {
        let outcome = match id {
            Some(id) => {
                self.repo.update_template(id, draft)?;
                SaveOutcome::Updated(id)
            }
            None => SaveOutcome::Created(self.repo.create_template(draft)?),
        };

        info!(
            "event=template_save module=service status=ok action={} template_id={}",
            if outcome.is_created() { "create" } else { "update" },
            outcome.id()
        );
        Ok(outcome)
    }

    pub fn get_template(&self, id: TemplateId) -> RepoResult<Option<Template>> {
        self.repo.get_template(id)
    }

    /// Lists templates sorted by name.
    pub fn list_templates(&self) -> RepoResult<Vec<Template>> {
        self.repo.list_templates()
    }

    pub fn delete_template(&self, id: TemplateId) -> RepoResult<()> {
        self.repo.delete_template(id)?;
        info!("event=template_delete module=service status=ok template_id={id}");
        Ok(())
    }

    /// Picks the template for an outgoing email.
    ///
    /// An explicit id must exist. Without one, the first template by name
    /// is used.
    pub fn resolve_template(
        &self,
        id: Option<TemplateId>,
    ) -> Result<Template, TemplateServiceError> {
        match id {
            Some(id) => self
                .repo
                .get_template(id)?
                .ok_or(TemplateServiceError::TemplateNotFound(id)),
            None => self
                .repo
                .list_templates()?
                .into_iter()
                .next()
                .ok_or(TemplateServiceError::NoTemplates),
        }
    }
}
