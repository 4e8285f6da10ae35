//! Template editor state.

use crate::model::template::{Template, TemplateDraft, TemplateId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateForm {
    current_id: Option<TemplateId>,
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl TemplateForm {
    pub fn current_id(&self) -> Option<TemplateId> {
        self.current_id
    }

    /// Starts a fresh template: no id, empty fields.
    pub fn new_template(&mut self) {
        *self = Self::default();
    }

    pub fn load(&mut self, template: &Template) {
        self.current_id = Some(template.id);
        self.name = template.name.clone();
        self.subject = template.subject.clone();
        self.body = template.body.clone();
    }

    /// Records the id assigned by a create so later saves update it.
    pub fn mark_saved(&mut self, id: TemplateId) {
        self.current_id = Some(id);
    }

    pub fn to_draft(&self) -> TemplateDraft {
        TemplateDraft::new(self.name.trim(), self.subject.trim(), self.body.trim())
    }
}
