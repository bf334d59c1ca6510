//! Form for creating and editing comments.

use serde::Serialize;
use serde_json::Value;

use super::{FORM_ROOT, FieldKind, FieldView, FormField, FormView, messages};
use crate::domain::{Comment, Post};
use crate::validation::{
    AuthorGroup, ValidationGroup, Violations, fields, validate_comment_in_group,
};

const CONTENT: FormField =
    FormField::new(fields::CONTENT, FieldKind::Textarea, "form.comment.content");
const SAVE: FormField = FormField::new("save", FieldKind::Submit, "form.comment.submit").optional();
const AUTHOR_NAME: FormField = FormField::new(
    fields::UNREGISTERED_AUTHOR_NAME,
    FieldKind::Text,
    "form.comment.author_name",
);
const AUTHOR_EMAIL: FormField = FormField::new(
    fields::UNREGISTERED_AUTHOR_EMAIL,
    FieldKind::Email,
    "form.comment.author_email",
)
.optional();

/// Configuration picked once, from the comment the form is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentFormMode {
    /// No registered author: the guest name and email are asked for.
    Guest,
    /// A registered author is bound: only the content is asked for.
    Registered,
}

impl CommentFormMode {
    pub fn for_comment(comment: &Comment) -> Self {
        match AuthorGroup::for_comment(comment) {
            AuthorGroup::Registered => CommentFormMode::Registered,
            AuthorGroup::Unregistered => CommentFormMode::Guest,
        }
    }
}

/// A comment form bound to a [`Comment`].
///
/// ```ignore
/// let mut form = CommentForm::new(blog.comment_mut(id).unwrap());
/// form.submit(&json!({ "content": "Nice article!" }));
/// if form.is_valid() { /* persist */ }
/// ```
#[derive(Debug)]
pub struct CommentForm<'a> {
    comment: &'a mut Comment,
    fields: Vec<FormField>,
    mode: CommentFormMode,
    submitted: bool,
    synchronized: bool,
    errors: Violations,
}

impl<'a> CommentForm<'a> {
    pub fn new(comment: &'a mut Comment) -> Self {
        let mut form = Self {
            comment,
            fields: vec![CONTENT, SAVE],
            mode: CommentFormMode::Registered,
            submitted: false,
            synchronized: true,
            errors: Violations::new(),
        };
        form.preset_data();
        form
    }

    /// Adjust the field set to the bound data. Runs once, before any input.
    fn preset_data(&mut self) {
        self.mode = CommentFormMode::for_comment(&*self.comment);
        if self.mode == CommentFormMode::Guest {
            self.fields.push(AUTHOR_NAME);
            self.fields.push(AUTHOR_EMAIL);
        }
    }

    pub fn mode(&self) -> CommentFormMode {
        self.mode
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Group used to validate the author, read from the bound comment.
    pub fn validation_group(&self) -> ValidationGroup {
        AuthorGroup::for_comment(&*self.comment).group()
    }

    pub fn data(&self) -> &Comment {
        &*self.comment
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// `false` once a submitted value could not be converted for its field.
    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    pub fn is_valid(&self) -> bool {
        self.submitted && self.synchronized && self.errors.is_empty()
    }

    pub fn errors(&self) -> &Violations {
        &self.errors
    }

    /// Copy `data` onto the bound comment and validate it.
    ///
    /// Fields missing from `data` are cleared. Values that cannot be read as
    /// text leave the bound value untouched and mark the form as not
    /// synchronized.
    pub fn submit(&mut self, data: &Value) -> &Violations {
        if self.submitted {
            self.errors.add(FORM_ROOT, messages::ALREADY_SUBMITTED);
            return &self.errors;
        }
        self.submitted = true;

        let Some(input) = data.as_object() else {
            self.synchronized = false;
            self.errors.add(FORM_ROOT, messages::INVALID_PAYLOAD);
            return &self.errors;
        };

        for key in input.keys() {
            if !self.has_field(key) {
                self.errors.add(key.as_str(), messages::EXTRA_FIELD);
            }
        }

        let inputs: Vec<FormField> = self
            .fields
            .iter()
            .copied()
            .filter(FormField::is_input)
            .collect();
        for field in inputs {
            match read_text(input.get(field.name)) {
                Ok(value) => self.apply(field.name, value),
                Err(()) => {
                    self.synchronized = false;
                    self.errors.add(field.name, messages::INVALID_TYPE);
                }
            }
        }

        let group = AuthorGroup::for_comment(&*self.comment);
        if let Err(violations) = validate_comment_in_group(&*self.comment, group) {
            self.errors.extend(violations);
        }
        &self.errors
    }

    fn apply(&mut self, name: &str, value: Option<String>) {
        match name {
            fields::CONTENT => self.comment.set_content(value.unwrap_or_default()),
            fields::UNREGISTERED_AUTHOR_NAME => self.comment.set_unregistered_author_name(value),
            fields::UNREGISTERED_AUTHOR_EMAIL => self.comment.set_unregistered_author_email(value),
            _ => {}
        }
    }

    fn value_of(&self, name: &str) -> Option<String> {
        match name {
            fields::CONTENT => Some(self.comment.content().to_string()),
            fields::UNREGISTERED_AUTHOR_NAME => {
                self.comment.unregistered_author_name().map(str::to_string)
            }
            fields::UNREGISTERED_AUTHOR_EMAIL => {
                self.comment.unregistered_author_email().map(str::to_string)
            }
            _ => None,
        }
    }

    pub fn view(&self) -> FormView {
        let mut view = FormView::default();
        for field in &self.fields {
            view.children.insert(
                field.name,
                FieldView {
                    field: *field,
                    value: self.value_of(field.name),
                    errors: self.errors.for_field(field.name).map(str::to_string).collect(),
                },
            );
        }
        view.errors = self
            .errors
            .iter()
            .filter(|v| !self.has_field(&v.field))
            .map(|v| v.message.clone())
            .collect();
        view
    }
}

/// Read a submitted scalar as trimmed text; empty text reads as `None`.
fn read_text(value: Option<&Value>) -> Result<Option<String>, ()> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => return Err(()),
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}
