//! Data-bound forms.
//!
//! A form exposes a set of fields, binds them to a domain object, copies
//! submitted values onto it and reports every failure as a field-level
//! [`Violation`](crate::validation::Violation).

mod comment;

use std::collections::BTreeMap;

use serde::Serialize;

pub use comment::{CommentForm, CommentFormMode};

/// Field path used for failures that concern the whole form.
pub const FORM_ROOT: &str = "";

/// Message identifiers for failures raised by the form itself.
pub mod messages {
    pub const INVALID_TYPE: &str = "form.field.invalid_type";
    pub const EXTRA_FIELD: &str = "form.extra_field";
    pub const INVALID_PAYLOAD: &str = "form.invalid_payload";
    pub const ALREADY_SUBMITTED: &str = "form.already_submitted";
}

/// Widget used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Submit,
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Message identifier of the label.
    pub label: &'static str,
    pub required: bool,
}

impl FormField {
    pub const fn new(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            label,
            required: true,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether the field carries data (buttons do not).
    pub fn is_input(&self) -> bool {
        self.kind != FieldKind::Submit
    }
}

/// A field as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub field: FormField,
    pub value: Option<String>,
    pub errors: Vec<String>,
}

/// Render-ready snapshot of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub children: BTreeMap<&'static str, FieldView>,
    /// Errors not attached to any exposed field.
    pub errors: Vec<String>,
}

impl FormView {
    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn child(&self, name: &str) -> Option<&FieldView> {
        self.children.get(name)
    }
}
