//! Contact form fields and validation.

use std::collections::BTreeMap;
use std::fmt;

use folio_types::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

/// The closed set of form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Key used in the relay template parameters.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Values typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the form with `field` replaced by `value`.
    pub fn update_field(mut self, field: FieldName, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldName, value: &str) {
        *self.field_mut(field) = value.to_string();
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Subject => &self.subject,
            FieldName::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Subject => &mut self.subject,
            FieldName::Message => &mut self.message,
        }
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Check required fields (trimmed) and the email shape.
    ///
    /// Fields are checked in form order so the first offending field is
    /// the one reported.
    pub fn validate(&self, require_subject: bool) -> Result<()> {
        for field in FieldName::ALL {
            let required = field != FieldName::Subject || require_subject;
            if required && self.get(field).trim().is_empty() {
                return Err(FolioError::Validation {
                    field: field.key(),
                    reason: "must not be empty".into(),
                });
            }
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(FolioError::Validation {
                field: FieldName::Email.key(),
                reason: format!("'{}' is not an email address", self.email.trim()),
            });
        }
        Ok(())
    }

    /// Template parameters handed to the relay. An empty optional
    /// subject is left out.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        FieldName::ALL
            .into_iter()
            .filter(|f| !(*f == FieldName::Subject && self.subject.trim().is_empty()))
            .map(|f| (f.key().to_string(), self.get(f).trim().to_string()))
            .collect()
    }
}

/// One `@` with something on both sides and no whitespace.
fn is_plausible_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !s.chars().any(char::is_whitespace)
        },
        _ => false,
    }
}
