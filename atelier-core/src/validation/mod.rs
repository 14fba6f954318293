//! Declarative form validation.
//!
//! Each request payload lists the constraints its fields must satisfy.
//! Services run [`Validate::validate`] before issuing a request and refuse to
//! send anything while a constraint fails.

mod requests;
mod upload;

pub use upload::{ImageUpload, MAX_IMAGE_BYTES, guess_content_type};

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Inclusive bounds.
    Range { min: f64, max: f64 },
    Positive,
    Email,
    /// The instant must lie after the time the rules were created at.
    FutureDate,
    /// The instant must lie strictly after `instant`, the value of `field`.
    After {
        field: &'static str,
        instant: DateTime<Utc>,
    },
}

/// Field name to failure messages, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", self.summary())]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn summary(&self) -> String {
        self.iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Collects constraint failures for one payload.
#[derive(Debug)]
pub struct Rules {
    now: DateTime<Utc>,
    errors: ValidationErrors,
}

impl Default for Rules {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Rules {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            errors: ValidationErrors::new(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// `Required` short-circuits the remaining text checks for blank input.
    pub fn text(
        &mut self,
        field: &str,
        value: &str,
        constraints: &[Constraint],
    ) -> &mut Self {
        let trimmed = value.trim();
        let length = trimmed.chars().count();
        for constraint in constraints {
            let failure = match constraint {
                Constraint::Required if trimmed.is_empty() => {
                    self.errors.add(field, "is required");
                    return self;
                }
                Constraint::MinLength(min) if length < *min => {
                    Some(format!("must be at least {min} characters"))
                }
                Constraint::MaxLength(max) if length > *max => {
                    Some(format!("must be at most {max} characters"))
                }
                Constraint::Email if !looks_like_email(trimmed) => {
                    Some("must be a valid email address".to_string())
                }
                _ => None,
            };
            if let Some(message) = failure {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// Absent or blank values pass; present values get the text checks.
    pub fn optional_text(
        &mut self,
        field: &str,
        value: Option<&str>,
        constraints: &[Constraint],
    ) -> &mut Self {
        match value {
            Some(value) if !value.trim().is_empty() => {
                self.text(field, value, constraints)
            }
            _ => self,
        }
    }

    pub fn number(
        &mut self,
        field: &str,
        value: f64,
        constraints: &[Constraint],
    ) -> &mut Self {
        for constraint in constraints {
            let failure = match constraint {
                _ if value.is_nan() => Some("must be a number".to_string()),
                Constraint::Range { min, max } if value < *min || value > *max => {
                    Some(format!("must be between {min} and {max}"))
                }
                Constraint::Positive if value <= 0.0 => {
                    Some("must be greater than zero".to_string())
                }
                _ => None,
            };
            if let Some(message) = failure {
                self.errors.add(field, message);
                if value.is_nan() {
                    break;
                }
            }
        }
        self
    }

    pub fn date(
        &mut self,
        field: &str,
        value: DateTime<Utc>,
        constraints: &[Constraint],
    ) -> &mut Self {
        for constraint in constraints {
            let failure = match constraint {
                Constraint::FutureDate if value <= self.now => {
                    Some("must be in the future".to_string())
                }
                Constraint::After { field: other, instant }
                    if value <= *instant =>
                {
                    Some(format!("must be after {other}"))
                }
                _ => None,
            };
            if let Some(message) = failure {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// Record a failure no single-field constraint expresses.
    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.add(field, message);
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Implemented by every payload the console sends.
pub trait Validate {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors>;

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_at(Utc::now())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => f.write_str("required"),
            Constraint::MinLength(n) => write!(f, "min length {n}"),
            Constraint::MaxLength(n) => write!(f, "max length {n}"),
            Constraint::Range { min, max } => write!(f, "{min}..={max}"),
            Constraint::Positive => f.write_str("positive"),
            Constraint::Email => f.write_str("email"),
            Constraint::FutureDate => f.write_str("future date"),
            Constraint::After { field, .. } => write!(f, "after {field}"),
        }
    }
}
