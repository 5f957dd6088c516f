//! Request validation.
//!
//! Every request struct exposes `validate()`, which checks all of its
//! field constraints in one pass and reports every violation at once
//! rather than failing on the first. Services call it before touching
//! the repository or the cache.

use std::fmt;

use serde::Serialize;

/// A single failed field constraint.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Collector for field violations.
///
/// Constraint helpers append to the collector; `finish()` turns the
/// accumulated set into a `Result` once every field has been checked.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Value must be non-empty after trimming.
    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "must not be empty");
        }
    }

    /// Length bounds, checked only when the value is non-empty so an empty
    /// required field is not reported twice.
    pub fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        if value.is_empty() {
            return;
        }
        if value.len() < min {
            self.add(field, format!("must be at least {min} characters"));
        } else if value.len() > max {
            self.add(field, format!("must be at most {max} characters"));
        }
    }

    /// Value must parse as an absolute URL. Empty values are skipped.
    pub fn url(&mut self, field: &'static str, value: &str) {
        if !value.is_empty() && url::Url::parse(value).is_err() {
            self.add(field, "must be a valid URL");
        }
    }

    /// Minimal email shape check: one `@` with non-empty local part and a
    /// domain containing a dot. Empty values are skipped.
    pub fn email(&mut self, field: &'static str, value: &str) {
        if value.is_empty() {
            return;
        }
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }
            None => false,
        };
        if !valid {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn finish(self) -> Result<(), Violations> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}
