//! Structural checks for incoming write requests.

use std::fmt;
use thiserror::Error;

use crate::api::{CreateCategoryRequest, UpdateCategoryRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
}

/// Every rule that failed, in the order the fields were checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", describe(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.rule))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has(&self, field: &str, rule: Rule) -> bool {
        self.errors.iter().any(|e| e.field == field && e.rule == rule)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    /// Present and non-empty; whitespace counts as content
    fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.errors.push(FieldError {
                field,
                rule: Rule::Required,
            });
        }
        self
    }

    fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

fn check_name(name: &str) -> Result<(), ValidationErrors> {
    Checker::default().required("name", name).finish()
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check_name(&self.name)
    }
}

impl Validate for UpdateCategoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str) -> UpdateCategoryRequest {
        UpdateCategoryRequest {
            id: 1,
            name: name.to_string(),
        }
    }

    #[test]
    fn accepts_plain_name() {
        assert!(update("Gadget").validate().is_ok());
        assert!(CreateCategoryRequest {
            name: "Fashion".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let err = update("").validate().unwrap_err();
        assert_eq!(
            err.errors(),
            &[FieldError {
                field: "name",
                rule: Rule::Required
            }]
        );
    }

    #[test]
    fn accepts_whitespace_and_long_names() {
        for name in [" ", "   ", "\t"] {
            assert!(update(name).validate().is_ok(), "rejected {:?}", name);
        }
        assert!(update(&"x".repeat(1_000)).validate().is_ok());
    }

    #[test]
    fn message_lists_failed_rules() {
        let err = CreateCategoryRequest {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        assert!(err.has("name", Rule::Required));
        assert_eq!(err.to_string(), "validation failed: name (required)");
    }
}
