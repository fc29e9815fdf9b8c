//! Error types for the FHIR model framework

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// `build()` rejected the staged values; carries every violation found.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A builder precondition failed (absent collection or absent element).
    #[error("caller contract violation on '{field}': {reason}")]
    CallerContract { field: String, reason: String },

    #[error("invalid {type_name} value '{value}': {reason}")]
    InvalidPrimitive {
        type_name: &'static str,
        value: String,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The aggregated violations, if this is a validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Validation(err) => &err.violations,
            _ => &[],
        }
    }
}

/// All violations found while building one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub node: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation names `field`.
    pub fn has_violation_for(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Violations naming `field`, in detection order.
    pub fn violations_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed validation with {} violation(s)",
            self.node,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A single rule violation at a field path such as `Claim.insurance[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub path: String,
    pub field: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViolationKind {
    MissingRequired,
    TooMany {
        max: u32,
        actual: usize,
    },
    ChoiceType {
        found: &'static str,
        allowed: Vec<&'static str>,
    },
    ReferenceTarget {
        reference: String,
        found: String,
        allowed: Vec<&'static str>,
    },
    UnknownResourceType {
        reference: String,
        found: String,
    },
    ReferenceTypeMismatch {
        reference: String,
        literal: String,
        declared: String,
    },
    InvalidPrimitive {
        message: String,
    },
    Empty,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::MissingRequired => f.write_str("missing required element"),
            ViolationKind::TooMany { max, actual } => {
                write!(f, "{} elements exceed the maximum of {}", actual, max)
            }
            ViolationKind::ChoiceType { found, allowed } => write!(
                f,
                "invalid type '{}' for choice element, must be one of: {}",
                found,
                allowed.join(", ")
            ),
            ViolationKind::ReferenceTarget {
                reference,
                found,
                allowed,
            } => write!(
                f,
                "resource type '{}' of reference '{}' must be one of: {}",
                found,
                reference,
                allowed.join(", ")
            ),
            ViolationKind::UnknownResourceType { reference, found } => write!(
                f,
                "'{}' in reference '{}' is not a valid resource type name",
                found, reference
            ),
            ViolationKind::ReferenceTypeMismatch {
                reference,
                literal,
                declared,
            } => write!(
                f,
                "resource type '{}' in reference '{}' does not match Reference.type '{}'",
                literal, reference, declared
            ),
            ViolationKind::InvalidPrimitive { message } => f.write_str(message),
            ViolationKind::Empty => {
                f.write_str("ele-1: All FHIR elements must have a @value or children")
            }
        }
    }
}
