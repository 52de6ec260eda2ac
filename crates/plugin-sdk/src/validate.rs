//! Field constraints applied when a resource is created or updated.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::equipment::{Equipment, EquipmentGroup};
use crate::extension::Metadata;

/// Maximum length of `metadata.name`.
pub const MAX_NAME_LENGTH: usize = 253;

/// Lowercase DNS-subdomain style names.
#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9.]*[a-z0-9])?$").expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static GROUP_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+$").expect("valid regex literal"));

/// A field that failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Resources that can check their own field constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Check `metadata.name` once the server has resolved it.
pub fn validate_metadata(metadata: &Metadata) -> Result<(), ValidationError> {
    let name = &metadata.name;
    if name.is_empty() {
        return Err(ValidationError::new("metadata.name", "must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(
            "metadata.name",
            format!("must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ValidationError::new(
            "metadata.name",
            "must consist of lowercase alphanumerics, '-' or '.', \
             and start and end with an alphanumeric",
        ));
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

impl Validate for Equipment {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_metadata(&self.metadata)?;
        require_text("spec.displayName", &self.spec.display_name)?;
        require_text("spec.url", &self.spec.url)?;
        if !GROUP_NAME_PATTERN.is_match(&self.spec.group_name) {
            return Err(ValidationError::new(
                "spec.groupName",
                "must be non-empty and contain no whitespace",
            ));
        }
        Ok(())
    }
}

impl Validate for EquipmentGroup {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_metadata(&self.metadata)?;
        require_text("spec.displayName", &self.spec.display_name)
    }
}
