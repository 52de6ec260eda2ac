//! Resource storage abstraction layer.
//!
//! All resource reads/writes go through [`ExtensionClient`], which speaks
//! typed [`Extension`](equipments_sdk::extension::Extension) values and
//! delegates persistence to an [`ExtensionStore`]. Stores only see JSON
//! documents keyed by `(kind, name)`; versioning, timestamps, name
//! generation and validation live in the client so every store behaves the
//! same way.
//!
//! # Implementations
//!
//! - [`MemoryExtensionStore`] - in-process, used when no database is
//!   configured and in tests.
//! - [`PgExtensionStore`] - PostgreSQL, one JSONB row per resource.

mod client;
mod memory;
mod postgres;
mod scheme;
pub mod selector;

use anyhow::Result;
use async_trait::async_trait;
use equipments_sdk::validate::ValidationError;
use serde_json::Value;
use thiserror::Error;

pub use client::ExtensionClient;
pub use memory::MemoryExtensionStore;
pub use postgres::PgExtensionStore;
pub use scheme::SchemeManager;
pub use selector::{FieldRequirement, LabelRequirement, SelectorError, Selectors};

/// Errors returned by [`ExtensionClient`].
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: String, name: String },

    #[error("{kind} \"{name}\" already exists")]
    AlreadyExists { kind: String, name: String },

    #[error("{kind} \"{name}\" was modified by someone else; reload and retry")]
    Conflict { kind: String, name: String },

    #[error("no scheme registered for kind {0}")]
    SchemeNotFound(String),

    #[error("invalid resource: {0}")]
    Invalid(#[from] ValidationError),

    #[error("failed to encode or decode resource: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ExtensionError {
    pub(crate) fn not_found(kind: &str, name: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

/// Raw document storage for resources.
///
/// Keep the interface small: anything kind-aware belongs in
/// [`ExtensionClient`], not here.
#[async_trait]
pub trait ExtensionStore: Send + Sync {
    /// Load a single document. Returns `None` if it doesn't exist.
    async fn load(&self, kind: &str, name: &str) -> Result<Option<Value>>;

    /// List all documents of a kind, ordered by name.
    async fn list(&self, kind: &str) -> Result<Vec<Value>>;

    /// Insert a new document.
    ///
    /// Returns `false` if a document with that name already exists.
    async fn insert(&self, kind: &str, name: &str, value: Value) -> Result<bool>;

    /// Replace a document if its stored version equals `expected_version`.
    ///
    /// Returns `false` if the document is missing or the version differs.
    async fn replace(
        &self,
        kind: &str,
        name: &str,
        expected_version: i64,
        value: Value,
    ) -> Result<bool>;

    /// Remove a document. Returns `true` if one was removed.
    async fn remove(&self, kind: &str, name: &str) -> Result<bool>;

    /// Check if the backing storage is reachable.
    async fn healthy(&self) -> bool;
}

/// Read `metadata.version` from a stored document.
pub(crate) fn document_version(value: &Value) -> Option<i64> {
    value
        .get("metadata")
        .and_then(|m| m.get("version"))
        .and_then(Value::as_i64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn document_version_reads_metadata() {
        let doc = serde_json::json!({"metadata": {"name": "a", "version": 3}});
        assert_eq!(document_version(&doc), Some(3));
        assert_eq!(document_version(&serde_json::json!({"metadata": {}})), None);
    }

    #[test]
    fn error_messages_name_the_resource() {
        let err = ExtensionError::not_found("Equipment", "camera");
        assert_eq!(err.to_string(), "Equipment \"camera\" not found");
        assert_eq!(
            ExtensionError::SchemeNotFound("Gadget".into()).to_string(),
            "no scheme registered for kind Gadget"
        );
    }
}
