//! In-process implementation of ExtensionStore.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

use super::{ExtensionStore, document_version};

/// DashMap-backed store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryExtensionStore {
    documents: DashMap<(String, String), Value>,
}

impl MemoryExtensionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(kind: &str, name: &str) -> (String, String) {
    (kind.to_string(), name.to_string())
}

#[async_trait]
impl ExtensionStore for MemoryExtensionStore {
    async fn load(&self, kind: &str, name: &str) -> Result<Option<Value>> {
        Ok(self
            .documents
            .get(&key(kind, name))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self, kind: &str) -> Result<Vec<Value>> {
        let mut documents: Vec<(String, Value)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == kind)
            .map(|entry| (entry.key().1.clone(), entry.value().clone()))
            .collect();
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents.into_iter().map(|(_, value)| value).collect())
    }

    async fn insert(&self, kind: &str, name: &str, value: Value) -> Result<bool> {
        match self.documents.entry(key(kind, name)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
        }
    }

    async fn replace(
        &self,
        kind: &str,
        name: &str,
        expected_version: i64,
        value: Value,
    ) -> Result<bool> {
        match self.documents.entry(key(kind, name)) {
            Entry::Occupied(mut slot) => {
                if document_version(slot.get()) != Some(expected_version) {
                    return Ok(false);
                }
                slot.insert(value);
                Ok(true)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn remove(&self, kind: &str, name: &str) -> Result<bool> {
        Ok(self.documents.remove(&key(kind, name)).is_some())
    }

    async fn healthy(&self) -> bool {
        true
    }
}
