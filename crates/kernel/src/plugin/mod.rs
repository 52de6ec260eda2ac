//! Plugin lifecycle.
//!
//! Starting a plugin registers the resource schemes it declares; stopping it
//! removes them again so the kernel stops serving those kinds.

use std::collections::BTreeMap;

use equipments_sdk::types::PluginDefinition;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use crate::extension::SchemeManager;

/// Errors that can occur while starting or stopping plugins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    #[error("plugin '{0}' is already started")]
    AlreadyStarted(String),

    #[error("plugin '{0}' is not started")]
    NotStarted(String),

    #[error("plugin '{plugin}': kind {kind} is already registered by another plugin")]
    SchemeConflict { plugin: String, kind: String },
}

/// Tracks started plugins and their schemes.
pub struct PluginManager {
    schemes: SchemeManager,
    started: RwLock<BTreeMap<String, PluginDefinition>>,
}

impl PluginManager {
    pub fn new(schemes: SchemeManager) -> Self {
        Self {
            schemes,
            started: RwLock::new(BTreeMap::new()),
        }
    }

    /// Start a plugin, registering its schemes.
    ///
    /// Nothing is registered if any of its kinds is already taken.
    pub fn start(&self, definition: PluginDefinition) -> Result<(), PluginError> {
        let mut started = self.started.write();
        if started.contains_key(&definition.name) {
            return Err(PluginError::AlreadyStarted(definition.name));
        }
        if let Some(taken) = definition
            .schemes
            .iter()
            .find(|s| self.schemes.is_registered(&s.kind))
        {
            return Err(PluginError::SchemeConflict {
                plugin: definition.name.clone(),
                kind: taken.kind.clone(),
            });
        }

        for scheme in &definition.schemes {
            self.schemes.register(scheme.clone());
        }
        info!(
            plugin = %definition.name,
            schemes = definition.schemes.len(),
            routes = definition.routes.len(),
            "plugin started"
        );
        started.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Stop a plugin, unregistering its schemes.
    pub fn stop(&self, name: &str) -> Result<PluginDefinition, PluginError> {
        let definition = self
            .started
            .write()
            .remove(name)
            .ok_or_else(|| PluginError::NotStarted(name.to_string()))?;

        for scheme in &definition.schemes {
            self.schemes.unregister(&scheme.kind);
        }
        info!(plugin = %name, "plugin stopped");
        Ok(definition)
    }

    /// Stop every started plugin.
    pub fn stop_all(&self) {
        for definition in self.started() {
            // Another caller may have stopped it in between.
            let _ = self.stop(&definition.name);
        }
    }

    /// Definitions of all started plugins, ordered by name.
    pub fn started(&self) -> Vec<PluginDefinition> {
        self.started.read().values().cloned().collect()
    }
}
