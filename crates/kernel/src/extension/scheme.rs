//! Registry of resource kinds the kernel currently serves.
//!
//! Plugins register their schemes on start and remove them on stop. Client
//! operations on an unregistered kind fail with `SchemeNotFound`.

use std::collections::HashMap;
use std::sync::Arc;

use equipments_sdk::extension::Scheme;
use parking_lot::RwLock;
use tracing::{debug, warn};

/// Scheme registry, keyed by kind. Clone is cheap.
#[derive(Clone, Default)]
pub struct SchemeManager {
    schemes: Arc<RwLock<HashMap<String, Scheme>>>,
}

impl SchemeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheme. Returns `false` if the kind was already registered.
    pub fn register(&self, scheme: Scheme) -> bool {
        let mut schemes = self.schemes.write();
        if schemes.contains_key(&scheme.kind) {
            warn!(kind = %scheme.kind, "scheme already registered");
            return false;
        }
        debug!(kind = %scheme.kind, plural = %scheme.plural, "registered scheme");
        schemes.insert(scheme.kind.clone(), scheme);
        true
    }

    /// Remove a scheme by kind.
    pub fn unregister(&self, kind: &str) -> Option<Scheme> {
        let removed = self.schemes.write().remove(kind);
        if removed.is_some() {
            debug!(kind = %kind, "unregistered scheme");
        }
        removed
    }

    pub fn get(&self, kind: &str) -> Option<Scheme> {
        self.schemes.read().get(kind).cloned()
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.schemes.read().contains_key(kind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use equipments_sdk::equipment::{Equipment, EquipmentGroup};
    use equipments_sdk::extension::Extension;

    #[test]
    fn register_and_lookup() {
        let manager = SchemeManager::new();
        assert!(manager.register(Equipment::scheme()));
        assert!(!manager.register(Equipment::scheme()));

        assert!(manager.is_registered("Equipment"));
        assert_eq!(manager.get("Equipment").unwrap().plural, "equipments");
        assert!(manager.get("EquipmentGroup").is_none());
    }

    #[test]
    fn unregister_removes_kind() {
        let manager = SchemeManager::new();
        manager.register(Equipment::scheme());
        manager.register(EquipmentGroup::scheme());

        assert!(manager.unregister("Equipment").is_some());
        assert!(manager.unregister("Equipment").is_none());
        assert!(!manager.is_registered("Equipment"));
        assert!(manager.is_registered("EquipmentGroup"));
    }

    #[test]
    fn clones_share_state() {
        let manager = SchemeManager::new();
        let other = manager.clone();
        other.register(Equipment::scheme());
        assert!(manager.is_registered("Equipment"));
    }
}
