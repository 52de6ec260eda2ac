//! Equipments test utilities.
//!
//! Helpers for integration testing: resource builders, seed fixtures,
//! and assertion utilities for JSON and HTML responses.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use equipments_sdk::equipment::{Equipment, EquipmentGroup, EquipmentSpec};

/// Create a test equipment in `group` with default values.
///
/// The display name and URL are derived from `name`.
pub fn test_equipment(name: &str, group: &str) -> TestEquipment {
    TestEquipment {
        inner: Equipment::new(
            name,
            EquipmentSpec::new(
                format!("Equipment {name}"),
                format!("https://example.com/{name}"),
                group,
            ),
        ),
    }
}

/// Create a test equipment group with default values.
pub fn test_group(name: &str) -> TestGroup {
    TestGroup {
        inner: EquipmentGroup::new(name, format!("Group {name}")),
    }
}

/// Timestamp `seconds` after the unix epoch, for ordering fixtures.
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A test equipment builder.
#[derive(Debug, Clone)]
pub struct TestEquipment {
    inner: Equipment,
}

impl TestEquipment {
    /// Set the display name.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.inner.spec.display_name = display_name.to_string();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.inner.spec.description = Some(description.to_string());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.inner.spec.priority = Some(priority);
        self
    }

    /// Add a label.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.inner
            .metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Set the creation timestamp. The server overwrites this on create.
    pub fn created_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.inner.metadata.creation_timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Equipment {
        self.inner
    }

    /// JSON body suitable for a create request.
    pub fn json(self) -> serde_json::Value {
        serde_json::to_value(self.inner).unwrap_or_default()
    }
}

/// A test equipment group builder.
#[derive(Debug, Clone)]
pub struct TestGroup {
    inner: EquipmentGroup,
}

impl TestGroup {
    /// Set the display name.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.inner.spec.display_name = display_name.to_string();
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.inner.spec.priority = Some(priority);
        self
    }

    /// Add a label.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.inner
            .metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Set the creation timestamp. The server overwrites this on create.
    pub fn created_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.inner.metadata.creation_timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> EquipmentGroup {
        self.inner
    }

    /// JSON body suitable for a create request.
    pub fn json(self) -> serde_json::Value {
        serde_json::to_value(self.inner).unwrap_or_default()
    }
}

/// Assertion helpers for JSON and HTML content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a list envelope holds exactly `names`, in order.
    pub fn item_names(list: &Value, names: &[&str]) {
        let actual: Vec<&str> = list["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["metadata"]["name"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(actual, names, "unexpected items in list: {list}");
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }
}

/// Seed documents for loading a small catalogue.
pub mod fixtures {
    use serde_json::{Value, json};

    /// Two groups and three equipment, as accepted by the seed loader.
    pub fn catalogue() -> Value {
        json!([
            {
                "apiVersion": "core.halo.run/v1alpha1",
                "kind": "EquipmentGroup",
                "metadata": {"name": "cameras"},
                "spec": {"displayName": "Cameras", "priority": 0}
            },
            {
                "apiVersion": "core.halo.run/v1alpha1",
                "kind": "EquipmentGroup",
                "metadata": {"name": "drones"},
                "spec": {"displayName": "Drones", "priority": 1}
            },
            {
                "apiVersion": "core.halo.run/v1alpha1",
                "kind": "Equipment",
                "metadata": {"name": "x100v"},
                "spec": {
                    "displayName": "Fujifilm X100V",
                    "url": "https://example.com/x100v",
                    "groupName": "cameras"
                }
            },
            {
                "apiVersion": "core.halo.run/v1alpha1",
                "kind": "Equipment",
                "metadata": {"name": "mini-3"},
                "spec": {
                    "displayName": "DJI Mini 3",
                    "url": "https://example.com/mini-3",
                    "groupName": "drones"
                }
            },
            {
                "apiVersion": "core.halo.run/v1alpha1",
                "kind": "Equipment",
                "metadata": {"name": "avata"},
                "spec": {
                    "displayName": "DJI Avata",
                    "url": "https://example.com/avata",
                    "groupName": "drones"
                }
            }
        ])
    }
}
