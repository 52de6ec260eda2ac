//! Equipment and equipment group resources.
//!
//! The two kinds share [`Metadata`] but are distinct types: `kind` is a
//! single-variant enum per type, so a group body never decodes as an
//! equipment and vice versa. [`Resource`] covers the case where the kind is
//! only known at runtime and dispatches on it once.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::extension::{CORE_GROUP, CORE_VERSION, Extension, ListResult, Metadata};

/// `kind` discriminator for [`Equipment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    #[default]
    Equipment,
}

/// `kind` discriminator for [`EquipmentGroup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentGroupKind {
    #[default]
    EquipmentGroup,
}

/// A piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub api_version: String,
    pub kind: EquipmentKind,
    pub metadata: Metadata,
    pub spec: EquipmentSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSpec {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference link for the equipment.
    pub url: String,

    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    /// Name of the owning [`EquipmentGroup`].
    pub group_name: String,
}

impl Equipment {
    pub fn new(name: impl Into<String>, spec: EquipmentSpec) -> Self {
        Self {
            api_version: format!("{CORE_GROUP}/{CORE_VERSION}"),
            kind: EquipmentKind::Equipment,
            metadata: Metadata::named(name),
            spec,
        }
    }
}

impl EquipmentSpec {
    pub fn new(
        display_name: impl Into<String>,
        url: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: None,
            url: url.into(),
            cover: None,
            priority: None,
            group_name: group_name.into(),
        }
    }
}

impl Extension for Equipment {
    const KIND: &'static str = "Equipment";
    const PLURAL: &'static str = "equipments";
    const SINGULAR: &'static str = "equipment";

    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn set_api_version(&mut self, api_version: String) {
        self.api_version = api_version;
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// A named collection that equipment references by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentGroup {
    pub api_version: String,
    pub kind: EquipmentGroupKind,
    pub metadata: Metadata,
    pub spec: EquipmentGroupSpec,
    /// Server-computed; absent or null decodes as the default.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: EquipmentGroupStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentGroupSpec {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentGroupStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment_count: u32,
}

impl EquipmentGroup {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            api_version: format!("{CORE_GROUP}/{CORE_VERSION}"),
            kind: EquipmentGroupKind::EquipmentGroup,
            metadata: Metadata::named(name),
            spec: EquipmentGroupSpec {
                display_name: display_name.into(),
                priority: None,
            },
            status: EquipmentGroupStatus::default(),
        }
    }
}

impl Extension for EquipmentGroup {
    const KIND: &'static str = "EquipmentGroup";
    const PLURAL: &'static str = "equipmentgroups";
    const SINGULAR: &'static str = "equipmentgroup";

    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn set_api_version(&mut self, api_version: String) {
        self.api_version = api_version;
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// Paged equipment list.
pub type EquipmentList = ListResult<Equipment>;

/// Paged equipment group list.
pub type EquipmentGroupList = ListResult<EquipmentGroup>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors decoding a [`Resource`] whose kind is only known at runtime.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource has no kind")]
    MissingKind,

    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("invalid {kind}: {source}")]
    Invalid {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Either resource kind, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Resource {
    Equipment(Equipment),
    EquipmentGroup(EquipmentGroup),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Equipment(_) => Equipment::KIND,
            Self::EquipmentGroup(_) => EquipmentGroup::KIND,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Equipment(e) => &e.metadata,
            Self::EquipmentGroup(g) => &g.metadata,
        }
    }
}

impl TryFrom<serde_json::Value> for Resource {
    type Error = ResourceError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .ok_or(ResourceError::MissingKind)?
            .to_string();

        if kind == Equipment::KIND {
            serde_json::from_value(value)
                .map(Self::Equipment)
                .map_err(|source| ResourceError::Invalid {
                    kind: Equipment::KIND,
                    source,
                })
        } else if kind == EquipmentGroup::KIND {
            serde_json::from_value(value)
                .map(Self::EquipmentGroup)
                .map_err(|source| ResourceError::Invalid {
                    kind: EquipmentGroup::KIND,
                    source,
                })
        } else {
            Err(ResourceError::UnknownKind(kind))
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Equipment(e) => e.serialize(serializer),
            Self::EquipmentGroup(g) => g.serialize(serializer),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drone() -> serde_json::Value {
        json!({
            "spec": {"displayName": "Drone", "url": "https://x", "groupName": "drones"},
            "apiVersion": "v1",
            "kind": "Equipment",
            "metadata": {"name": "item-1"}
        })
    }

    #[test]
    fn documented_equipment_decodes() {
        let equipment: Equipment = serde_json::from_value(drone()).unwrap();
        assert_eq!(equipment.metadata.name, "item-1");
        assert_eq!(equipment.spec.group_name, "drones");
        assert!(equipment.spec.cover.is_none());
    }

    #[test]
    fn equipment_without_url_is_rejected() {
        let mut value = drone();
        value["spec"].as_object_mut().unwrap().remove("url");
        assert!(serde_json::from_value::<Equipment>(value).is_err());
    }

    #[test]
    fn equipment_without_group_is_rejected() {
        let mut value = drone();
        value["spec"].as_object_mut().unwrap().remove("groupName");
        assert!(serde_json::from_value::<Equipment>(value).is_err());
    }

    #[test]
    fn group_body_does_not_decode_as_equipment() {
        let mut value = drone();
        value["kind"] = json!("EquipmentGroup");
        assert!(serde_json::from_value::<Equipment>(value).is_err());
    }

    #[test]
    fn group_status_defaults_when_absent_or_null() {
        let absent: EquipmentGroup = serde_json::from_value(json!({
            "apiVersion": "core.halo.run/v1alpha1",
            "kind": "EquipmentGroup",
            "metadata": {"name": "drones"},
            "spec": {"displayName": "Drones"}
        }))
        .unwrap();
        assert_eq!(absent.status.equipment_count, 0);

        let null: EquipmentGroup = serde_json::from_value(json!({
            "apiVersion": "core.halo.run/v1alpha1",
            "kind": "EquipmentGroup",
            "metadata": {"name": "drones"},
            "spec": {"displayName": "Drones"},
            "status": {"equipmentCount": null}
        }))
        .unwrap();
        assert_eq!(null.status.equipment_count, 0);
    }

    #[test]
    fn negative_equipment_count_is_rejected() {
        let result = serde_json::from_value::<EquipmentGroup>(json!({
            "apiVersion": "core.halo.run/v1alpha1",
            "kind": "EquipmentGroup",
            "metadata": {"name": "drones"},
            "spec": {"displayName": "Drones"},
            "status": {"equipmentCount": -1}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn resource_dispatches_on_kind() {
        let resource: Resource = serde_json::from_value(drone()).unwrap();
        assert_eq!(resource.kind(), "Equipment");
        assert_eq!(resource.metadata().name, "item-1");

        let group: Resource = serde_json::from_value(
            serde_json::to_value(EquipmentGroup::new("drones", "Drones")).unwrap(),
        )
        .unwrap();
        assert!(matches!(group, Resource::EquipmentGroup(_)));
    }

    #[test]
    fn resource_rejects_unknown_kind() {
        let mut value = drone();
        value["kind"] = json!("Gadget");
        let err = Resource::try_from(value).unwrap_err();
        assert!(matches!(err, ResourceError::UnknownKind(ref k) if k == "Gadget"));
    }

    #[test]
    fn resource_serializes_as_inner_value() {
        let resource = Resource::Equipment(serde_json::from_value(drone()).unwrap());
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["kind"], "Equipment");
        assert_eq!(json["spec"]["displayName"], "Drone");
    }

    #[test]
    fn equipment_list_envelope_decodes() {
        let list: EquipmentList = serde_json::from_value(json!({
            "page": 1, "size": 10, "total": 1, "totalPages": 1,
            "items": [drone()],
            "first": true, "last": true, "hasNext": false, "hasPrevious": false
        }))
        .unwrap();
        assert_eq!(list.items.len(), 1);
        assert!(list.first && list.last);
    }
}
