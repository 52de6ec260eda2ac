//! Read-only equipment queries for theme templates.

use equipments_sdk::equipment::{
    Equipment, EquipmentGroup, EquipmentGroupSpec, EquipmentGroupStatus, EquipmentSpec,
};
use equipments_sdk::extension::{Extension, ListResult, Metadata};
use serde::Serialize;

use super::sorter::{default_equipment_order, group_order};
use crate::extension::{ExtensionClient, ExtensionError};

/// Page used when the caller gives none.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Equipment as exposed to templates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipmentVo {
    pub metadata: Metadata,
    pub spec: EquipmentSpec,
}

impl From<Equipment> for EquipmentVo {
    fn from(equipment: Equipment) -> Self {
        Self {
            metadata: equipment.metadata,
            spec: equipment.spec,
        }
    }
}

/// A group with its equipment, as exposed to templates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipmentGroupVo {
    pub metadata: Metadata,
    pub spec: EquipmentGroupSpec,
    pub status: EquipmentGroupStatus,
    pub equipments: Vec<EquipmentVo>,
}

impl EquipmentGroupVo {
    fn new(group: EquipmentGroup, equipments: Vec<EquipmentVo>) -> Self {
        let status = EquipmentGroupStatus {
            equipment_count: u32::try_from(equipments.len()).unwrap_or(u32::MAX),
        };
        Self {
            metadata: group.metadata,
            spec: group.spec,
            status,
            equipments,
        }
    }
}

/// Equipment finder.
#[derive(Clone)]
pub struct EquipmentFinder {
    client: ExtensionClient,
}

impl EquipmentFinder {
    pub fn new(client: ExtensionClient) -> Self {
        Self { client }
    }

    /// All equipment in display order.
    pub async fn list_all(&self) -> Result<Vec<EquipmentVo>, ExtensionError> {
        self.equipment_where(|_| true).await
    }

    /// One page of equipment, optionally limited to a group.
    pub async fn list(
        &self,
        page: Option<u32>,
        size: Option<u32>,
        group: Option<&str>,
    ) -> Result<ListResult<EquipmentVo>, ExtensionError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        let result = self
            .client
            .list_page(
                |e: &Equipment| {
                    !e.metadata().is_deleted() && group.is_none_or(|g| e.spec.group_name == g)
                },
                default_equipment_order,
                page,
                size,
            )
            .await?;
        Ok(result.map(EquipmentVo::from))
    }

    /// Equipment of one group in display order.
    pub async fn list_by(&self, group: &str) -> Result<Vec<EquipmentVo>, ExtensionError> {
        self.equipment_where(|e| e.spec.group_name == group).await
    }

    /// Every group with its equipment.
    pub async fn group_by(&self) -> Result<Vec<EquipmentGroupVo>, ExtensionError> {
        let groups: Vec<EquipmentGroup> = self
            .client
            .list(|g: &EquipmentGroup| !g.metadata().is_deleted(), group_order)
            .await?;
        let mut equipment = self.list_all().await?;

        let mut result = Vec::with_capacity(groups.len());
        for group in groups {
            let (members, rest): (Vec<_>, Vec<_>) = equipment
                .into_iter()
                .partition(|e| e.spec.group_name == group.metadata.name);
            equipment = rest;
            result.push(EquipmentGroupVo::new(group, members));
        }
        Ok(result)
    }

    async fn equipment_where(
        &self,
        predicate: impl Fn(&Equipment) -> bool,
    ) -> Result<Vec<EquipmentVo>, ExtensionError> {
        let items = self
            .client
            .list(
                |e: &Equipment| !e.metadata().is_deleted() && predicate(e),
                default_equipment_order,
            )
            .await?;
        Ok(items.into_iter().map(EquipmentVo::from).collect())
    }
}
