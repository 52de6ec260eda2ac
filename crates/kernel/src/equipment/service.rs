//! Equipment and group list services backing the plugin endpoints.

use std::collections::HashMap;

use equipments_sdk::equipment::{Equipment, EquipmentGroup, EquipmentGroupList, EquipmentList};
use equipments_sdk::extension::Extension;
use tracing::{debug, info};

use super::query::{EquipmentQuery, ListRequest};
use super::sorter::group_order;
use crate::extension::{ExtensionClient, ExtensionError};

/// Equipment list service.
#[derive(Clone)]
pub struct EquipmentService {
    client: ExtensionClient,
}

impl EquipmentService {
    pub fn new(client: ExtensionClient) -> Self {
        Self { client }
    }

    /// List equipment matching the query, sorted and paged.
    pub async fn list_equipment(&self, query: &EquipmentQuery) -> Result<EquipmentList, ExtensionError> {
        self.client
            .list_page(
                |e: &Equipment| query.matches(e),
                query.comparator(),
                query.list.page,
                query.list.size,
            )
            .await
    }
}

/// Equipment group service.
#[derive(Clone)]
pub struct EquipmentGroupService {
    client: ExtensionClient,
}

impl EquipmentGroupService {
    pub fn new(client: ExtensionClient) -> Self {
        Self { client }
    }

    /// List groups with `status.equipmentCount` filled in.
    pub async fn list_equipment_groups(
        &self,
        request: &ListRequest,
    ) -> Result<EquipmentGroupList, ExtensionError> {
        let counts = self.equipment_counts().await?;
        let page = self
            .client
            .list_page(
                |g: &EquipmentGroup| !g.metadata().is_deleted() && request.selectors.matches(g),
                group_order,
                request.page,
                request.size,
            )
            .await?;

        Ok(page.map(|mut group| {
            let count = counts.get(group.name()).copied().unwrap_or(0);
            group.status.equipment_count = count;
            group
        }))
    }

    /// Delete a group and every piece of equipment in it.
    pub async fn delete_equipment_group(&self, name: &str) -> Result<EquipmentGroup, ExtensionError> {
        // Fails with NotFound before anything is touched.
        self.client.get::<EquipmentGroup>(name).await?;

        let members: Vec<Equipment> = self
            .client
            .list(|e: &Equipment| e.spec.group_name == name, |_, _| std::cmp::Ordering::Equal)
            .await?;
        let mut removed = 0usize;
        for equipment in members {
            match self.client.delete::<Equipment>(equipment.name()).await {
                Ok(_) => removed += 1,
                // Already gone.
                Err(ExtensionError::NotFound { .. }) => {
                    debug!(name = %equipment.name(), "equipment already deleted");
                }
                Err(e) => return Err(e),
            }
        }

        // The group goes last so a failed cascade can be retried.
        let deleted: EquipmentGroup = self.client.delete(name).await?;
        info!(group = %name, equipment = removed, "deleted equipment group");
        Ok(deleted)
    }

    /// Number of live equipment per group name.
    async fn equipment_counts(&self) -> Result<HashMap<String, u32>, ExtensionError> {
        let equipment: Vec<Equipment> = self
            .client
            .list(|e: &Equipment| !e.metadata().is_deleted(), |_, _| std::cmp::Ordering::Equal)
            .await?;

        let mut counts = HashMap::new();
        for e in equipment {
            *counts.entry(e.spec.group_name).or_insert(0u32) += 1;
        }
        Ok(counts)
    }
}
