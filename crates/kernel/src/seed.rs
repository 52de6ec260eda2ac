//! Startup seeding from a JSON file of resources.

use std::path::Path;

use anyhow::{Context, Result};
use equipments_sdk::equipment::Resource;
use tracing::{info, warn};

use crate::extension::{ExtensionClient, ExtensionError};

/// Create every resource in `json`, a JSON array of equipment and groups.
///
/// Resources that already exist are skipped. Returns the number created.
pub async fn load(client: &ExtensionClient, json: &str) -> Result<usize> {
    let resources: Vec<Resource> =
        serde_json::from_str(json).context("seed data must be a JSON array of resources")?;

    let mut created = 0;
    for resource in resources {
        let kind = resource.kind();
        let name = resource.metadata().name.clone();
        let result = match resource {
            Resource::Equipment(e) => client.create(e).await.map(drop),
            Resource::EquipmentGroup(g) => client.create(g).await.map(drop),
        };
        match result {
            Ok(()) => created += 1,
            Err(ExtensionError::AlreadyExists { .. }) => {
                warn!(kind = %kind, name = %name, "seed resource already exists, skipping");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to seed {kind} \"{name}\""));
            }
        }
    }

    Ok(created)
}

/// Read a seed file and load it.
pub async fn load_file(client: &ExtensionClient, path: &Path) -> Result<usize> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let created = load(client, &json).await?;
    info!(path = %path.display(), created, "seeded resources");
    Ok(created)
}
