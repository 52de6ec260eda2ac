//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::equipment::{EquipmentFinder, EquipmentGroupService, EquipmentService};
use crate::extension::{
    ExtensionClient, ExtensionStore, MemoryExtensionStore, PgExtensionStore, SchemeManager,
};
use crate::menu::RouteRegistry;
use crate::plugin::PluginManager;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Extension client; all resource reads/writes go through it.
    client: ExtensionClient,

    /// Started plugins.
    plugins: PluginManager,

    /// Console routes declared by started plugins.
    routes: Arc<RouteRegistry>,

    equipments: EquipmentService,
    equipment_groups: EquipmentGroupService,
    finder: EquipmentFinder,

    /// Template engine for theme pages.
    theme: Arc<ThemeEngine>,
}

impl AppState {
    /// Create application state, connecting to PostgreSQL when configured.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn ExtensionStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;
                let store = PgExtensionStore::new(pool);
                store
                    .migrate()
                    .await
                    .context("failed to run migrations")?;
                info!("using PostgreSQL extension store");
                Arc::new(store)
            }
            None => {
                info!("DATABASE_URL not set, using in-memory extension store");
                Arc::new(MemoryExtensionStore::new())
            }
        };

        Self::with_store(config.clone(), store)
    }

    /// Create application state over an existing store.
    ///
    /// Starts the equipments plugin and builds the route registry.
    pub fn with_store(config: Config, store: Arc<dyn ExtensionStore>) -> Result<Self> {
        let schemes = SchemeManager::new();
        let client = ExtensionClient::new(store, schemes.clone());

        let plugins = PluginManager::new(schemes);
        plugins
            .start(equipments::define_plugin())
            .context("failed to start equipments plugin")?;

        let routes = RouteRegistry::from_plugins(&plugins.started())
            .context("failed to register plugin routes")?;
        info!(routes = routes.len(), "route registry ready");

        let theme = ThemeEngine::new(config.templates_dir.as_deref())
            .context("failed to initialize theme engine")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                equipments: EquipmentService::new(client.clone()),
                equipment_groups: EquipmentGroupService::new(client.clone()),
                finder: EquipmentFinder::new(client.clone()),
                config,
                client,
                plugins,
                routes: Arc::new(routes),
                theme: Arc::new(theme),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the extension client.
    pub fn client(&self) -> &ExtensionClient {
        &self.inner.client
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.inner.plugins
    }

    /// Get the route registry.
    pub fn routes(&self) -> &Arc<RouteRegistry> {
        &self.inner.routes
    }

    pub fn equipments(&self) -> &EquipmentService {
        &self.inner.equipments
    }

    pub fn equipment_groups(&self) -> &EquipmentGroupService {
        &self.inner.equipment_groups
    }

    /// Get the theme-facing equipment finder.
    pub fn finder(&self) -> &EquipmentFinder {
        &self.inner.finder
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &Arc<ThemeEngine> {
        &self.inner.theme
    }

    /// Check if the extension store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.client.store().healthy().await
    }
}
