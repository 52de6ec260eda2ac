//! Equipments plugin.
//!
//! Registers the "My Equipment" console page and the two resource kinds it
//! manages. The kernel calls [`define_plugin`] once at startup.

use equipments_sdk::prelude::*;

/// Plugin machine name, also used in the custom endpoint paths.
pub const PLUGIN_NAME: &str = "PluginEquipments";

/// Permission required to see the equipment list.
pub const VIEW_PERMISSION: &str = "plugin:equipments:view";

/// Permission required to create, edit or delete equipment.
pub const MANAGE_PERMISSION: &str = "plugin:equipments:manage";

/// Component id of the console list view.
pub const LIST_COMPONENT: &str = "EquipmentList";

/// Complete plugin definition.
pub fn define_plugin() -> PluginDefinition {
    let definition = PluginDefinition::new(PLUGIN_NAME);
    let definition = routes().into_iter().fold(definition, PluginDefinition::route);
    let definition = perm()
        .into_iter()
        .fold(definition, PluginDefinition::permission);
    schemes()
        .into_iter()
        .fold(definition, PluginDefinition::scheme)
}

/// Console routes provided by the plugin.
pub fn routes() -> Vec<RouteDefinition> {
    vec![RouteDefinition::new(
        "Root",
        Route::new("/equipments", "Equipments", LIST_COMPONENT)
            .permission(VIEW_PERMISSION)
            .menu(MenuEntry::new("我的装备", "content", "computer")),
    )]
}

/// Permissions provided by the plugin.
pub fn perm() -> Vec<PermissionDefinition> {
    vec![
        PermissionDefinition::new(VIEW_PERMISSION, "View equipment"),
        PermissionDefinition::new(MANAGE_PERMISSION, "Manage equipment and groups"),
    ]
}

/// Resource schemes registered while the plugin is started.
pub fn schemes() -> Vec<Scheme> {
    vec![Equipment::scheme(), EquipmentGroup::scheme()]
}
