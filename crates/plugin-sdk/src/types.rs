//! Plugin manifest types.
//!
//! A plugin describes itself with a [`PluginDefinition`]: the console routes
//! it contributes, the permissions it declares, and the resource schemes it
//! registers. The kernel reads this value once at startup.

use serde::{Deserialize, Serialize};

use crate::extension::Scheme;

/// Everything a plugin contributes, returned by its registration function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginDefinition {
    /// Plugin machine name (e.g., "PluginEquipments").
    pub name: String,

    /// Console routes.
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,

    /// Permissions declared by the plugin.
    #[serde(default)]
    pub permissions: Vec<PermissionDefinition>,

    /// Resource schemes the plugin registers on start.
    #[serde(default)]
    pub schemes: Vec<Scheme>,
}

impl PluginDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
            permissions: Vec::new(),
            schemes: Vec::new(),
        }
    }

    pub fn route(mut self, route: RouteDefinition) -> Self {
        self.routes.push(route);
        self
    }

    pub fn permission(mut self, permission: PermissionDefinition) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.schemes.push(scheme);
        self
    }
}

/// A console route attached under a parent navigation node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    /// Name of the parent route (e.g., "Root").
    pub parent_name: String,
    pub route: Route,
}

impl RouteDefinition {
    pub fn new(parent_name: impl Into<String>, route: Route) -> Self {
        Self {
            parent_name: parent_name.into(),
            route,
        }
    }
}

/// The route itself: where it lives and what it mounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// URL path (e.g., "/equipments").
    pub path: String,
    /// Unique route name.
    pub name: String,
    /// Identifier of the view component mounted at this path.
    pub component: String,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component: component.into(),
            meta: RouteMeta::default(),
        }
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.meta.permissions.push(permission.into());
        self
    }

    pub fn menu(mut self, menu: MenuEntry) -> Self {
        self.meta.menu = Some(menu);
        self
    }
}

/// Route metadata read by the console shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteMeta {
    /// Permissions required to see the route (all must be granted).
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Navigation entry; routes without one are reachable but not listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuEntry>,
}

/// A navigation menu entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuEntry {
    /// Label shown in the navigation.
    pub name: String,
    /// Navigation group (e.g., "content").
    pub group: String,
    /// Icon identifier.
    pub icon: String,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, group: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            icon: icon.into(),
        }
    }
}

/// Permission definition declared by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionDefinition {
    pub name: String,
    pub description: String,
}

impl PermissionDefinition {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
