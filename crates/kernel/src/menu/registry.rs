//! Route registry - collects console routes declared by plugins.
//!
//! Each plugin returns a [`PluginDefinition`] whose routes are registered
//! here at startup. Route names and paths must be unique across all plugins.

use std::collections::HashMap;

use equipments_sdk::types::{PluginDefinition, Route, RouteDefinition};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Conflicts detected while registering routes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("route name \"{name}\" from plugin {plugin} is already registered by {existing}")]
    DuplicateName {
        name: String,
        plugin: String,
        existing: String,
    },

    #[error("route path \"{path}\" from plugin {plugin} is already registered by {existing}")]
    DuplicatePath {
        path: String,
        plugin: String,
        existing: String,
    },
}

/// A route together with the plugin that declared it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredRoute {
    pub plugin: String,
    pub parent_name: String,
    pub route: Route,
}

/// Navigation entry derived from a route's menu metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub group: String,
    pub icon: String,
    pub path: String,
    pub route_name: String,
    pub permissions: Vec<String>,
}

/// Result of matching a path against registered routes.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMatch {
    /// The matched route.
    pub route: RegisteredRoute,
    /// Path parameters extracted (e.g., {"name": "camera"})
    pub params: HashMap<String, String>,
}

/// Registry of all console routes from plugins.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    /// Routes indexed by route name
    routes: HashMap<String, RegisteredRoute>,
    /// Path -> route name
    paths: HashMap<String, String>,
    /// Route patterns for matching, most specific first
    patterns: Vec<String>,
}

impl RouteRegistry {
    /// Create an empty route registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from plugin definitions.
    pub fn from_plugins(plugins: &[PluginDefinition]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for plugin in plugins {
            for definition in &plugin.routes {
                registry.register(&plugin.name, definition.clone())?;
            }
        }
        Ok(registry)
    }

    /// Register a route declared by `plugin`.
    pub fn register(&mut self, plugin: &str, definition: RouteDefinition) -> Result<(), RegistryError> {
        let RouteDefinition { parent_name, route } = definition;

        if let Some(existing) = self.routes.get(&route.name) {
            return Err(RegistryError::DuplicateName {
                name: route.name,
                plugin: plugin.to_string(),
                existing: existing.plugin.clone(),
            });
        }
        if let Some(existing) = self.paths.get(&route.path).and_then(|n| self.routes.get(n)) {
            return Err(RegistryError::DuplicatePath {
                path: route.path,
                plugin: plugin.to_string(),
                existing: existing.plugin.clone(),
            });
        }

        debug!(plugin = %plugin, name = %route.name, path = %route.path, "registered route");

        self.paths.insert(route.path.clone(), route.name.clone());
        self.patterns.push(route.path.clone());
        // Fewer params = more specific = first
        self.patterns.sort_by_key(|path| {
            let param_count = path.matches(':').count();
            let segment_count = path.matches('/').count();
            (param_count, -(segment_count as i32))
        });
        self.routes.insert(
            route.name.clone(),
            RegisteredRoute {
                plugin: plugin.to_string(),
                parent_name,
                route,
            },
        );
        Ok(())
    }

    /// Match a request path against registered routes.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        for pattern in &self.patterns {
            if let Some(params) = match_pattern(pattern, path)
                && let Some(route) = self.paths.get(pattern).and_then(|n| self.routes.get(n))
            {
                return Some(RouteMatch {
                    route: route.clone(),
                    params,
                });
            }
        }
        None
    }

    /// Navigation entries declared by one plugin, ordered by group then
    /// path.
    pub fn menus_for(&self, plugin: &str) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self
            .routes
            .values()
            .filter(|registered| registered.plugin == plugin)
            .filter_map(|registered| {
                let route = &registered.route;
                route.meta.menu.as_ref().map(|menu| MenuItem {
                    name: menu.name.clone(),
                    group: menu.group.clone(),
                    icon: menu.icon.clone(),
                    path: route.path.clone(),
                    route_name: route.name.clone(),
                    permissions: route.meta.permissions.clone(),
                })
            })
            .collect();
        items.sort_by(|a, b| a.group.cmp(&b.group).then_with(|| a.path.cmp(&b.path)));
        items
    }

    /// Get route count.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/equipments/:name/edit"
/// Path: "/equipments/camera/edit"
/// Result: Some({"name": "camera"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use equipments_sdk::types::MenuEntry;

    fn plugin(name: &str, routes: &[(&str, &str)]) -> PluginDefinition {
        routes.iter().fold(PluginDefinition::new(name), |p, (path, route)| {
            p.route(RouteDefinition::new("Root", Route::new(*path, *route, "View")))
        })
    }

    #[test]
    fn match_pattern_exact() {
        let params = match_pattern("/equipments", "/equipments");
        assert!(params.is_some());
        assert!(params.unwrap().is_empty());
    }

    #[test]
    fn match_pattern_with_param() {
        let params = match_pattern("/equipments/:name", "/equipments/camera").unwrap();
        assert_eq!(params.get("name"), Some(&"camera".to_string()));
    }

    #[test]
    fn match_pattern_no_match() {
        assert!(match_pattern("/equipments", "/posts").is_none());
        assert!(match_pattern("/equipments/:name", "/equipments/a/b").is_none());
    }

    #[test]
    fn equipments_plugin_resolves_to_list_view_only() {
        let registry = RouteRegistry::from_plugins(&[equipments::define_plugin()]).unwrap();
        assert_eq!(registry.len(), 1);

        let matched = registry.match_path("/equipments").unwrap();
        assert_eq!(matched.route.route.component, equipments::LIST_COMPONENT);
        assert_eq!(matched.route.plugin, equipments::PLUGIN_NAME);
        assert!(registry.match_path("/equipments/camera").is_none());
        assert!(registry.match_path("/").is_none());
    }

    #[test]
    fn specific_routes_match_first() {
        let registry = RouteRegistry::from_plugins(&[plugin(
            "p",
            &[("/things/:id", "Thing"), ("/things/new", "NewThing")],
        )])
        .unwrap();

        let matched = registry.match_path("/things/new").unwrap();
        assert_eq!(matched.route.route.name, "NewThing");
        let matched = registry.match_path("/things/42").unwrap();
        assert_eq!(matched.params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = RouteRegistry::from_plugins(&[
            plugin("a", &[("/one", "Same")]),
            plugin("b", &[("/two", "Same")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "Same".into(),
                plugin: "b".into(),
                existing: "a".into(),
            }
        );
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let err = RouteRegistry::from_plugins(&[
            plugin("a", &[("/one", "First")]),
            plugin("b", &[("/one", "Second")]),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePath { ref path, .. } if path == "/one"));
        assert!(err.to_string().contains("already registered by a"));
    }

    #[test]
    fn menus_come_from_route_meta() {
        let with_menu = PluginDefinition::new("m").route(RouteDefinition::new(
            "Root",
            Route::new("/gear", "Gear", "GearList").menu(MenuEntry::new("Gear", "content", "box")),
        ));
        let registry =
            RouteRegistry::from_plugins(&[with_menu, plugin("plain", &[("/x", "X")])]).unwrap();

        let menus = registry.menus_for("m");
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].path, "/gear");
        assert_eq!(menus[0].icon, "box");
        assert_eq!(menus[0].route_name, "Gear");
        assert!(registry.menus_for("plain").is_empty());
    }
}
