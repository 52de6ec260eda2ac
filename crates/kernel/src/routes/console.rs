//! Console manifest routes.
//!
//! Lists every started plugin with the routes, menus and permissions it
//! contributes, for the console UI to build its navigation, and resolves a
//! console path to the route that renders it.

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use equipments_sdk::types::PluginDefinition;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::menu::{MenuItem, RouteMatch};
use crate::state::AppState;

#[derive(Serialize)]
struct PluginManifest {
    #[serde(flatten)]
    definition: PluginDefinition,
    menus: Vec<MenuItem>,
}

#[derive(Deserialize)]
struct ResolveQuery {
    path: String,
}

/// Create the console router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/console/plugins", get(list_plugins))
        .route("/api/console/routes/resolve", get(resolve_route))
}

async fn list_plugins(State(state): State<AppState>) -> Json<Vec<PluginManifest>> {
    let manifests = state
        .plugins()
        .started()
        .into_iter()
        .map(|definition| PluginManifest {
            menus: state.routes().menus_for(&definition.name),
            definition,
        })
        .collect();
    Json(manifests)
}

async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> AppResult<Json<RouteMatch>> {
    state
        .routes()
        .match_path(&query.path)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no console route for {}", query.path)))
}
