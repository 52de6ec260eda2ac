//! Plugin API routes.
//!
//! Custom list and delete endpoints for the equipments console, served
//! under `/apis/api.plugin.halo.run/v1alpha1/plugins/PluginEquipments`.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{delete, get};
use axum::Router;
use equipments_sdk::equipment::{EquipmentGroup, EquipmentGroupList, EquipmentList};

use crate::equipment::{EquipmentQuery, ListRequest, QueryParams};
use crate::error::AppResult;
use crate::state::AppState;

/// API group and version of plugin endpoints.
pub const PLUGIN_API_PREFIX: &str = "/apis/api.plugin.halo.run/v1alpha1/plugins";

/// Create the plugin API router.
pub fn router() -> Router<AppState> {
    let base = format!("{PLUGIN_API_PREFIX}/{}", equipments::PLUGIN_NAME);
    Router::new()
        .route(&format!("{base}/equipments"), get(list_equipments))
        .route(&format!("{base}/equipmentgroups"), get(list_equipment_groups))
        .route(
            &format!("{base}/equipmentgroups/{{name}}"),
            delete(delete_equipment_group),
        )
}

async fn list_equipments(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<EquipmentList>> {
    let query = EquipmentQuery::from_params(&QueryParams::new(params))?;
    let list = state.equipments().list_equipment(&query).await?;
    Ok(Json(list))
}

async fn list_equipment_groups(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<EquipmentGroupList>> {
    let request = ListRequest::from_params(&QueryParams::new(params))?;
    let list = state.equipment_groups().list_equipment_groups(&request).await?;
    Ok(Json(list))
}

async fn delete_equipment_group(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<EquipmentGroup>> {
    let deleted = state.equipment_groups().delete_equipment_group(&name).await?;
    Ok(Json(deleted))
}
