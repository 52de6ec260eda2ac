//! Generic resource API routes.
//!
//! Every resource kind gets the same CRUD surface under
//! `/apis/{group}/{version}/{plural}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use equipments_sdk::equipment::{Equipment, EquipmentGroup};
use equipments_sdk::extension::{Extension, ListResult};
use equipments_sdk::validate::Validate;

use crate::equipment::{ListRequest, QueryParams};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the resource API router for all built-in kinds.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<Equipment>())
        .merge(resource_routes::<EquipmentGroup>())
}

/// CRUD routes for one resource kind.
pub fn resource_routes<T: Extension + Validate>() -> Router<AppState> {
    let collection = format!("/apis/{}/{}/{}", T::GROUP, T::VERSION, T::PLURAL);
    let item = format!("{collection}/{{name}}");

    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(
            &item,
            get(fetch::<T>).put(update::<T>).delete(remove::<T>),
        )
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn list<T: Extension>(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<ListResult<T>>> {
    let request = ListRequest::from_params(&QueryParams::new(params))?;
    let page = state
        .client()
        .list_page(
            |item: &T| request.selectors.matches(item),
            |a: &T, b: &T| a.name().cmp(b.name()),
            request.page,
            request.size,
        )
        .await?;
    Ok(Json(page))
}

async fn create<T: Extension + Validate>(
    State(state): State<AppState>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<(StatusCode, Json<T>)> {
    let resource = body(payload)?;
    let created = state.client().create(resource).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn fetch<T: Extension>(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<T>> {
    let resource: T = state.client().get(&name).await?;
    Ok(Json(resource))
}

async fn update<T: Extension + Validate>(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<T>, JsonRejection>,
) -> AppResult<Json<T>> {
    let resource = body(payload)?;
    if resource.name() != name {
        return Err(AppError::BadRequest(format!(
            "metadata.name \"{}\" does not match path name \"{name}\"",
            resource.name()
        )));
    }
    let updated = state.client().update(resource).await?;
    Ok(Json(updated))
}

async fn remove<T: Extension>(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<T>> {
    let deleted: T = state.client().delete(&name).await?;
    Ok(Json(deleted))
}
