//! Theme page routes.
//!
//! `/equipments` and `/equipments/page/{page}` render the `equipments`
//! template with the grouped equipment and one page of the full list.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::equipment::QueryParams;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::theme::UrlContextListResult;
use crate::theme::pagination::page_path;

/// Template id rendered by the equipments page.
pub const TEMPLATE_ID: &str = "equipments";

const BASE_PATH: &str = "/equipments";
const GROUP_PARAM: &str = "group";

/// Create the theme router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(equipments_first_page))
        .route("/equipments/page/{page}", get(equipments_page))
}

async fn equipments_first_page(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    render_equipments(&state, 1, &QueryParams::new(params)).await
}

async fn equipments_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let page = page.parse::<u32>().unwrap_or(1).max(1);
    render_equipments(&state, page, &QueryParams::new(params)).await
}

async fn render_equipments(
    state: &AppState,
    page: u32,
    params: &QueryParams,
) -> AppResult<Html<String>> {
    let group = params.text(GROUP_PARAM);
    let page_size = state.config().equipments_page_size;

    let (groups, list) = tokio::join!(
        state.finder().group_by(),
        state.finder().list(Some(page), Some(page_size), group.as_deref()),
    );
    // Links are built from the page actually rendered, not the request path.
    let path = page_path(BASE_PATH, page);
    let equipments = UrlContextListResult::new(list?, &path, group.as_deref());

    let mut context = tera::Context::new();
    context.insert("groups", &groups?);
    context.insert("equipments", &equipments);
    context.insert("title", &state.config().equipments_title);
    context.insert("_templateId", TEMPLATE_ID);

    debug!(path = %path, page, group = ?group, "rendering equipments page");

    let html = state
        .theme()
        .render(TEMPLATE_ID, &context)
        .map_err(AppError::Internal)?;
    Ok(Html(html))
}
