use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::Json;
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::shared::ListResponse;
use serde::Deserialize;

use crate::domain::a001_category::service;
use crate::shared::api_error::ApiResult;
use crate::shared::app_state::AppState;
use crate::shared::pagination::paginate;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// GET /api/categorias/
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> ApiResult<Json<ListResponse<Category>>> {
    let items = service::list_all(&state.db).await?;
    Ok(Json(paginate(items, query.page.as_deref(), state.api.page_size, &uri)?))
}

/// GET /api/categorias/:id/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> ApiResult<Json<Category>> {
    Ok(Json(service::get_by_id(&state.db, id).await?))
}
