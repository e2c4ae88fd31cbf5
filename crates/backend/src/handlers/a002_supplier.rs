use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use contracts::domain::a002_supplier::{Supplier, SupplierId, SupplierPayload};
use contracts::shared::ListResponse;

use crate::domain::a002_supplier::service::{self, SupplierQuery};
use crate::shared::api_error::ApiResult;
use crate::shared::app_state::AppState;
use crate::shared::pagination::paginate;

/// GET /api/proveedores/
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SupplierQuery>,
    uri: Uri,
) -> ApiResult<Json<ListResponse<Supplier>>> {
    let items = service::list(&state.db, &query).await?;
    Ok(Json(paginate(items, query.page.as_deref(), state.api.page_size, &uri)?))
}

/// GET /api/proveedores/:id/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(service::get_by_id(&state.db, id).await?))
}

/// POST /api/proveedores/
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<SupplierPayload>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    let supplier = service::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// PUT /api/proveedores/:id/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
    Json(payload): Json<SupplierPayload>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(service::update(&state.db, id, &payload).await?))
}

/// DELETE /api/proveedores/:id/
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> ApiResult<StatusCode> {
    service::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
