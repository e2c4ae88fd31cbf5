use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use contracts::domain::a003_product::{Product, ProductId, ProductListItem, ProductPayload};
use contracts::shared::ListResponse;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a003_product::service::{self, ProductQuery};
use crate::shared::api_error::ApiResult;
use crate::shared::app_state::AppState;
use crate::shared::pagination::paginate;

/// GET /api/productos/
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    uri: Uri,
) -> ApiResult<Json<ListResponse<ProductListItem>>> {
    let items = service::list(&state.db, &query).await?;
    Ok(Json(paginate(items, query.page.as_deref(), state.api.page_size, &uri)?))
}

/// GET /api/productos/:id/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    Ok(Json(service::get_by_id(&state.db, id).await?))
}

/// POST /api/productos/
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = service::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/productos/:id/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Json<Product>> {
    Ok(Json(service::update(&state.db, id, &payload).await?))
}

/// POST /api/productos/:id/eliminar/
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Value>> {
    let name = service::deactivate(&state.db, id).await?;
    Ok(Json(json!({ "mensaje": format!("Producto {} desactivado correctamente.", name) })))
}

/// POST /api/productos/:id/activar/
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Value>> {
    let name = service::activate(&state.db, id).await?;
    Ok(Json(json!({ "mensaje": format!("Producto {} activado correctamente.", name) })))
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParam {
    pub categoria: Option<String>,
}

/// GET /api/productos/por_categoria/?categoria=CODE
pub async fn by_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryParam>,
) -> ApiResult<Json<Vec<ProductListItem>>> {
    Ok(Json(service::by_category(&state.db, query.categoria.as_deref()).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockParam {
    pub minimo: Option<i64>,
}

/// GET /api/productos/bajo_stock/?minimo=N
pub async fn low_stock(
    State(state): State<AppState>,
    Query(query): Query<LowStockParam>,
) -> ApiResult<Json<Vec<ProductListItem>>> {
    let minimo = query.minimo.unwrap_or(state.api.low_stock_threshold);
    Ok(Json(service::low_stock(&state.db, minimo).await?))
}
