use contracts::domain::a001_category::CategoryCode;
use contracts::domain::a003_product::{
    Product, ProductFilter, ProductId, ProductListItem, ProductPayload,
};
use serde::Serialize;

use crate::shared::http::{decode, decode_list, ApiClient, ApiError};

const PATH: &str = "/productos/";

fn item_path(id: ProductId) -> String {
    format!("{}{}/", PATH, id)
}

#[derive(Serialize)]
struct ByCategoryQuery<'a> {
    categoria: &'a str,
}

#[derive(Serialize)]
struct LowStockQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    minimo: Option<i64>,
}

pub async fn list(client: &ApiClient, filter: &ProductFilter) -> Result<Vec<ProductListItem>, ApiError> {
    decode_list(client.get_with(PATH, filter).await?)
}

pub async fn get(client: &ApiClient, id: ProductId) -> Result<Product, ApiError> {
    decode(client.get(&item_path(id)).await?)
}

/// Success is the 2xx status alone; the echoed body is not needed.
pub async fn create(client: &ApiClient, payload: &ProductPayload) -> Result<(), ApiError> {
    client.post(PATH, payload).await.map(|_| ())
}

pub async fn update(
    client: &ApiClient,
    id: ProductId,
    payload: &ProductPayload,
) -> Result<(), ApiError> {
    client.put(&item_path(id), payload).await.map(|_| ())
}

/// Marks the product inactive. Products are never removed.
pub async fn soft_delete(client: &ApiClient, id: ProductId) -> Result<(), ApiError> {
    client
        .post_action(&format!("{}eliminar/", item_path(id)))
        .await
        .map(|_| ())
}

pub async fn activate(client: &ApiClient, id: ProductId) -> Result<(), ApiError> {
    client
        .post_action(&format!("{}activar/", item_path(id)))
        .await
        .map(|_| ())
}

pub async fn by_category(
    client: &ApiClient,
    code: CategoryCode,
) -> Result<Vec<ProductListItem>, ApiError> {
    let query = ByCategoryQuery {
        categoria: code.as_str(),
    };
    decode_list(client.get_with(&format!("{}por_categoria/", PATH), &query).await?)
}

/// Active products with quantity below `minimo` (server default when `None`).
pub async fn low_stock(
    client: &ApiClient,
    minimo: Option<i64>,
) -> Result<Vec<ProductListItem>, ApiError> {
    let query = LowStockQuery { minimo };
    decode_list(client.get_with(&format!("{}bajo_stock/", PATH), &query).await?)
}
