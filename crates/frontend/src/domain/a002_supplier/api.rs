use contracts::domain::a002_supplier::{Supplier, SupplierId, SupplierPayload};

use crate::shared::http::{decode, decode_list, ApiClient, ApiError};

const PATH: &str = "/proveedores/";

fn item_path(id: SupplierId) -> String {
    format!("{}{}/", PATH, id)
}

pub async fn list(client: &ApiClient) -> Result<Vec<Supplier>, ApiError> {
    decode_list(client.get(PATH).await?)
}

pub async fn get(client: &ApiClient, id: SupplierId) -> Result<Supplier, ApiError> {
    decode(client.get(&item_path(id)).await?)
}

pub async fn create(client: &ApiClient, payload: &SupplierPayload) -> Result<(), ApiError> {
    client.post(PATH, payload).await.map(|_| ())
}

pub async fn update(
    client: &ApiClient,
    id: SupplierId,
    payload: &SupplierPayload,
) -> Result<(), ApiError> {
    client.put(&item_path(id), payload).await.map(|_| ())
}

/// Hard delete. The server refuses while products reference the supplier.
pub async fn delete(client: &ApiClient, id: SupplierId) -> Result<(), ApiError> {
    client.delete(&item_path(id)).await.map(|_| ())
}
