use contracts::domain::a001_category::{Category, CategoryId};

use crate::shared::http::{decode, decode_list, ApiClient, ApiError};

const PATH: &str = "/categorias/";

pub async fn list(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    decode_list(client.get(PATH).await?)
}

pub async fn get(client: &ApiClient, id: CategoryId) -> Result<Category, ApiError> {
    decode(client.get(&format!("{}{}/", PATH, id)).await?)
}
