use super::repository;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a001_category::{Category, CategoryCode, CategoryId};
use sea_orm::DatabaseConnection;

/// Inserts the fixed categories that are not stored yet.
pub async fn seed(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let mut created = 0;
    for code in CategoryCode::ALL {
        if repository::get_by_code(db, code.as_str()).await?.is_none() {
            repository::insert(db, code).await?;
            created += 1;
        }
    }
    if created > 0 {
        tracing::info!("Seeded {} categories", created);
    }
    Ok(created)
}

pub async fn list_all(db: &DatabaseConnection) -> ApiResult<Vec<Category>> {
    Ok(repository::list_all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: CategoryId) -> ApiResult<Category> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(ApiError::not_found)
}

pub async fn get_by_code(db: &DatabaseConnection, code: &str) -> ApiResult<Option<Category>> {
    Ok(repository::get_by_code(db, code).await?)
}
