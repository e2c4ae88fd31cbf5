use super::repository::{self, Ordering};
use crate::domain::a003_product;
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a002_supplier::aggregate::fields;
use contracts::domain::a002_supplier::{Supplier, SupplierId, SupplierPayload};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub const EMAIL_TAKEN: &str = "Ya existe un proveedor con este email.";
pub const HAS_PRODUCTS: &str =
    "No se puede eliminar el proveedor porque tiene productos asociados.";

/// Query string of the supplier list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
}

pub async fn list(db: &DatabaseConnection, query: &SupplierQuery) -> ApiResult<Vec<Supplier>> {
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let ordering = query
        .ordering
        .as_deref()
        .and_then(Ordering::parse)
        .unwrap_or((Ordering::Name, false));
    Ok(repository::list(db, search, ordering).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: SupplierId) -> ApiResult<Supplier> {
    repository::get_by_id(db, id)
        .await?
        .ok_or_else(ApiError::not_found)
}

async fn validate(
    db: &DatabaseConnection,
    payload: &SupplierPayload,
    except: Option<SupplierId>,
) -> ApiResult<SupplierPayload> {
    let payload = payload.trimmed();
    let mut errors = payload.validate();
    if !errors.contains(fields::EMAIL)
        && repository::email_taken(db, &payload.email, except).await?
    {
        errors.insert(fields::EMAIL, EMAIL_TAKEN);
    }
    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(ApiError::Validation(errors))
    }
}

pub async fn create(db: &DatabaseConnection, payload: &SupplierPayload) -> ApiResult<Supplier> {
    let payload = validate(db, payload, None).await?;
    let supplier = repository::insert(db, &payload).await?;
    tracing::info!("Supplier {} created", supplier.id);
    Ok(supplier)
}

pub async fn update(
    db: &DatabaseConnection,
    id: SupplierId,
    payload: &SupplierPayload,
) -> ApiResult<Supplier> {
    get_by_id(db, id).await?;
    let payload = validate(db, payload, Some(id)).await?;
    Ok(repository::update(db, id, &payload).await?)
}

/// Suppliers still referenced by products are kept.
pub async fn delete(db: &DatabaseConnection, id: SupplierId) -> ApiResult<()> {
    get_by_id(db, id).await?;
    if a003_product::repository::count_by_supplier(db, id).await? > 0 {
        return Err(ApiError::Conflict(HAS_PRODUCTS.to_string()));
    }
    if repository::delete(db, id).await? {
        tracing::info!("Supplier {} deleted", id);
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{a001_category, a003_product};
    use crate::shared::data::db;
    use contracts::domain::a003_product::ProductPayload;

    fn payload(name: &str, email: &str) -> SupplierPayload {
        SupplierPayload {
            name: name.into(),
            phone: "3001234567".into(),
            email: email.into(),
            address: "Cra 7 # 12-34".into(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_lists_by_name() {
        let conn = db::memory().await;
        create(&conn, &payload("  Zeta ", "z@z.co")).await.unwrap();
        create(&conn, &payload("Alfa", "a@a.co")).await.unwrap();

        let names: Vec<String> = list(&conn, &SupplierQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alfa", "Zeta"]);
    }

    #[tokio::test]
    async fn test_search_and_ordering() {
        let conn = db::memory().await;
        create(&conn, &payload("Alfa", "ventas@alfa.co")).await.unwrap();
        create(&conn, &payload("Beta", "compras@beta.co")).await.unwrap();

        let query = SupplierQuery {
            search: Some("VENTAS".into()),
            ..Default::default()
        };
        let found = list(&conn, &query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alfa");

        let query = SupplierQuery {
            ordering: Some("-nombre".into()),
            ..Default::default()
        };
        assert_eq!(list(&conn, &query).await.unwrap()[0].name, "Beta");
    }

    #[tokio::test]
    async fn test_validation_errors_are_field_keyed() {
        let conn = db::memory().await;
        let err = create(&conn, &payload("", "no-es-email")).await.unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains(fields::NAME));
        assert!(errors.contains(fields::EMAIL));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let conn = db::memory().await;
        let first = create(&conn, &payload("Alfa", "a@a.co")).await.unwrap();
        let other = create(&conn, &payload("Beta", "b@b.co")).await.unwrap();

        let err = create(&conn, &payload("Gamma", "a@a.co")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.get(fields::EMAIL) == Some(EMAIL_TAKEN)));

        // Keeping one's own email is fine; taking another's is not.
        update(&conn, first.id, &payload("Alfa SAS", "a@a.co")).await.unwrap();
        assert!(update(&conn, other.id, &payload("Beta", "a@a.co")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let conn = db::memory().await;
        let err = update(&conn, 42, &payload("Alfa", "a@a.co")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_referenced_supplier_conflicts() {
        let conn = db::memory().await;
        a001_category::service::seed(&conn).await.unwrap();
        let category = a001_category::service::list_all(&conn).await.unwrap()[0].id;
        let used = create(&conn, &payload("Alfa", "a@a.co")).await.unwrap();
        let unused = create(&conn, &payload("Beta", "b@b.co")).await.unwrap();
        a003_product::service::create(
            &conn,
            &ProductPayload {
                code: "MED-001".into(),
                name: "Ibuprofeno".into(),
                description: "400mg".into(),
                quantity: Some(5),
                unit_price: Some(1500.0),
                supplier_id: Some(used.id),
                category_id: Some(category),
                active: true,
            },
        )
        .await
        .unwrap();

        assert!(matches!(delete(&conn, used.id).await, Err(ApiError::Conflict(_))));
        delete(&conn, unused.id).await.unwrap();
        assert!(matches!(get_by_id(&conn, unused.id).await, Err(ApiError::NotFound(_))));
        assert_eq!(list(&conn, &SupplierQuery::default()).await.unwrap().len(), 1);
    }
}
