use super::repository::{self, Model, Ordering, Selection};
use crate::domain::{a001_category, a002_supplier};
use crate::shared::api_error::{ApiError, ApiResult};
use contracts::domain::a001_category::{Category, CategoryId};
use contracts::domain::a002_supplier::SupplierId;
use contracts::domain::a003_product::aggregate::fields;
use contracts::domain::a003_product::{Product, ProductId, ProductListItem, ProductPayload};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::collections::HashMap;

pub const CODE_TAKEN: &str = "Ya existe un producto con este código.";
pub const CATEGORY_PARAM_REQUIRED: &str = "Debe proporcionar el parámetro categoria";

fn missing_reference(id: i64) -> String {
    format!("Clave primaria \"{}\" inválida - objeto no existe.", id)
}

/// Query string of the product list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub categoria: Option<CategoryId>,
    pub proveedor: Option<SupplierId>,
    pub activo: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub mostrar_inactivos: Option<String>,
    pub page: Option<String>,
}

impl ProductQuery {
    /// Inactive rows are listed only with `mostrar_inactivos=true`.
    pub fn include_inactive(&self) -> bool {
        self.mostrar_inactivos
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    fn selection(&self) -> Selection {
        Selection {
            only_active: !self.include_inactive(),
            active: self.activo,
            category_id: self.categoria,
            supplier_id: self.proveedor,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            quantity_below: None,
        }
    }
}

/// Display names of the referenced suppliers and categories.
struct Names {
    suppliers: HashMap<SupplierId, String>,
    categories: HashMap<CategoryId, String>,
}

impl Names {
    async fn load(db: &DatabaseConnection) -> ApiResult<Self> {
        let suppliers = a002_supplier::repository::list(
            db,
            None,
            (a002_supplier::repository::Ordering::Name, false),
        )
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
        let categories = a001_category::repository::list_all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.label().to_string()))
            .collect();
        Ok(Self {
            suppliers,
            categories,
        })
    }

    fn detail(&self, m: Model) -> Product {
        Product {
            supplier_name: self.suppliers.get(&m.supplier_id).cloned().unwrap_or_default(),
            category_name: self.categories.get(&m.category_id).cloned().unwrap_or_default(),
            id: m.id,
            code: m.code,
            name: m.name,
            description: m.description,
            quantity: m.quantity,
            unit_price: m.unit_price,
            supplier_id: m.supplier_id,
            category_id: m.category_id,
            active: m.active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn item(&self, m: Model) -> ProductListItem {
        ProductListItem::from(&self.detail(m))
    }
}

async fn select(
    db: &DatabaseConnection,
    selection: &Selection,
    ordering: (Ordering, bool),
) -> ApiResult<Vec<ProductListItem>> {
    let models = repository::list(db, selection, ordering).await?;
    let names = Names::load(db).await?;
    Ok(models.into_iter().map(|m| names.item(m)).collect())
}

pub async fn list(db: &DatabaseConnection, query: &ProductQuery) -> ApiResult<Vec<ProductListItem>> {
    let ordering = query
        .ordering
        .as_deref()
        .and_then(Ordering::parse)
        .unwrap_or(Ordering::DEFAULT);
    select(db, &query.selection(), ordering).await
}

/// Active products of the category with the given code, e.g. `ANALGESICOS`.
pub async fn by_category(db: &DatabaseConnection, code: Option<&str>) -> ApiResult<Vec<ProductListItem>> {
    let code = code
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest(CATEGORY_PARAM_REQUIRED.to_string()))?;
    let Some(category) = a001_category::service::get_by_code(db, code).await? else {
        return Ok(Vec::new());
    };
    let selection = Selection {
        only_active: true,
        category_id: Some(category.id),
        ..Default::default()
    };
    select(db, &selection, Ordering::DEFAULT).await
}

/// Active products with `quantity < minimo`.
pub async fn low_stock(db: &DatabaseConnection, minimo: i64) -> ApiResult<Vec<ProductListItem>> {
    let selection = Selection {
        only_active: true,
        quantity_below: Some(minimo),
        ..Default::default()
    };
    select(db, &selection, Ordering::DEFAULT).await
}

/// Detail lookup. Inactive products stay reachable so they can be edited
/// and reactivated.
pub async fn get_by_id(db: &DatabaseConnection, id: ProductId) -> ApiResult<Product> {
    let model = repository::get_by_id(db, id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    let names = Names::load(db).await?;
    Ok(names.detail(model))
}

async fn check_references(
    db: &DatabaseConnection,
    payload: &ProductPayload,
    errors: &mut contracts::shared::FieldErrors,
) -> ApiResult<()> {
    if let Some(id) = payload.supplier_id {
        if a002_supplier::repository::get_by_id(db, id).await?.is_none() {
            errors.insert(fields::SUPPLIER, missing_reference(id));
        }
    }
    if let Some(id) = payload.category_id {
        let found: Option<Category> = a001_category::repository::get_by_id(db, id).await?;
        if found.is_none() {
            errors.insert(fields::CATEGORY, missing_reference(id));
        }
    }
    Ok(())
}

fn trimmed(payload: &ProductPayload) -> ProductPayload {
    ProductPayload {
        code: payload.code.trim().to_string(),
        name: payload.name.trim().to_string(),
        description: payload.description.trim().to_string(),
        ..payload.clone()
    }
}

pub async fn create(db: &DatabaseConnection, payload: &ProductPayload) -> ApiResult<Product> {
    let payload = trimmed(payload);
    let mut errors = payload.validate();
    if !errors.contains(fields::CODE) && repository::code_taken(db, &payload.code).await? {
        errors.insert(fields::CODE, CODE_TAKEN);
    }
    check_references(db, &payload, &mut errors).await?;
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let model = repository::insert(db, &payload).await?;
    tracing::info!("Product {} ({}) created", model.id, model.code);
    get_by_id(db, model.id).await
}

/// The stored code is kept whatever the payload says.
pub async fn update(
    db: &DatabaseConnection,
    id: ProductId,
    payload: &ProductPayload,
) -> ApiResult<Product> {
    let current = repository::get_by_id(db, id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    let payload = ProductPayload {
        code: current.code,
        ..trimmed(payload)
    };
    let mut errors = payload.validate();
    check_references(db, &payload, &mut errors).await?;
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    repository::update(db, id, &payload).await?;
    get_by_id(db, id).await
}

/// Soft delete. Returns the product name for the confirmation message.
pub async fn deactivate(db: &DatabaseConnection, id: ProductId) -> ApiResult<String> {
    set_active(db, id, false).await
}

pub async fn activate(db: &DatabaseConnection, id: ProductId) -> ApiResult<String> {
    set_active(db, id, true).await
}

async fn set_active(db: &DatabaseConnection, id: ProductId, active: bool) -> ApiResult<String> {
    let current = repository::get_by_id(db, id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    if !repository::set_active(db, id, active).await? {
        return Err(ApiError::not_found());
    }
    tracing::info!("Product {} active={}", id, active);
    Ok(current.name)
}
