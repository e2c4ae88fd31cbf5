use chrono::{DateTime, Utc};
use contracts::domain::a001_category::CategoryId;
use contracts::domain::a002_supplier::SupplierId;
use contracts::domain::a003_product::{ProductId, ProductPayload};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub supplier_id: i64,
    pub category_id: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Sort keys accepted by `?ordering=`, with or without a leading `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Name,
    UnitPrice,
    Quantity,
    CreatedAt,
}

impl Ordering {
    pub const DEFAULT: (Ordering, bool) = (Ordering::CreatedAt, true);

    pub fn parse(raw: &str) -> Option<(Self, bool)> {
        let (descending, key) = match raw.strip_prefix('-') {
            Some(key) => (true, key),
            None => (false, raw),
        };
        let ordering = match key {
            "nombre" => Ordering::Name,
            "precio_unidad" => Ordering::UnitPrice,
            "cantidad" => Ordering::Quantity,
            "fecha_creacion" => Ordering::CreatedAt,
            _ => return None,
        };
        Some((ordering, descending))
    }

    fn column(self) -> Column {
        match self {
            Ordering::Name => Column::Name,
            Ordering::UnitPrice => Column::UnitPrice,
            Ordering::Quantity => Column::Quantity,
            Ordering::CreatedAt => Column::CreatedAt,
        }
    }
}

/// Row selection of the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Hide inactive rows regardless of `active`.
    pub only_active: bool,
    pub active: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub supplier_id: Option<SupplierId>,
    pub search: Option<String>,
    pub quantity_below: Option<i64>,
}

fn icontains(column: Column, text: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", text.to_lowercase()))
}

pub async fn list(
    db: &DatabaseConnection,
    selection: &Selection,
    ordering: (Ordering, bool),
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find();
    if selection.only_active {
        query = query.filter(Column::Active.eq(true));
    }
    if let Some(active) = selection.active {
        query = query.filter(Column::Active.eq(active));
    }
    if let Some(id) = selection.category_id {
        query = query.filter(Column::CategoryId.eq(id));
    }
    if let Some(id) = selection.supplier_id {
        query = query.filter(Column::SupplierId.eq(id));
    }
    if let Some(limit) = selection.quantity_below {
        query = query.filter(Column::Quantity.lt(limit));
    }
    if let Some(text) = &selection.search {
        query = query.filter(
            Condition::any()
                .add(icontains(Column::Code, text))
                .add(icontains(Column::Name, text))
                .add(icontains(Column::Description, text)),
        );
    }

    let (key, descending) = ordering;
    query = if descending {
        query.order_by_desc(key.column()).order_by_desc(Column::Id)
    } else {
        query.order_by_asc(key.column()).order_by_asc(Column::Id)
    };
    Ok(query.all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: ProductId) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn code_taken(db: &DatabaseConnection, code: &str) -> anyhow::Result<bool> {
    let found = Entity::find().filter(Column::Code.eq(code)).one(db).await?;
    Ok(found.is_some())
}

pub async fn count_by_supplier(db: &DatabaseConnection, id: SupplierId) -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::SupplierId.eq(id))
        .count(db)
        .await?)
}

/// Stores a validated payload. Every optional field is known to be present.
pub async fn insert(db: &DatabaseConnection, payload: &ProductPayload) -> anyhow::Result<Model> {
    let active = ActiveModel {
        code: Set(payload.code.clone()),
        name: Set(payload.name.clone()),
        description: Set(payload.description.clone()),
        quantity: Set(payload.quantity.unwrap_or_default()),
        unit_price: Set(payload.unit_price.unwrap_or_default()),
        supplier_id: Set(payload.supplier_id.unwrap_or_default()),
        category_id: Set(payload.category_id.unwrap_or_default()),
        active: Set(payload.active),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

/// Overwrites everything but the code and the creation time.
pub async fn update(
    db: &DatabaseConnection,
    id: ProductId,
    payload: &ProductPayload,
) -> anyhow::Result<Model> {
    let active = ActiveModel {
        id: Set(id),
        code: sea_orm::ActiveValue::NotSet,
        name: Set(payload.name.clone()),
        description: Set(payload.description.clone()),
        quantity: Set(payload.quantity.unwrap_or_default()),
        unit_price: Set(payload.unit_price.unwrap_or_default()),
        supplier_id: Set(payload.supplier_id.unwrap_or_default()),
        category_id: Set(payload.category_id.unwrap_or_default()),
        active: Set(payload.active),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(Utc::now())),
    };
    Ok(active.update(db).await?)
}

pub async fn set_active(db: &DatabaseConnection, id: ProductId, active: bool) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::Active, Expr::value(active))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
