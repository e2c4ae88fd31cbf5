use chrono::{DateTime, Utc};
use contracts::domain::a002_supplier::{Supplier, SupplierId, SupplierPayload};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{Condition, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_supplier")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Supplier {
    fn from(m: Model) -> Self {
        Supplier {
            id: m.id,
            name: m.name,
            phone: m.phone,
            email: m.email,
            address: m.address,
            created_at: m.created_at,
        }
    }
}

/// Sort keys accepted by `?ordering=`, with or without a leading `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Name,
    CreatedAt,
}

impl Ordering {
    pub fn parse(raw: &str) -> Option<(Self, bool)> {
        let (descending, key) = match raw.strip_prefix('-') {
            Some(key) => (true, key),
            None => (false, raw),
        };
        let ordering = match key {
            "nombre" => Ordering::Name,
            "fecha_creacion" => Ordering::CreatedAt,
            _ => return None,
        };
        Some((ordering, descending))
    }

    fn column(self) -> Column {
        match self {
            Ordering::Name => Column::Name,
            Ordering::CreatedAt => Column::CreatedAt,
        }
    }
}

/// Case-insensitive substring match on `column`.
fn icontains(column: Column, text: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", text.to_lowercase()))
}

pub async fn list(
    db: &DatabaseConnection,
    search: Option<&str>,
    ordering: (Ordering, bool),
) -> anyhow::Result<Vec<Supplier>> {
    let mut query = Entity::find();
    if let Some(text) = search {
        query = query.filter(
            Condition::any()
                .add(icontains(Column::Name, text))
                .add(icontains(Column::Email, text))
                .add(icontains(Column::Phone, text)),
        );
    }
    let (key, descending) = ordering;
    query = if descending {
        query.order_by_desc(key.column())
    } else {
        query.order_by_asc(key.column())
    };
    let items = query
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: SupplierId) -> anyhow::Result<Option<Supplier>> {
    Ok(Entity::find_by_id(id).one(db).await?.map(Into::into))
}

/// Whether another supplier already uses `email`.
pub async fn email_taken(
    db: &DatabaseConnection,
    email: &str,
    except: Option<SupplierId>,
) -> anyhow::Result<bool> {
    let mut query = Entity::find().filter(Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

pub async fn insert(db: &DatabaseConnection, payload: &SupplierPayload) -> anyhow::Result<Supplier> {
    let active = ActiveModel {
        name: Set(payload.name.clone()),
        phone: Set(payload.phone.clone()),
        email: Set(payload.email.clone()),
        address: Set(payload.address.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(active.insert(db).await?.into())
}

pub async fn update(
    db: &DatabaseConnection,
    id: SupplierId,
    payload: &SupplierPayload,
) -> anyhow::Result<Supplier> {
    let active = ActiveModel {
        id: Set(id),
        name: Set(payload.name.clone()),
        phone: Set(payload.phone.clone()),
        email: Set(payload.email.clone()),
        address: Set(payload.address.clone()),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    Ok(active.update(db).await?.into())
}

pub async fn delete(db: &DatabaseConnection, id: SupplierId) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
