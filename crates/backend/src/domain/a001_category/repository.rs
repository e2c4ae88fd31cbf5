use contracts::domain::a001_category::{Category, CategoryCode, CategoryId};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        match CategoryCode::from_code(&m.code) {
            Some(code) => Category::new(m.id, code),
            None => Category {
                id: m.id,
                display_name: m.code.clone(),
                code: m.code,
            },
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Category>> {
    let items = Entity::find()
        .order_by_asc(Column::Code)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(db: &DatabaseConnection, id: CategoryId) -> anyhow::Result<Option<Category>> {
    Ok(Entity::find_by_id(id).one(db).await?.map(Into::into))
}

pub async fn get_by_code(db: &DatabaseConnection, code: &str) -> anyhow::Result<Option<Category>> {
    let result = Entity::find().filter(Column::Code.eq(code)).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(db: &DatabaseConnection, code: CategoryCode) -> anyhow::Result<CategoryId> {
    let active = ActiveModel {
        code: Set(code.as_str().to_string()),
        ..Default::default()
    };
    let model = active.insert(db).await?;
    Ok(model.id)
}
