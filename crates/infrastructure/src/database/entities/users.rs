use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub lastname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub cedula: String,
    pub role: String,
    pub password: String, // bcrypt hash
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_specializations::Entity")]
    UserSpecializations,
}

impl Related<super::user_specializations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSpecializations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
