use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "specializations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String, // lower-cased, trimmed
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
