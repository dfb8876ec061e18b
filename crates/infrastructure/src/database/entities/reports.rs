use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_machine: Option<i32>,
    pub id_user: Option<i32>,
    pub id_workers: Option<i32>,
    pub title: String,
    pub area: Option<String>,
    pub estado: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub natural_user: Option<String>,
    pub natural_password: Option<String>,
    pub windows_user: Option<String>,
    pub windows_password: Option<String>,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::machines::Entity",
        from = "Column::IdMachine",
        to = "super::machines::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Machine,
    // No cascade: cases are removed by the repository inside a transaction
    #[sea_orm(has_many = "super::report_cases::Entity")]
    ReportCases,
}

impl Related<super::machines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Machine.def()
    }
}

impl Related<super::report_cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportCases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
