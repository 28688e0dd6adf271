use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub maintenance_id: i32,

    pub blade_id: String,
    #[sea_orm(belongs_to, from = "blade_id", to = "blade_id")]
    pub blade: HasOne<super::blade::Entity>,

    pub date: Date,
    /// Free text. The dashboards treat "Pending" and "Completed" specially.
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub issue: String,
    pub technician: String,
}

impl ActiveModelBehavior for ActiveModel {}
