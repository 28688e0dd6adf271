use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub blade_id: String,

    pub turbine_id: String,
    #[sea_orm(belongs_to, from = "turbine_id", to = "turbine_id")]
    pub turbine: HasOne<super::turbine::Entity>,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub blade_type: String,
    pub length: i32, // in metres

    #[sea_orm(has_many)]
    pub maintenance: HasMany<super::maintenance::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
