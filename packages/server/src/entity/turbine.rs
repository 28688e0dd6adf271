use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turbines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub turbine_id: String,

    pub site_id: String,
    #[sea_orm(belongs_to, from = "site_id", to = "site_id")]
    pub site: HasOne<super::site::Entity>,

    /// Manufacturer model descriptor, e.g. "Vestas V90".
    pub model: String,

    #[sea_orm(has_many)]
    pub blades: HasMany<super::blade::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
