use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub site_id: String,

    pub name: String,
    pub location: String,

    #[sea_orm(has_many)]
    pub turbines: HasMany<super::turbine::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
