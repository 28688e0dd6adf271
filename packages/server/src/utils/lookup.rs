use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entity::{blade, maintenance, site, turbine};
use crate::error::AppError;

/// Look up a turbine by ID, returning 404 if not found.
pub async fn find_turbine<C: ConnectionTrait>(
    db: &C,
    turbine_id: &str,
) -> Result<turbine::Model, AppError> {
    turbine::Entity::find_by_id(turbine_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Turbine '{turbine_id}' not found")))
}

/// Look up a blade by ID, returning 404 if not found.
pub async fn find_blade<C: ConnectionTrait>(db: &C, blade_id: &str) -> Result<blade::Model, AppError> {
    blade::Entity::find_by_id(blade_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blade '{blade_id}' not found")))
}

/// Look up a maintenance record by ID, returning 404 if not found.
pub async fn find_maintenance<C: ConnectionTrait>(
    db: &C,
    maintenance_id: i32,
) -> Result<maintenance::Model, AppError> {
    maintenance::Entity::find_by_id(maintenance_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Maintenance record ID '{maintenance_id}' not found"))
        })
}

/// Check that a referenced site exists, returning 400 PARENT_NOT_FOUND otherwise.
pub async fn require_site<C: ConnectionTrait>(db: &C, site_id: &str) -> Result<(), AppError> {
    let count = site::Entity::find()
        .filter(site::Column::SiteId.eq(site_id))
        .count(db)
        .await?;
    if count == 0 {
        return Err(AppError::parent_not_found("Site", site_id));
    }
    Ok(())
}

/// Check that a referenced turbine exists, returning 400 PARENT_NOT_FOUND otherwise.
pub async fn require_turbine<C: ConnectionTrait>(db: &C, turbine_id: &str) -> Result<(), AppError> {
    let count = turbine::Entity::find()
        .filter(turbine::Column::TurbineId.eq(turbine_id))
        .count(db)
        .await?;
    if count == 0 {
        return Err(AppError::parent_not_found("Turbine", turbine_id));
    }
    Ok(())
}

/// Check that a referenced blade exists, returning 400 PARENT_NOT_FOUND otherwise.
pub async fn require_blade<C: ConnectionTrait>(db: &C, blade_id: &str) -> Result<(), AppError> {
    let count = blade::Entity::find()
        .filter(blade::Column::BladeId.eq(blade_id))
        .count(db)
        .await?;
    if count == 0 {
        return Err(AppError::parent_not_found("Blade", blade_id));
    }
    Ok(())
}
