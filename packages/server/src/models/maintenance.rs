use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shared::{validate_identifier, validate_optional, validate_required};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMaintenanceRequest {
    #[schema(example = "B-001")]
    pub blade_id: String,
    #[schema(example = "2026-03-14")]
    pub date: NaiveDate,
    #[schema(example = "Pending")]
    pub status: String,
    #[schema(example = "Leading Edge Erosion")]
    pub issue: String,
    #[schema(example = "Alice Moreau")]
    pub technician: String,
}

/// PATCH body: only the supplied fields change. Blade and date are fixed.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateMaintenanceRequest {
    pub status: Option<String>,
    pub issue: Option<String>,
    pub technician: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MaintenanceResponse {
    pub maintenance_id: i32,
    pub blade_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub issue: String,
    pub technician: String,
}

impl From<crate::entity::maintenance::Model> for MaintenanceResponse {
    fn from(m: crate::entity::maintenance::Model) -> Self {
        Self {
            maintenance_id: m.maintenance_id,
            blade_id: m.blade_id,
            date: m.date,
            status: m.status,
            issue: m.issue,
            technician: m.technician,
        }
    }
}

pub fn validate_create_maintenance(req: &CreateMaintenanceRequest) -> Result<(), AppError> {
    validate_identifier("blade_id", &req.blade_id)?;
    validate_required("status", &req.status)?;
    validate_required("issue", &req.issue)?;
    validate_required("technician", &req.technician)?;
    Ok(())
}

pub fn validate_update_maintenance(req: &UpdateMaintenanceRequest) -> Result<(), AppError> {
    validate_optional("status", req.status.as_deref())?;
    validate_optional("issue", req.issue.as_deref())?;
    validate_optional("technician", req.technician.as_deref())?;
    Ok(())
}
