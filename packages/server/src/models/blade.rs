use serde::{Deserialize, Serialize};

use super::maintenance::MaintenanceResponse;
use super::shared::{validate_identifier, validate_optional, validate_required};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBladeRequest {
    #[schema(example = "B-001")]
    pub blade_id: String,
    #[schema(example = "T-001")]
    pub turbine_id: String,
    #[serde(rename = "type")]
    #[schema(example = "Carbon Fiber")]
    pub blade_type: String,
    /// Blade length in metres.
    #[schema(example = 45)]
    pub length: i32,
}

/// PATCH body: only the supplied fields change.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBladeRequest {
    #[serde(default, rename = "type")]
    pub blade_type: Option<String>,
    pub length: Option<i32>,
}

/// A blade together with its full maintenance history.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BladeResponse {
    pub blade_id: String,
    pub turbine_id: String,
    #[serde(rename = "type")]
    pub blade_type: String,
    pub length: i32,
    pub maintenance: Vec<MaintenanceResponse>,
}

impl BladeResponse {
    pub fn with_maintenance(
        m: crate::entity::blade::Model,
        maintenance: Vec<MaintenanceResponse>,
    ) -> Self {
        Self {
            blade_id: m.blade_id,
            turbine_id: m.turbine_id,
            blade_type: m.blade_type,
            length: m.length,
            maintenance,
        }
    }
}

fn validate_length(length: i32) -> Result<(), AppError> {
    if length < 0 {
        return Err(AppError::Validation("length must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_blade(req: &CreateBladeRequest) -> Result<(), AppError> {
    validate_identifier("blade_id", &req.blade_id)?;
    validate_identifier("turbine_id", &req.turbine_id)?;
    validate_required("type", &req.blade_type)?;
    validate_length(req.length)
}

pub fn validate_update_blade(req: &UpdateBladeRequest) -> Result<(), AppError> {
    validate_optional("type", req.blade_type.as_deref())?;
    if let Some(length) = req.length {
        validate_length(length)?;
    }
    Ok(())
}
