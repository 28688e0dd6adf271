use serde::{Deserialize, Serialize};

use super::shared::{validate_identifier, validate_optional, validate_required};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTurbineRequest {
    #[schema(example = "T-001")]
    pub turbine_id: String,
    #[schema(example = "S-001")]
    pub site_id: String,
    #[schema(example = "Vestas V90")]
    pub model: String,
}

/// PATCH body: only the supplied fields change.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateTurbineRequest {
    pub model: Option<String>,
    /// Moves the turbine to another existing site.
    pub site_id: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TurbineResponse {
    pub turbine_id: String,
    pub site_id: String,
    pub model: String,
}

impl From<crate::entity::turbine::Model> for TurbineResponse {
    fn from(m: crate::entity::turbine::Model) -> Self {
        Self {
            turbine_id: m.turbine_id,
            site_id: m.site_id,
            model: m.model,
        }
    }
}

pub fn validate_create_turbine(req: &CreateTurbineRequest) -> Result<(), AppError> {
    validate_identifier("turbine_id", &req.turbine_id)?;
    validate_identifier("site_id", &req.site_id)?;
    validate_required("model", &req.model)?;
    Ok(())
}

pub fn validate_update_turbine(req: &UpdateTurbineRequest) -> Result<(), AppError> {
    validate_optional("model", req.model.as_deref())?;
    if let Some(ref site_id) = req.site_id {
        validate_identifier("site_id", site_id)?;
    }
    Ok(())
}
