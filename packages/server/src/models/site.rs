use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::shared::{validate_identifier, validate_required};
use crate::error::AppError;

/// Request body for registering a wind-farm site.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSiteRequest {
    #[schema(example = "S-001")]
    pub site_id: String,
    #[schema(example = "Hornsea")]
    pub name: String,
    #[schema(example = "North Sea")]
    pub location: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SiteResponse {
    pub site_id: String,
    pub name: String,
    pub location: String,
}

/// One row of the top-sites ranking.
#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct TopSiteStats {
    pub site_id: String,
    pub name: String,
    /// Maintenance records across every blade of every turbine at the site.
    pub total: i64,
}

impl From<crate::entity::site::Model> for SiteResponse {
    fn from(m: crate::entity::site::Model) -> Self {
        Self {
            site_id: m.site_id,
            name: m.name,
            location: m.location,
        }
    }
}

pub fn validate_create_site(req: &CreateSiteRequest) -> Result<(), AppError> {
    validate_identifier("site_id", &req.site_id)?;
    validate_required("name", &req.name)?;
    validate_required("location", &req.location)?;
    Ok(())
}
