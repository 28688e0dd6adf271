use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::analytics::analytics;
use crate::entity::{site, turbine};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::site::*;
use crate::models::turbine::TurbineResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Sites",
    operation_id = "listSites",
    summary = "List all sites",
    responses(
        (status = 200, description = "All sites ordered by ID", body = Vec<SiteResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_sites(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteResponse>>, AppError> {
    let sites = site::Entity::find()
        .order_by_asc(site::Column::SiteId)
        .all(&state.db)
        .await?;

    Ok(Json(sites.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Sites",
    operation_id = "createSite",
    summary = "Register a new site",
    request_body = CreateSiteRequest,
    responses(
        (status = 201, description = "Site created", body = SiteResponse),
        (status = 400, description = "Validation error or duplicate ID (VALIDATION_ERROR, DUPLICATE_ID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(site_id = %payload.site_id))]
pub async fn create_site(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSiteRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_site(&payload)?;

    let site_id = payload.site_id.trim().to_string();
    let txn = state.db.begin().await?;

    let new_site = site::ActiveModel {
        site_id: Set(site_id.clone()),
        name: Set(payload.name.trim().to_string()),
        location: Set(payload.location.trim().to_string()),
    };
    let model = new_site
        .insert(&txn)
        .await
        .map_err(|e| AppError::from_insert(e, || format!("Site with ID '{site_id}' already exists")))?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(SiteResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/turbines",
    tag = "Sites",
    operation_id = "listSiteTurbines",
    summary = "List the turbines of a site",
    params(("id" = String, Path, description = "Site ID")),
    responses(
        (status = 200, description = "Turbines of the site, empty for an unknown site", body = Vec<TurbineResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_site_turbines(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Vec<TurbineResponse>>, AppError> {
    let turbines = turbine::Entity::find()
        .filter(turbine::Column::SiteId.eq(id))
        .order_by_asc(turbine::Column::TurbineId)
        .all(&state.db)
        .await?;

    Ok(Json(turbines.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/top_sites_by_maintenance",
    tag = "Sites",
    operation_id = "topSitesByMaintenance",
    summary = "Top sites by maintenance volume",
    description = "Up to five sites ranked by the number of maintenance records across their turbines and blades. Sites without any maintenance are omitted.",
    responses(
        (status = 200, description = "Site ranking", body = Vec<TopSiteStats>),
    ),
)]
#[instrument(skip(state))]
pub async fn top_sites_by_maintenance(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopSiteStats>>, AppError> {
    Ok(Json(analytics(&state.db).top_sites().await?))
}
