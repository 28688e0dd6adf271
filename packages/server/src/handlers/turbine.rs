use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blade, turbine};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::handlers::blade::attach_maintenance;
use crate::models::blade::BladeResponse;
use crate::models::turbine::*;
use crate::state::AppState;
use crate::utils::lookup::{find_turbine, require_site};

#[utoipa::path(
    get,
    path = "/",
    tag = "Turbines",
    operation_id = "listTurbines",
    summary = "List all turbines",
    responses(
        (status = 200, description = "All turbines ordered by ID", body = Vec<TurbineResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_turbines(
    State(state): State<AppState>,
) -> Result<Json<Vec<TurbineResponse>>, AppError> {
    let turbines = turbine::Entity::find()
        .order_by_asc(turbine::Column::TurbineId)
        .all(&state.db)
        .await?;

    Ok(Json(turbines.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Turbines",
    operation_id = "createTurbine",
    summary = "Register a turbine at an existing site",
    request_body = CreateTurbineRequest,
    responses(
        (status = 201, description = "Turbine created", body = TurbineResponse),
        (status = 400, description = "Validation error, unknown site or duplicate ID (VALIDATION_ERROR, PARENT_NOT_FOUND, DUPLICATE_ID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(turbine_id = %payload.turbine_id))]
pub async fn create_turbine(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTurbineRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_turbine(&payload)?;

    let turbine_id = payload.turbine_id.trim().to_string();
    let site_id = payload.site_id.trim();
    let txn = state.db.begin().await?;

    require_site(&txn, site_id).await?;

    let new_turbine = turbine::ActiveModel {
        turbine_id: Set(turbine_id.clone()),
        site_id: Set(site_id.to_string()),
        model: Set(payload.model.trim().to_string()),
    };
    let model = new_turbine.insert(&txn).await.map_err(|e| {
        AppError::from_insert(e, || format!("Turbine with ID '{turbine_id}' already exists"))
    })?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(TurbineResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Turbines",
    operation_id = "updateTurbine",
    summary = "Update a turbine",
    description = "Partially updates a turbine. Only provided fields are changed. A new `site_id` must reference an existing site.",
    params(("id" = String, Path, description = "Turbine ID")),
    request_body = UpdateTurbineRequest,
    responses(
        (status = 200, description = "Turbine updated", body = TurbineResponse),
        (status = 400, description = "Validation error or unknown site (VALIDATION_ERROR, PARENT_NOT_FOUND)", body = ErrorBody),
        (status = 404, description = "Turbine not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_turbine(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateTurbineRequest>,
) -> Result<Json<TurbineResponse>, AppError> {
    validate_update_turbine(&payload)?;

    if payload == UpdateTurbineRequest::default() {
        let existing = find_turbine(&state.db, &id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_turbine(&txn, &id).await?;
    let mut active: turbine::ActiveModel = existing.into();

    if let Some(ref model) = payload.model {
        active.model = Set(model.trim().to_string());
    }
    if let Some(ref site_id) = payload.site_id {
        let site_id = site_id.trim();
        require_site(&txn, site_id).await?;
        active.site_id = Set(site_id.to_string());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/blades",
    tag = "Turbines",
    operation_id = "listTurbineBlades",
    summary = "List the blades of a turbine",
    params(("id" = String, Path, description = "Turbine ID")),
    responses(
        (status = 200, description = "Blades of the turbine with their maintenance history, empty for an unknown turbine", body = Vec<BladeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_turbine_blades(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Vec<BladeResponse>>, AppError> {
    let blades = blade::Entity::find()
        .filter(blade::Column::TurbineId.eq(id))
        .order_by_asc(blade::Column::BladeId)
        .all(&state.db)
        .await?;

    Ok(Json(attach_maintenance(&state.db, blades).await?))
}
