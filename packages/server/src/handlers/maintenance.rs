use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::maintenance;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::maintenance::*;
use crate::state::AppState;
use crate::utils::lookup::{find_maintenance, require_blade};

#[utoipa::path(
    get,
    path = "/",
    tag = "Maintenance",
    operation_id = "listMaintenance",
    summary = "List all maintenance records",
    responses(
        (status = 200, description = "All records ordered by ID", body = Vec<MaintenanceResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_maintenance(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let records = maintenance::Entity::find()
        .order_by_asc(maintenance::Column::MaintenanceId)
        .all(&state.db)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Maintenance",
    operation_id = "createMaintenance",
    summary = "Record a maintenance event on an existing blade",
    description = "The record identifier is assigned by the store.",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Record created", body = MaintenanceResponse),
        (status = 400, description = "Validation error or unknown blade (VALIDATION_ERROR, PARENT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(blade_id = %payload.blade_id))]
pub async fn create_maintenance(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMaintenanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_maintenance(&payload)?;

    let blade_id = payload.blade_id.trim();
    let txn = state.db.begin().await?;

    require_blade(&txn, blade_id).await?;

    let new_record = maintenance::ActiveModel {
        blade_id: Set(blade_id.to_string()),
        date: Set(payload.date),
        status: Set(payload.status.trim().to_string()),
        issue: Set(payload.issue.trim().to_string()),
        technician: Set(payload.technician.trim().to_string()),
        ..Default::default()
    };
    let model = new_record.insert(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(MaintenanceResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Maintenance",
    operation_id = "updateMaintenance",
    summary = "Update a maintenance record",
    description = "Partially updates status, issue or technician. Blade and date are fixed.",
    params(("id" = i32, Path, description = "Maintenance record ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Record updated", body = MaintenanceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Record not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_maintenance(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    validate_update_maintenance(&payload)?;

    if payload == UpdateMaintenanceRequest::default() {
        let existing = find_maintenance(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_maintenance(&txn, id).await?;
    let mut active: maintenance::ActiveModel = existing.into();

    if let Some(ref status) = payload.status {
        active.status = Set(status.trim().to_string());
    }
    if let Some(ref issue) = payload.issue {
        active.issue = Set(issue.trim().to_string());
    }
    if let Some(ref technician) = payload.technician {
        active.technician = Set(technician.trim().to_string());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}
