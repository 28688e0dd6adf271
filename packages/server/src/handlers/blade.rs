use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blade, maintenance};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blade::*;
use crate::models::maintenance::MaintenanceResponse;
use crate::state::AppState;
use crate::utils::lookup::{find_blade, require_turbine};

/// Load the maintenance history of `blades` in one query and pair each blade
/// with its records, ordered by date then ID.
pub(crate) async fn attach_maintenance<C: ConnectionTrait>(
    db: &C,
    blades: Vec<blade::Model>,
) -> Result<Vec<BladeResponse>, AppError> {
    if blades.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = blades.iter().map(|b| b.blade_id.clone()).collect();
    let records = maintenance::Entity::find()
        .filter(maintenance::Column::BladeId.is_in(ids))
        .order_by_asc(maintenance::Column::Date)
        .order_by_asc(maintenance::Column::MaintenanceId)
        .all(db)
        .await?;

    let mut by_blade: HashMap<String, Vec<MaintenanceResponse>> = HashMap::new();
    for record in records {
        by_blade
            .entry(record.blade_id.clone())
            .or_default()
            .push(record.into());
    }

    Ok(blades
        .into_iter()
        .map(|b| {
            let history = by_blade.remove(&b.blade_id).unwrap_or_default();
            BladeResponse::with_maintenance(b, history)
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blades",
    operation_id = "listBlades",
    summary = "List all blades",
    description = "Returns every blade with its maintenance records embedded.",
    responses(
        (status = 200, description = "All blades ordered by ID", body = Vec<BladeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blades(
    State(state): State<AppState>,
) -> Result<Json<Vec<BladeResponse>>, AppError> {
    let blades = blade::Entity::find()
        .order_by_asc(blade::Column::BladeId)
        .all(&state.db)
        .await?;

    Ok(Json(attach_maintenance(&state.db, blades).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blades",
    operation_id = "createBlade",
    summary = "Register a blade on an existing turbine",
    request_body = CreateBladeRequest,
    responses(
        (status = 201, description = "Blade created", body = BladeResponse),
        (status = 400, description = "Validation error, unknown turbine or duplicate ID (VALIDATION_ERROR, PARENT_NOT_FOUND, DUPLICATE_ID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(blade_id = %payload.blade_id))]
pub async fn create_blade(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBladeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blade(&payload)?;

    let blade_id = payload.blade_id.trim().to_string();
    let turbine_id = payload.turbine_id.trim();
    let txn = state.db.begin().await?;

    require_turbine(&txn, turbine_id).await?;

    let new_blade = blade::ActiveModel {
        blade_id: Set(blade_id.clone()),
        turbine_id: Set(turbine_id.to_string()),
        blade_type: Set(payload.blade_type.trim().to_string()),
        length: Set(payload.length),
    };
    let model = new_blade.insert(&txn).await.map_err(|e| {
        AppError::from_insert(e, || format!("Blade with ID '{blade_id}' already exists"))
    })?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(BladeResponse::with_maintenance(model, Vec::new())),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blades",
    operation_id = "updateBlade",
    summary = "Update a blade",
    description = "Partially updates a blade. Only provided fields are changed.",
    params(("id" = String, Path, description = "Blade ID")),
    request_body = UpdateBladeRequest,
    responses(
        (status = 200, description = "Blade updated", body = BladeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blade not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_blade(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateBladeRequest>,
) -> Result<Json<BladeResponse>, AppError> {
    validate_update_blade(&payload)?;

    let model = if payload == UpdateBladeRequest::default() {
        find_blade(&state.db, &id).await?
    } else {
        let txn = state.db.begin().await?;

        let existing = find_blade(&txn, &id).await?;
        let mut active: blade::ActiveModel = existing.into();

        if let Some(ref blade_type) = payload.blade_type {
            active.blade_type = Set(blade_type.trim().to_string());
        }
        if let Some(length) = payload.length {
            active.length = Set(length);
        }

        let model = active.update(&txn).await?;
        txn.commit().await?;
        model
    };

    let mut with_history = attach_maintenance(&state.db, vec![model]).await?;
    with_history
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Blade '{id}' not found")))
}

#[utoipa::path(
    get,
    path = "/{id}/maintenance",
    tag = "Blades",
    operation_id = "listBladeMaintenance",
    summary = "List the maintenance records of a blade",
    params(("id" = String, Path, description = "Blade ID")),
    responses(
        (status = 200, description = "Records ordered by date then ID, empty for an unknown blade", body = Vec<MaintenanceResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blade_maintenance(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let records = maintenance::Entity::find()
        .filter(maintenance::Column::BladeId.eq(id))
        .order_by_asc(maintenance::Column::Date)
        .order_by_asc(maintenance::Column::MaintenanceId)
        .all(&state.db)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
