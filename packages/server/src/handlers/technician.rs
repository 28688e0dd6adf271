//! Read-only views for the technician page.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::analytics::analytics;
use crate::error::AppError;
use crate::extractors::path::AppPath;
use crate::models::analytics::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/technicians",
    tag = "Technicians",
    operation_id = "listTechnicians",
    summary = "Distinct technician names",
    responses(
        (status = 200, description = "Names in alphabetical order", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn technicians(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(analytics(&state.db).technicians().await?))
}

#[utoipa::path(
    get,
    path = "/technician-workload",
    tag = "Technicians",
    operation_id = "technicianWorkload",
    summary = "Records per technician",
    responses(
        (status = 200, description = "Workload", body = Vec<TechnicianCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn workload(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechnicianCount>>, AppError> {
    Ok(Json(analytics(&state.db).technician_workload().await?))
}

#[utoipa::path(
    get,
    path = "/technicians/{name}/maintenance",
    tag = "Technicians",
    operation_id = "technicianRecords",
    summary = "Records handled by one technician",
    params(("name" = String, Path, description = "Technician name")),
    responses(
        (status = 200, description = "Records, newest first", body = Vec<TechnicianRecord>),
    ),
)]
#[instrument(skip(state))]
pub async fn records(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<TechnicianRecord>>, AppError> {
    Ok(Json(analytics(&state.db).technician_records(&name).await?))
}

#[utoipa::path(
    get,
    path = "/all-maintenance",
    tag = "Technicians",
    operation_id = "allMaintenance",
    summary = "Every record of every technician",
    responses(
        (status = 200, description = "Records, newest first", body = Vec<MaintenanceLogEntry>),
    ),
)]
#[instrument(skip(state))]
pub async fn all_maintenance(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceLogEntry>>, AppError> {
    Ok(Json(analytics(&state.db).maintenance_log().await?))
}

#[utoipa::path(
    get,
    path = "/status-counts",
    tag = "Technicians",
    operation_id = "statusCounts",
    summary = "Records per status",
    responses(
        (status = 200, description = "Status counts", body = Vec<StatusCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn status_counts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCount>>, AppError> {
    Ok(Json(analytics(&state.db).status_counts(None).await?))
}

#[utoipa::path(
    get,
    path = "/technicians/{name}/issues",
    tag = "Technicians",
    operation_id = "technicianIssues",
    summary = "Issue counts of one technician",
    params(("name" = String, Path, description = "Technician name")),
    responses(
        (status = 200, description = "Issue counts", body = Vec<IssueCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn issues(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<IssueCount>>, AppError> {
    Ok(Json(analytics(&state.db).technician_issue_counts(&name).await?))
}

#[utoipa::path(
    get,
    path = "/technicians/{name}/trend",
    tag = "Technicians",
    operation_id = "technicianTrend",
    summary = "Monthly record counts of one technician",
    params(("name" = String, Path, description = "Technician name")),
    responses(
        (status = 200, description = "Counts per `YYYY-MM`, ascending", body = Vec<MonthCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn trend(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<MonthCount>>, AppError> {
    Ok(Json(analytics(&state.db).technician_monthly_counts(&name).await?))
}

#[utoipa::path(
    get,
    path = "/technicians/{name}/status-counts",
    tag = "Technicians",
    operation_id = "technicianStatusCounts",
    summary = "Status counts of one technician",
    params(("name" = String, Path, description = "Technician name")),
    responses(
        (status = 200, description = "Status counts", body = Vec<StatusCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn technician_status_counts(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<StatusCount>>, AppError> {
    Ok(Json(analytics(&state.db).status_counts(Some(&name)).await?))
}

#[utoipa::path(
    get,
    path = "/technicians/status-summary",
    tag = "Technicians",
    operation_id = "statusSummary",
    summary = "Records per status as a map",
    responses(
        (status = 200, description = "`{status: count}`", body = BTreeMap<String, i64>),
    ),
)]
#[instrument(skip(state))]
pub async fn status_summary(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, i64>>, AppError> {
    Ok(Json(analytics(&state.db).status_summary().await?))
}

#[utoipa::path(
    get,
    path = "/technicians/summary",
    tag = "Technicians",
    operation_id = "technicianSummary",
    summary = "Records per technician",
    responses(
        (status = 200, description = "Workload", body = Vec<TechnicianCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechnicianCount>>, AppError> {
    Ok(Json(analytics(&state.db).technician_workload().await?))
}
