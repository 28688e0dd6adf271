use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::analytics::analytics;
use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::models::analytics::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/summary",
    tag = "Dashboard",
    operation_id = "dashboardSummary",
    summary = "Headline totals",
    description = "Blade and record totals, pending records, and distinct blades inspected during the current calendar year.",
    responses(
        (status = 200, description = "Totals", body = DashboardSummary),
        (status = 500, description = "Store error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(analytics(&state.db).summary(today).await?))
}

#[utoipa::path(
    get,
    path = "/trends",
    tag = "Dashboard",
    operation_id = "dashboardTrends",
    summary = "Status counts, issue distribution and the trailing twelve-month trend",
    responses(
        (status = 200, description = "Chart series", body = TrendsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn trends(State(state): State<AppState>) -> Result<Json<TrendsResponse>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(analytics(&state.db).trends(today).await?))
}

#[utoipa::path(
    get,
    path = "/priority",
    tag = "Dashboard",
    operation_id = "dashboardPriority",
    summary = "Open records to act on first",
    description = "Up to ten records not yet `Completed`, ordered by status then date.",
    responses(
        (status = 200, description = "Priority list", body = Vec<PriorityItem>),
    ),
)]
#[instrument(skip(state))]
pub async fn priority(State(state): State<AppState>) -> Result<Json<Vec<PriorityItem>>, AppError> {
    Ok(Json(analytics(&state.db).priority_list().await?))
}

#[utoipa::path(
    get,
    path = "/issues-by-site",
    tag = "Dashboard",
    operation_id = "issuesBySite",
    summary = "Issue counts per site",
    description = "Nested map of `site_id -> issue -> count`.",
    responses(
        (status = 200, description = "Issue matrix", body = BTreeMap<String, BTreeMap<String, i64>>),
    ),
)]
#[instrument(skip(state))]
pub async fn issues_by_site(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, BTreeMap<String, i64>>>, AppError> {
    Ok(Json(analytics(&state.db).issues_by_site().await?))
}

#[utoipa::path(
    get,
    path = "/technician-workload",
    tag = "Dashboard",
    operation_id = "dashboardTechnicianWorkload",
    summary = "Records per technician",
    responses(
        (status = 200, description = "Workload", body = Vec<TechnicianCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn technician_workload(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechnicianCount>>, AppError> {
    Ok(Json(analytics(&state.db).technician_workload().await?))
}

#[utoipa::path(
    get,
    path = "/technicians",
    tag = "Dashboard",
    operation_id = "dashboardTechnicians",
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
    path = "/technicians/{name}/maintenance",
    tag = "Dashboard",
    operation_id = "dashboardTechnicianRecords",
    summary = "Records handled by one technician",
    params(("name" = String, Path, description = "Technician name")),
    responses(
        (status = 200, description = "Records, newest first", body = Vec<TechnicianRecord>),
    ),
)]
#[instrument(skip(state))]
pub async fn technician_records(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<TechnicianRecord>>, AppError> {
    Ok(Json(analytics(&state.db).technician_records(&name).await?))
}

#[utoipa::path(
    get,
    path = "/recurring-issues",
    tag = "Dashboard",
    operation_id = "recurringIssues",
    summary = "Issues seen repeatedly on the same blade",
    responses(
        (status = 200, description = "(blade, issue) pairs logged at least twice", body = Vec<RecurringIssue>),
    ),
)]
#[instrument(skip(state))]
pub async fn recurring_issues(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecurringIssue>>, AppError> {
    Ok(Json(analytics(&state.db).recurring_issues().await?))
}

#[utoipa::path(
    get,
    path = "/problem-blades",
    tag = "Dashboard",
    operation_id = "problemBlades",
    summary = "Blades with the most maintenance",
    responses(
        (status = 200, description = "Top five blades", body = Vec<ProblemBlade>),
    ),
)]
#[instrument(skip(state))]
pub async fn problem_blades(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProblemBlade>>, AppError> {
    Ok(Json(analytics(&state.db).problem_blades().await?))
}

#[utoipa::path(
    get,
    path = "/blades-due",
    tag = "Dashboard",
    operation_id = "bladesDue",
    summary = "Blades overdue for inspection",
    description = "Blades whose latest maintenance is more than 180 days old.",
    responses(
        (status = 200, description = "Overdue blades", body = Vec<BladeDue>),
    ),
)]
#[instrument(skip(state))]
pub async fn blades_due(State(state): State<AppState>) -> Result<Json<Vec<BladeDue>>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(analytics(&state.db).blades_due(today).await?))
}
