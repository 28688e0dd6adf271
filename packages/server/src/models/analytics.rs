//! Response shapes of the dashboard and technician endpoints.
//!
//! These serialize in camelCase, which is what the dashboard frontend reads.
//! Field names stay snake_case in Rust so `FromQueryResult` can bind them to
//! the column aliases of the aggregation queries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_blades: u64,
    pub total_maintenances: u64,
    /// Records whose status is exactly "Pending".
    pub pending: u64,
    /// Distinct blades with at least one record dated in the current calendar year.
    pub maintained_this_year: u64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// One slice of the issue pie chart.
#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct IssueShare {
    pub issue: String,
    pub value: i64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct IssueCount {
    pub issue: String,
    pub count: i64,
}

/// Record count of one calendar month.
#[derive(Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct MonthlyTrendPoint {
    /// Abbreviated month name, e.g. "Mar".
    pub month: String,
    /// Year and month, e.g. "2026-03". Disambiguates the two partial months
    /// at either end of a twelve-month window.
    pub period: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct MonthCount {
    /// Year and month, e.g. "2026-03".
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub status_counts: Vec<StatusCount>,
    pub issue_distribution: Vec<IssueShare>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityItem {
    pub blade_id: String,
    pub issue: String,
    pub status: String,
    pub date: NaiveDate,
    pub technician: String,
}

/// `site_id -> issue -> count`.
pub type IssuesBySite = BTreeMap<String, BTreeMap<String, i64>>;

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct TechnicianCount {
    pub technician: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianRecord {
    pub blade_id: String,
    pub issue: String,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLogEntry {
    pub technician: String,
    pub blade_id: String,
    pub issue: String,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecurringIssue {
    pub blade_id: String,
    pub issue: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemBlade {
    pub blade_id: String,
    pub maintenance_count: i64,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BladeDue {
    pub blade_id: String,
    pub last_maintained: NaiveDate,
}
