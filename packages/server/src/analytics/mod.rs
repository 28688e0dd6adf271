//! Read-only aggregations over the maintenance ledger.
//!
//! Every query here is idempotent and has no side effects. Queries that
//! depend on the current date take `today` explicitly so callers (and tests)
//! control the clock.

mod window;

pub use window::{calendar_year, month_label, overdue_cutoff, trend_window_start};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::ExprTrait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationDef,
};

use crate::entity::{blade, maintenance, site, turbine};
use crate::models::analytics::*;
use crate::models::site::TopSiteStats;

/// Status value counted as outstanding work on the dashboard.
pub const STATUS_PENDING: &str = "Pending";
/// Status value excluded from the priority list.
pub const STATUS_COMPLETED: &str = "Completed";
/// Maximum rows of the priority list.
pub const PRIORITY_LIMIT: u64 = 10;
/// Maximum rows of the problem-blade and top-site rankings.
pub const RANKING_LIMIT: u64 = 5;
/// Minimum occurrences of a (blade, issue) pair to count as recurring.
pub const RECURRING_THRESHOLD: i64 = 2;

/// Postgres expression bucketing a record into its `YYYY-MM` month.
const MONTH_BUCKET: &str = r#"TO_CHAR("maintenance"."date", 'YYYY-MM')"#;

/// `maintenance.blade_id -> blades.blade_id`
fn maintenance_blade() -> RelationDef {
    maintenance::Entity::belongs_to(blade::Entity)
        .from(maintenance::Column::BladeId)
        .to(blade::Column::BladeId)
        .into()
}

/// `blades.turbine_id -> turbines.turbine_id`
fn blade_turbine() -> RelationDef {
    blade::Entity::belongs_to(turbine::Entity)
        .from(blade::Column::TurbineId)
        .to(turbine::Column::TurbineId)
        .into()
}

/// `turbines.site_id -> sites.site_id`
fn turbine_site() -> RelationDef {
    turbine::Entity::belongs_to(site::Entity)
        .from(turbine::Column::SiteId)
        .to(site::Column::SiteId)
        .into()
}

pub struct AnalyticsService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AnalyticsService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Headline totals of the dashboard.
    pub async fn summary(&self, today: NaiveDate) -> Result<DashboardSummary, DbErr> {
        let total_blades = blade::Entity::find().count(self.conn).await?;
        let total_maintenances = maintenance::Entity::find().count(self.conn).await?;
        let pending = maintenance::Entity::find()
            .filter(maintenance::Column::Status.eq(STATUS_PENDING))
            .count(self.conn)
            .await?;

        let (year_start, year_end) = calendar_year(today);
        let maintained_this_year = maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .distinct()
            .filter(maintenance::Column::Date.between(year_start, year_end))
            .count(self.conn)
            .await?;

        Ok(DashboardSummary {
            total_blades,
            total_maintenances,
            pending,
            maintained_this_year,
        })
    }

    /// Record count per status, optionally restricted to one technician.
    pub async fn status_counts(&self, technician: Option<&str>) -> Result<Vec<StatusCount>, DbErr> {
        let mut query = maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Status)
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .group_by(maintenance::Column::Status)
            .order_by_asc(maintenance::Column::Status);

        if let Some(name) = technician {
            query = query.filter(maintenance::Column::Technician.eq(name));
        }

        query.into_model::<StatusCount>().all(self.conn).await
    }

    /// Record count per status as a `{status: count}` map.
    pub async fn status_summary(&self) -> Result<BTreeMap<String, i64>, DbErr> {
        Ok(self
            .status_counts(None)
            .await?
            .into_iter()
            .map(|row| (row.status, row.count))
            .collect())
    }

    /// Record count per issue value, shaped for the pie chart.
    pub async fn issue_distribution(&self) -> Result<Vec<IssueShare>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Issue)
            .column_as(maintenance::Column::MaintenanceId.count(), "value")
            .group_by(maintenance::Column::Issue)
            .order_by_asc(maintenance::Column::Issue)
            .into_model::<IssueShare>()
            .all(self.conn)
            .await
    }

    /// Record count per calendar month over the trailing twelve months,
    /// oldest month first.
    pub async fn monthly_trend(&self, today: NaiveDate) -> Result<Vec<MonthlyTrendPoint>, DbErr> {
        let rows: Vec<(String, i64)> = maintenance::Entity::find()
            .select_only()
            .column_as(Expr::cust(MONTH_BUCKET), "period")
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .filter(maintenance::Column::Date.gte(trend_window_start(today)))
            .group_by(Expr::cust(MONTH_BUCKET))
            .order_by_asc(Expr::cust(MONTH_BUCKET))
            .into_tuple()
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(period, count)| MonthlyTrendPoint {
                month: month_label(&period),
                period,
                count,
            })
            .collect())
    }

    pub async fn trends(&self, today: NaiveDate) -> Result<TrendsResponse, DbErr> {
        Ok(TrendsResponse {
            status_counts: self.status_counts(None).await?,
            issue_distribution: self.issue_distribution().await?,
            monthly_trend: self.monthly_trend(today).await?,
        })
    }

    /// Outstanding records, most urgent first: status ascending, then oldest date.
    pub async fn priority_list(&self) -> Result<Vec<PriorityItem>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .column(maintenance::Column::Issue)
            .column(maintenance::Column::Status)
            .column(maintenance::Column::Date)
            .column(maintenance::Column::Technician)
            .filter(maintenance::Column::Status.ne(STATUS_COMPLETED))
            .order_by_asc(maintenance::Column::Status)
            .order_by_asc(maintenance::Column::Date)
            .order_by_asc(maintenance::Column::MaintenanceId)
            .limit(PRIORITY_LIMIT)
            .into_model::<PriorityItem>()
            .all(self.conn)
            .await
    }

    /// Nested `site -> issue -> count` matrix over the full hierarchy.
    pub async fn issues_by_site(&self) -> Result<IssuesBySite, DbErr> {
        let rows: Vec<(String, String, i64)> = maintenance::Entity::find()
            .select_only()
            .column(site::Column::SiteId)
            .column(maintenance::Column::Issue)
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .join(JoinType::InnerJoin, maintenance_blade())
            .join(JoinType::InnerJoin, blade_turbine())
            .join(JoinType::InnerJoin, turbine_site())
            .group_by(site::Column::SiteId)
            .group_by(maintenance::Column::Issue)
            .into_tuple()
            .all(self.conn)
            .await?;

        let mut matrix = IssuesBySite::new();
        for (site_id, issue, count) in rows {
            matrix.entry(site_id).or_default().insert(issue, count);
        }
        Ok(matrix)
    }

    /// Record count per technician, alphabetical.
    pub async fn technician_workload(&self) -> Result<Vec<TechnicianCount>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Technician)
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .group_by(maintenance::Column::Technician)
            .order_by_asc(maintenance::Column::Technician)
            .into_model::<TechnicianCount>()
            .all(self.conn)
            .await
    }

    /// Distinct technician names, alphabetical.
    pub async fn technicians(&self) -> Result<Vec<String>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Technician)
            .distinct()
            .order_by_asc(maintenance::Column::Technician)
            .into_tuple()
            .all(self.conn)
            .await
    }

    /// Every record handled by one technician, newest first.
    pub async fn technician_records(&self, technician: &str) -> Result<Vec<TechnicianRecord>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .column(maintenance::Column::Issue)
            .column(maintenance::Column::Status)
            .column(maintenance::Column::Date)
            .filter(maintenance::Column::Technician.eq(technician))
            .order_by(maintenance::Column::Date, Order::Desc)
            .order_by(maintenance::Column::MaintenanceId, Order::Desc)
            .into_model::<TechnicianRecord>()
            .all(self.conn)
            .await
    }

    /// Every record of every technician, newest first.
    pub async fn maintenance_log(&self) -> Result<Vec<MaintenanceLogEntry>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Technician)
            .column(maintenance::Column::BladeId)
            .column(maintenance::Column::Issue)
            .column(maintenance::Column::Status)
            .column(maintenance::Column::Date)
            .order_by(maintenance::Column::Date, Order::Desc)
            .order_by(maintenance::Column::MaintenanceId, Order::Desc)
            .into_model::<MaintenanceLogEntry>()
            .all(self.conn)
            .await
    }

    /// Record count per issue for one technician.
    pub async fn technician_issue_counts(&self, technician: &str) -> Result<Vec<IssueCount>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::Issue)
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .filter(maintenance::Column::Technician.eq(technician))
            .group_by(maintenance::Column::Issue)
            .order_by_asc(maintenance::Column::Issue)
            .into_model::<IssueCount>()
            .all(self.conn)
            .await
    }

    /// Record count per `YYYY-MM` month for one technician, all time, ascending.
    pub async fn technician_monthly_counts(&self, technician: &str) -> Result<Vec<MonthCount>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column_as(Expr::cust(MONTH_BUCKET), "month")
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .filter(maintenance::Column::Technician.eq(technician))
            .group_by(Expr::cust(MONTH_BUCKET))
            .order_by_asc(Expr::cust(MONTH_BUCKET))
            .into_model::<MonthCount>()
            .all(self.conn)
            .await
    }

    /// (blade, issue) pairs logged at least twice.
    pub async fn recurring_issues(&self) -> Result<Vec<RecurringIssue>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .column(maintenance::Column::Issue)
            .column_as(maintenance::Column::MaintenanceId.count(), "count")
            .group_by(maintenance::Column::BladeId)
            .group_by(maintenance::Column::Issue)
            .having(Expr::expr(maintenance::Column::MaintenanceId.count()).gte(RECURRING_THRESHOLD))
            .order_by_asc(maintenance::Column::BladeId)
            .order_by_asc(maintenance::Column::Issue)
            .into_model::<RecurringIssue>()
            .all(self.conn)
            .await
    }

    /// The five blades with the most records. Ties fall back to blade id.
    pub async fn problem_blades(&self) -> Result<Vec<ProblemBlade>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .column_as(maintenance::Column::MaintenanceId.count(), "maintenance_count")
            .group_by(maintenance::Column::BladeId)
            .order_by(maintenance::Column::MaintenanceId.count(), Order::Desc)
            .order_by_asc(maintenance::Column::BladeId)
            .limit(RANKING_LIMIT)
            .into_model::<ProblemBlade>()
            .all(self.conn)
            .await
    }

    /// Blades whose latest record is older than the inspection interval.
    pub async fn blades_due(&self, today: NaiveDate) -> Result<Vec<BladeDue>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(maintenance::Column::BladeId)
            .column_as(maintenance::Column::Date.max(), "last_maintained")
            .group_by(maintenance::Column::BladeId)
            .having(Expr::expr(maintenance::Column::Date.max()).lt(overdue_cutoff(today)))
            .order_by_asc(maintenance::Column::BladeId)
            .into_model::<BladeDue>()
            .all(self.conn)
            .await
    }

    /// The five sites with the most records across their turbines and blades.
    /// Ties fall back to site id.
    pub async fn top_sites(&self) -> Result<Vec<TopSiteStats>, DbErr> {
        maintenance::Entity::find()
            .select_only()
            .column(site::Column::SiteId)
            .column(site::Column::Name)
            .column_as(maintenance::Column::MaintenanceId.count(), "total")
            .join(JoinType::InnerJoin, maintenance_blade())
            .join(JoinType::InnerJoin, blade_turbine())
            .join(JoinType::InnerJoin, turbine_site())
            .group_by(site::Column::SiteId)
            .group_by(site::Column::Name)
            .order_by(maintenance::Column::MaintenanceId.count(), Order::Desc)
            .order_by_asc(site::Column::SiteId)
            .limit(RANKING_LIMIT)
            .into_model::<TopSiteStats>()
            .all(self.conn)
            .await
    }
}

/// Create an AnalyticsService over any connection or transaction.
pub fn analytics<C: ConnectionTrait>(conn: &C) -> AnalyticsService<'_, C> {
    AnalyticsService::new(conn)
}
