use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{blade, dashboard, maintenance, site, technician, turbine};
use crate::state::AppState;

/// Asset CRUD, the dashboard and the technician page under one router.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/sites", site_routes())
        .nest("/turbines", turbine_routes())
        .nest("/blades", blade_routes())
        .nest("/maintenance", maintenance_routes())
        .nest("/api/dashboard", dashboard_routes())
        .nest("/api/technician", technician_routes())
}

fn site_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(site::list_sites, site::create_site))
        .routes(routes!(site::list_site_turbines))
        .routes(routes!(site::top_sites_by_maintenance))
}

fn turbine_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(turbine::list_turbines, turbine::create_turbine))
        .routes(routes!(turbine::update_turbine))
        .routes(routes!(turbine::list_turbine_blades))
}

fn blade_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(blade::list_blades, blade::create_blade))
        .routes(routes!(blade::update_blade))
        .routes(routes!(blade::list_blade_maintenance))
}

fn maintenance_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            maintenance::list_maintenance,
            maintenance::create_maintenance
        ))
        .routes(routes!(maintenance::update_maintenance))
}

fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(dashboard::summary))
        .routes(routes!(dashboard::trends))
        .routes(routes!(dashboard::priority))
        .routes(routes!(dashboard::issues_by_site))
        .routes(routes!(dashboard::technician_workload))
        .routes(routes!(dashboard::technicians))
        .routes(routes!(dashboard::technician_records))
        .routes(routes!(dashboard::recurring_issues))
        .routes(routes!(dashboard::problem_blades))
        .routes(routes!(dashboard::blades_due))
}

fn technician_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(technician::technicians))
        .routes(routes!(technician::workload))
        .routes(routes!(technician::records))
        .routes(routes!(technician::all_maintenance))
        .routes(routes!(technician::status_counts))
        .routes(routes!(technician::issues))
        .routes(routes!(technician::trend))
        .routes(routes!(technician::technician_status_counts))
        .routes(routes!(technician::status_summary))
        .routes(routes!(technician::summary))
}
