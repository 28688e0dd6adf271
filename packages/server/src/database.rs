use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder, Table};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{blade, maintenance, site, turbine};

/// Connect to the store and create any missing tables and indexes.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    sync_schema(&db).await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Create the four tables from the entity definitions if they are absent.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("windfarm_server::entity::*")
        .sync(db)
        .await
}

/// Drop every table and recreate the schema from scratch.
pub async fn reset_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Table::drop()
        .table(maintenance::Entity)
        .table(blade::Entity)
        .table(turbine::Entity)
        .table(site::Entity)
        .if_exists()
        .cascade()
        .to_string(PostgresQueryBuilder);

    warn!("Dropping all tables");
    db.execute_unprepared(&stmt).await?;
    info!("All tables dropped");

    sync_schema(db).await?;
    ensure_indexes(db).await?;
    info!("Schema recreated");

    Ok(())
}

/// Ensure the secondary indexes used by the analytics queries exist.
///
/// SeaORM's schema-sync doesn't create composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Per-blade history: recurring issues, overdue inspection, blade listing
    let by_blade = Index::create()
        .if_not_exists()
        .name("idx_maintenance_blade_date")
        .table(maintenance::Entity)
        .col(maintenance::Column::BladeId)
        .col(maintenance::Column::Date)
        .to_string(PostgresQueryBuilder);

    let by_technician = Index::create()
        .if_not_exists()
        .name("idx_maintenance_technician")
        .table(maintenance::Entity)
        .col(maintenance::Column::Technician)
        .to_string(PostgresQueryBuilder);

    for (name, stmt) in [
        ("idx_maintenance_blade_date", by_blade),
        ("idx_maintenance_technician", by_technician),
    ] {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
