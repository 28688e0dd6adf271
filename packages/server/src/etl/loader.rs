use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::{info, warn};

use super::records::{Batch, BladeRecord, CsvRecord, MaintenanceRecord, SiteRecord, TurbineRecord};
use super::{EtlError, LoadReport};
use crate::entity::{blade, maintenance, site, turbine};

/// A normalized row that can be written to the store.
pub(super) trait Persist: CsvRecord {
    /// Whether the row's parent exists. Roots always pass.
    async fn parent_exists<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr>;

    /// Human-readable parent reference for log lines.
    fn parent_ref(&self) -> String;

    async fn write<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr>;
}

impl Persist for SiteRecord {
    async fn parent_exists<C: ConnectionTrait>(&self, _db: &C) -> Result<bool, DbErr> {
        Ok(true)
    }

    fn parent_ref(&self) -> String {
        String::new()
    }

    async fn write<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        let row = site::ActiveModel {
            site_id: Set(self.site_id.clone()),
            name: Set(self.name.clone()),
            location: Set(self.location.clone()),
        };
        site::Entity::insert(row)
            .on_conflict(
                OnConflict::column(site::Column::SiteId)
                    .update_columns([site::Column::Name, site::Column::Location])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}

impl Persist for TurbineRecord {
    async fn parent_exists<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr> {
        let count = site::Entity::find()
            .filter(site::Column::SiteId.eq(self.site_id.as_str()))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    fn parent_ref(&self) -> String {
        format!("site_id '{}'", self.site_id)
    }

    async fn write<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        let row = turbine::ActiveModel {
            turbine_id: Set(self.turbine_id.clone()),
            site_id: Set(self.site_id.clone()),
            model: Set(self.model.clone()),
        };
        turbine::Entity::insert(row)
            .on_conflict(
                OnConflict::column(turbine::Column::TurbineId)
                    .update_columns([turbine::Column::SiteId, turbine::Column::Model])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}

impl Persist for BladeRecord {
    async fn parent_exists<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr> {
        let count = turbine::Entity::find()
            .filter(turbine::Column::TurbineId.eq(self.turbine_id.as_str()))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    fn parent_ref(&self) -> String {
        format!("turbine_id '{}'", self.turbine_id)
    }

    async fn write<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        let row = blade::ActiveModel {
            blade_id: Set(self.blade_id.clone()),
            turbine_id: Set(self.turbine_id.clone()),
            blade_type: Set(self.blade_type.clone()),
            length: Set(self.length),
        };
        blade::Entity::insert(row)
            .on_conflict(
                OnConflict::column(blade::Column::BladeId)
                    .update_columns([
                        blade::Column::TurbineId,
                        blade::Column::BladeType,
                        blade::Column::Length,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}

impl Persist for MaintenanceRecord {
    async fn parent_exists<C: ConnectionTrait>(&self, db: &C) -> Result<bool, DbErr> {
        let count = blade::Entity::find()
            .filter(blade::Column::BladeId.eq(self.blade_id.as_str()))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    fn parent_ref(&self) -> String {
        format!("blade_id '{}'", self.blade_id)
    }

    /// Plain insert: maintenance has no natural key to upsert on.
    async fn write<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        let row = maintenance::ActiveModel {
            blade_id: Set(self.blade_id.clone()),
            date: Set(self.date),
            status: Set(self.status.clone()),
            issue: Set(self.issue.clone()),
            technician: Set(self.technician.clone()),
            ..Default::default()
        };
        maintenance::Entity::insert(row)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}

/// Write one batch in a single transaction. Every row gets its own savepoint
/// so a failing row is rolled back alone and the rest still commit.
pub(super) async fn load_batch<T: Persist>(
    db: &DatabaseConnection,
    file: &str,
    batch: Batch<T>,
) -> Result<LoadReport, EtlError> {
    let mut report = LoadReport {
        file: file.to_string(),
        duplicates: batch.duplicates.len(),
        incomplete: batch.incomplete,
        invalid: batch.invalid,
        ..Default::default()
    };

    if !batch.duplicates.is_empty() {
        warn!(file, "Skipped duplicate {} keys: {:?}", T::ENTITY, batch.duplicates);
    }

    let txn = db.begin().await?;

    for row in &batch.rows {
        if !row.parent_exists(&txn).await? {
            warn!(file, key = %row.key(), "Skipping {}: unknown {}", T::ENTITY, row.parent_ref());
            report.unknown_parent += 1;
            continue;
        }

        let savepoint = txn.begin().await?;
        match row.write(&savepoint).await {
            Ok(()) => {
                savepoint.commit().await?;
                report.loaded += 1;
            }
            Err(e) => {
                savepoint.rollback().await?;
                warn!(file, key = %row.key(), "Failed to write {}: {}", T::ENTITY, e);
                report.failed += 1;
            }
        }
    }

    txn.commit().await?;
    info!(
        file,
        loaded = report.loaded,
        duplicates = report.duplicates,
        unknown_parent = report.unknown_parent,
        incomplete = report.incomplete,
        invalid = report.invalid,
        failed = report.failed,
        "Loaded {}",
        T::ENTITY
    );

    Ok(report)
}
