//! Batch loader for the CSV asset snapshots.
//!
//! Files are read in dependency order (sites, turbines, blades, maintenance)
//! so each file can resolve parents written by the previous one. Bad rows are
//! logged and counted, never fatal. Only an unreadable file or a failed
//! commit aborts the run.

mod loader;
mod normalize;
mod records;

use std::fs::File;
use std::path::{Path, PathBuf};

use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::database::{ensure_indexes, sync_schema};
use loader::{Persist, load_batch};
use records::{BladeRecord, MaintenanceRecord, SiteRecord, TurbineRecord, parse_batch};

pub const SITES_FILE: &str = "Site Table.csv";
pub const TURBINES_FILE: &str = "Turbines and Blades.csv";
pub const BLADES_FILE: &str = "Blade Table.csv";
pub const MAINTENANCE_FILE: &str = "Blade Maintenance.csv";

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV in {file}: {source}")]
    Csv { file: String, source: csv::Error },

    #[error("{file} is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// Outcome of loading one file.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub file: String,
    pub loaded: usize,
    /// Rows whose key repeated an earlier row of the same file.
    pub duplicates: usize,
    pub unknown_parent: usize,
    /// Rows with a required field missing or blank.
    pub incomplete: usize,
    /// Rows with an unparseable date or length.
    pub invalid: usize,
    /// Rows rejected by the store.
    pub failed: usize,
}

async fn load_file<T: Persist>(
    db: &DatabaseConnection,
    data_dir: &Path,
    file: &str,
) -> Result<LoadReport, EtlError> {
    let path = data_dir.join(file);
    let reader = File::open(&path).map_err(|source| EtlError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Reading {}", file);

    let batch = parse_batch::<T, _>(file, reader)?;
    load_batch(db, file, batch).await
}

/// Create any missing tables, then load all four snapshot files from
/// `data_dir` in dependency order.
pub async fn run_all(db: &DatabaseConnection, data_dir: &Path) -> Result<Vec<LoadReport>, EtlError> {
    sync_schema(db).await?;
    ensure_indexes(db).await?;

    let reports = vec![
        load_file::<SiteRecord>(db, data_dir, SITES_FILE).await?,
        load_file::<TurbineRecord>(db, data_dir, TURBINES_FILE).await?,
        load_file::<BladeRecord>(db, data_dir, BLADES_FILE).await?,
        load_file::<MaintenanceRecord>(db, data_dir, MAINTENANCE_FILE).await?,
    ];

    let loaded: usize = reports.iter().map(|r| r.loaded).sum();
    info!(loaded, data_dir = %data_dir.display(), "Batch load finished");

    Ok(reports)
}
