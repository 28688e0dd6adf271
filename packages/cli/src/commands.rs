use std::path::Path;

use anyhow::{Context, bail};
use console::style;
use dialoguer::Confirm;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use windfarm_server::database::reset_schema;
use windfarm_server::entity::{maintenance, site};
use windfarm_server::etl::{LoadReport, run_all};

pub async fn load(db: &DatabaseConnection, data_dir: &Path, json: bool) -> anyhow::Result<()> {
    if !data_dir.is_dir() {
        bail!("Data directory {} does not exist", data_dir.display());
    }

    let reports = run_all(db, data_dir)
        .await
        .with_context(|| format!("Batch load from {} failed", data_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }
    Ok(())
}

fn print_reports(reports: &[LoadReport]) {
    println!(
        "{:<26} {:>7} {:>10} {:>14} {:>10} {:>7} {:>6}",
        "file", "loaded", "duplicate", "unknown parent", "incomplete", "invalid", "failed"
    );
    for r in reports {
        println!(
            "{:<26} {:>7} {:>10} {:>14} {:>10} {:>7} {:>6}",
            r.file, r.loaded, r.duplicates, r.unknown_parent, r.incomplete, r.invalid, r.failed
        );
    }
    println!("{}", style("Load complete").green().bold());
}

pub async fn reset_db(db: &DatabaseConnection, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Drop every table and delete all data?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted, nothing changed");
            return Ok(());
        }
    }

    reset_schema(db).await.context("Failed to reset schema")?;
    println!("{}", style("All tables dropped and recreated").green().bold());
    Ok(())
}

pub async fn delete_maintenance(db: &DatabaseConnection, id: i32) -> anyhow::Result<()> {
    let result = maintenance::Entity::delete_by_id(id)
        .exec(db)
        .await
        .with_context(|| format!("Failed to delete maintenance record {id}"))?;

    if result.rows_affected == 0 {
        println!("{}", style(format!("No maintenance record with ID {id}")).yellow());
    } else {
        println!("{}", style(format!("Deleted maintenance record {id}")).green());
    }
    Ok(())
}

pub async fn list_sites(db: &DatabaseConnection) -> anyhow::Result<()> {
    let sites = site::Entity::find()
        .order_by_asc(site::Column::SiteId)
        .all(db)
        .await
        .context("Failed to query sites")?;

    if sites.is_empty() {
        println!("No sites");
        return Ok(());
    }

    println!("{:<12} {:<30} {}", "site_id", "name", "location");
    for s in sites {
        println!("{:<12} {:<30} {}", s.site_id, s.name, s.location);
    }
    Ok(())
}
