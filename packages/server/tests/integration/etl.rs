use std::fs;
use std::path::Path;

use sea_orm::{EntityTrait, PaginatorTrait};
use windfarm_server::entity::{blade, maintenance, site, turbine};
use windfarm_server::etl::{
    BLADES_FILE, EtlError, MAINTENANCE_FILE, SITES_FILE, TURBINES_FILE, run_all,
};

use crate::common::{TestApp, routes};

fn write_snapshot(dir: &Path) {
    fs::write(
        dir.join(SITES_FILE),
        "Site_ID, Site_Name ,Location\n\
         s-001,hornsea one,north sea\n\
         S-001,Hornsea Duplicate,North Sea\n\
         S-002,dogger bank,north sea\n\
         S-003,,baltic\n",
    )
    .unwrap();
    fs::write(
        dir.join(TURBINES_FILE),
        "turbine_id,site_id,turbine_model\n\
         t-1,s-001,vestas v90\n\
         T-2,S-002,siemens swt\n\
         T-3,S-999,nordex n149\n",
    )
    .unwrap();
    fs::write(
        dir.join(BLADES_FILE),
        "blade_id,turbine_id,blade_type,length_m\n\
         b-1,t-1,carbon fiber,45.8\n\
         B-2,T-2,glass fiber,52\n\
         B-3,T-3,glass fiber,52\n",
    )
    .unwrap();
    fs::write(
        dir.join(MAINTENANCE_FILE),
        "blade_id,date,repair_status,issue_found,technician\n\
         b-1,2025-03-14,pending,leading edge erosion,alice moreau\n\
         B-1,03/14/2025,completed,crack,bob smith\n\
         B-1,2025/04/02 09:15:00,completed,crack,bob smith\n\
         B-2,2025-05-01,in progress,lightning damage,alice moreau\n\
         B-3,2025-05-01,pending,crack,alice moreau\n\
         B-2,someday,pending,crack,alice moreau\n",
    )
    .unwrap();
}

#[tokio::test]
async fn loads_snapshot_in_dependency_order() {
    let app = TestApp::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());

    let reports = run_all(&app.db, dir.path()).await.expect("load failed");
    assert_eq!(reports.len(), 4);

    let sites = &reports[0];
    assert_eq!(sites.file, SITES_FILE);
    assert_eq!(sites.loaded, 2);
    assert_eq!(sites.duplicates, 1);
    assert_eq!(sites.incomplete, 1);

    let turbines = &reports[1];
    assert_eq!(turbines.loaded, 2);
    assert_eq!(turbines.unknown_parent, 1);

    let blades = &reports[2];
    assert_eq!(blades.loaded, 2);
    assert_eq!(blades.unknown_parent, 1);

    let records = &reports[3];
    assert_eq!(records.loaded, 3);
    assert_eq!(records.duplicates, 1);
    assert_eq!(records.unknown_parent, 1);
    assert_eq!(records.invalid, 1);
    assert_eq!(records.failed, 0);

    assert_eq!(site::Entity::find().count(&app.db).await.unwrap(), 2);
    assert_eq!(turbine::Entity::find().count(&app.db).await.unwrap(), 2);
    assert_eq!(blade::Entity::find().count(&app.db).await.unwrap(), 2);
    assert_eq!(maintenance::Entity::find().count(&app.db).await.unwrap(), 3);

    // Normalized values are visible through the API
    let res = app.get(routes::SITES).await;
    assert_eq!(res.body[0]["site_id"], "S-001");
    assert_eq!(res.body[0]["name"], "Hornsea One");

    let res = app.get(&routes::blade_maintenance("B-1")).await;
    let history = res.body.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["issue"], "Leading Edge Erosion");
    assert_eq!(history[0]["technician"], "Alice Moreau");
    assert_eq!(history[1]["date"], "2025-04-02");

    let res = app.get(routes::BLADES).await;
    assert_eq!(res.body[0]["length"], 45);
}

#[tokio::test]
async fn reloading_upserts_assets_and_appends_maintenance() {
    let app = TestApp::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());

    run_all(&app.db, dir.path()).await.expect("first load failed");

    fs::write(
        dir.path().join(SITES_FILE),
        "site_id,site_name,location\nS-001,hornsea renamed,north sea\n",
    )
    .unwrap();
    let reports = run_all(&app.db, dir.path()).await.expect("second load failed");
    assert_eq!(reports[0].loaded, 1);

    assert_eq!(site::Entity::find().count(&app.db).await.unwrap(), 2);
    assert_eq!(blade::Entity::find().count(&app.db).await.unwrap(), 2);
    // Maintenance rows are plain inserts
    assert_eq!(maintenance::Entity::find().count(&app.db).await.unwrap(), 6);

    let res = app.get(routes::SITES).await;
    assert_eq!(res.body[0]["name"], "Hornsea Renamed");
}

#[tokio::test]
async fn missing_file_aborts_the_run() {
    let app = TestApp::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    let err = run_all(&app.db, dir.path()).await.unwrap_err();
    assert!(matches!(err, EtlError::Io { .. }));
}

#[tokio::test]
async fn undecodable_row_does_not_abort_the_file() {
    let app = TestApp::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());

    let mut records = b"blade_id,date,repair_status,issue_found,technician\n\
                        B-1,2025-03-14,pending,crack,alice moreau\n\
                        B-1,2025-03-15,pending,"
        .to_vec();
    records.extend_from_slice(&[0xFF, 0xFE]);
    records.extend_from_slice(b",alice moreau\nB-2,2025-05-01,completed,erosion,bob smith\n");
    fs::write(dir.path().join(MAINTENANCE_FILE), records).unwrap();

    let reports = run_all(&app.db, dir.path()).await.expect("load failed");
    assert_eq!(reports[3].loaded, 2);
    assert_eq!(reports[3].invalid, 1);
    assert_eq!(maintenance::Entity::find().count(&app.db).await.unwrap(), 2);
}

#[tokio::test]
async fn loaded_ids_with_inner_spaces_accept_children_over_the_api() {
    let app = TestApp::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    fs::write(
        dir.path().join(SITES_FILE),
        "site_id,site_name,location\nwf north,wind farm north,north sea\n",
    )
    .unwrap();

    run_all(&app.db, dir.path()).await.expect("load failed");

    let res = app
        .post(
            routes::TURBINES,
            &serde_json::json!({"turbine_id": "WF NORTH T1", "site_id": "WF NORTH", "model": "Vestas V90"}),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["site_id"], "WF NORTH");
}
