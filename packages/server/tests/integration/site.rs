use serde_json::json;

use crate::common::{TestApp, days_ago, routes};

mod site_creation {
    use super::*;

    #[tokio::test]
    async fn creates_and_lists_sites() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SITES,
                &json!({"site_id": "S-002", "name": "Dogger Bank", "location": "North Sea"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["site_id"], "S-002");
        assert_eq!(res.body["name"], "Dogger Bank");

        app.create_site("S-001").await;

        let res = app.get(routes::SITES).await;
        assert_eq!(res.status, 200);
        let ids: Vec<&str> = res.body.as_array().unwrap().iter().map(|s| s["site_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["S-001", "S-002"]);
    }

    #[tokio::test]
    async fn duplicate_site_id_is_rejected_and_first_row_kept() {
        let app = TestApp::spawn().await;

        app.create_site("S-001").await;
        let res = app
            .post(
                routes::SITES,
                &json!({"site_id": "S-001", "name": "Impostor", "location": "Baltic"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "DUPLICATE_ID");
        assert!(res.body["message"].as_str().unwrap().contains("S-001"));

        let res = app.get(routes::SITES).await;
        let sites = res.body.as_array().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0]["name"], "Site S-001");
    }

    #[tokio::test]
    async fn blank_fields_are_validation_errors() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SITES,
                &json!({"site_id": "  ", "name": "X", "location": "Y"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .post(routes::SITES, &json!({"site_id": "S-1", "name": "X"}))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_reported_as_json() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::SITES, "{\"site_id\": ").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod site_children {
    use super::*;

    #[tokio::test]
    async fn lists_only_turbines_of_the_site() {
        let app = TestApp::spawn().await;

        app.create_hierarchy("S-1", "T-1", &[]).await;
        app.create_turbine("T-2", "S-1").await;
        app.create_hierarchy("S-2", "T-3", &[]).await;

        let res = app.get(&routes::site_turbines("S-1")).await;
        assert_eq!(res.status, 200);
        let ids: Vec<&str> = res.body.as_array().unwrap().iter().map(|t| t["turbine_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["T-1", "T-2"]);
    }

    #[tokio::test]
    async fn unknown_site_has_no_turbines() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::site_turbines("S-404")).await;
        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }
}

mod top_sites {
    use super::*;

    #[tokio::test]
    async fn ranks_sites_by_maintenance_volume() {
        let app = TestApp::spawn().await;

        app.create_hierarchy("S-A", "T-A", &["B-A1", "B-A2"]).await;
        app.create_hierarchy("S-B", "T-B", &["B-B1"]).await;
        app.create_hierarchy("S-C", "T-C", &["B-C1"]).await;

        for (blade, n) in [("B-A1", 2), ("B-A2", 2), ("B-B1", 3)] {
            for i in 0..n {
                app.insert_maintenance(blade, days_ago(10 + i), "Crack").await;
            }
        }

        let res = app.get(routes::TOP_SITES).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let rows = res.body.as_array().unwrap();

        // S-C has no maintenance and is absent
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["site_id"], "S-A");
        assert_eq!(rows[0]["total"], 4);
        assert_eq!(rows[1]["site_id"], "S-B");
        assert_eq!(rows[1]["total"], 3);
    }
}
