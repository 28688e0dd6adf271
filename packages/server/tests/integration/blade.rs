use serde_json::json;

use crate::common::{TestApp, days_ago, routes};

mod blade_creation {
    use super::*;

    #[tokio::test]
    async fn creates_blade_on_existing_turbine() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &[]).await;

        let res = app
            .post(
                routes::BLADES,
                &json!({"blade_id": "B-1", "turbine_id": "T-1", "type": "Glass Fiber", "length": 52}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["type"], "Glass Fiber");
        assert_eq!(res.body["length"], 52);
        assert!(res.body["maintenance"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_turbine_is_parent_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::BLADES,
                &json!({"blade_id": "B-1", "turbine_id": "T-404", "type": "Glass Fiber", "length": 52}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "PARENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn negative_length_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &[]).await;

        let res = app
            .post(
                routes::BLADES,
                &json!({"blade_id": "B-1", "turbine_id": "T-1", "type": "Glass Fiber", "length": -1}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn duplicate_blade_id_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &["B-1"]).await;

        let res = app
            .post(
                routes::BLADES,
                &json!({"blade_id": "B-1", "turbine_id": "T-1", "type": "Other", "length": 10}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "DUPLICATE_ID");
    }
}

mod blade_listing {
    use super::*;

    #[tokio::test]
    async fn embeds_maintenance_ordered_by_date() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &["B-1", "B-2"]).await;
        app.insert_maintenance("B-1", days_ago(1), "Erosion").await;
        app.insert_maintenance("B-1", days_ago(30), "Crack").await;

        let res = app.get(routes::BLADES).await;
        assert_eq!(res.status, 200);
        let blades = res.body.as_array().unwrap();
        assert_eq!(blades.len(), 2);

        let history = blades[0]["maintenance"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["issue"], "Crack");
        assert_eq!(history[1]["issue"], "Erosion");
        assert!(blades[1]["maintenance"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blade_maintenance_lists_only_that_blade() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &["B-1", "B-2"]).await;
        app.insert_maintenance("B-1", days_ago(5), "Crack").await;
        app.insert_maintenance("B-2", days_ago(5), "Erosion").await;

        let res = app.get(&routes::blade_maintenance("B-2")).await;
        assert_eq!(res.status, 200);
        let records = res.body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["issue"], "Erosion");

        // An unknown blade simply has no history
        let res = app.get(&routes::blade_maintenance("B-404")).await;
        assert_eq!(res.status, 200);
        assert!(res.body.as_array().unwrap().is_empty());
    }
}

mod blade_update {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_named_fields() {
        let app = TestApp::spawn().await;
        app.create_hierarchy("S-1", "T-1", &["B-1"]).await;

        let res = app.put(&routes::blade("B-1"), &json!({"length": 60})).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["length"], 60);
        assert_eq!(res.body["type"], "Carbon Fiber");
        assert_eq!(res.body["turbine_id"], "T-1");
    }

    #[tokio::test]
    async fn missing_blade_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::blade("B-404"), &json!({"type": "X"})).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}
