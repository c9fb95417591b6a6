// ABOUTME: HTTP integration tests for wellness routes
// ABOUTME: Tests exercise plans/logs, sleep, health reports, and vaccinations with ownership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::uninlined_format_args)]

//! HTTP integration tests for the wellness record endpoints
//!
//! The five record families share a create/list/delete shape with per-user
//! ownership; health reports additionally support fetch by id.

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use std::sync::Arc;
use vitalpath_server::routes::WellnessRoutes;
use vitalpath_server::server::ServerResources;

struct WellnessTestSetup {
    resources: Arc<ServerResources>,
    token: String,
}

impl WellnessTestSetup {
    async fn new() -> anyhow::Result<Self> {
        let resources = Arc::new(common::create_test_resources().await?);
        let (_, token) =
            common::register_and_login(&resources, "wellness@example.com", "password123").await?;
        Ok(Self { resources, token })
    }

    fn routes(&self) -> axum::Router {
        WellnessRoutes::routes(self.resources.clone())
    }

    async fn other_user_token(&self) -> anyhow::Result<String> {
        let (_, token) =
            common::register_and_login(&self.resources, "intruder@example.com", "password123")
                .await?;
        Ok(token)
    }

    async fn create(&self, uri: &str, body: &serde_json::Value) -> serde_json::Value {
        let response = AxumTestRequest::post(uri)
            .bearer(&self.token)
            .json(body)
            .send(self.routes())
            .await;
        assert_eq!(response.status(), 201, "create failed for {uri}");
        response.json()
    }
}

// ============================================================================
// /api/exercise-plans - Exercise Plan Tests
// ============================================================================

#[tokio::test]
async fn test_exercise_plan_create_and_list() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let plan = setup
        .create(
            "/api/exercise-plans",
            &json!({
                "title": "Push Pull Legs",
                "description": "Three-day split",
                "sessions_per_week": 3,
                "focus_area": "strength"
            }),
        )
        .await;
    assert_eq!(plan["title"], "Push Pull Legs");
    assert_eq!(plan["sessions_per_week"], 3);

    let list: serde_json::Value = AxumTestRequest::get("/api/exercise-plans")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["plans"][0]["title"], "Push Pull Legs");
}

#[tokio::test]
async fn test_exercise_plan_rejects_blank_title() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::post("/api/exercise-plans")
        .bearer(&setup.token)
        .json(&json!({"title": "  "}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_exercise_plan_rejects_nonpositive_sessions() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::post("/api/exercise-plans")
        .bearer(&setup.token)
        .json(&json!({"title": "Plan", "sessions_per_week": 0}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_exercise_plan_delete_enforces_ownership() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");
    let other_token = setup.other_user_token().await.expect("other user");

    let plan = setup
        .create("/api/exercise-plans", &json!({"title": "Mine"}))
        .await;
    let id = plan["id"].as_str().expect("id");

    let forbidden = AxumTestRequest::delete(&format!("/api/exercise-plans/{id}"))
        .bearer(&other_token)
        .send(setup.routes())
        .await;
    assert_eq!(forbidden.status(), 403);

    let deleted = AxumTestRequest::delete(&format!("/api/exercise-plans/{id}"))
        .bearer(&setup.token)
        .send(setup.routes())
        .await;
    assert_eq!(deleted.status(), 200);

    let gone = AxumTestRequest::delete(&format!("/api/exercise-plans/{id}"))
        .bearer(&setup.token)
        .send(setup.routes())
        .await;
    assert_eq!(gone.status(), 404);
}

// ============================================================================
// /api/exercise-logs - Exercise Log Tests
// ============================================================================

#[tokio::test]
async fn test_exercise_log_create_and_list() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let log = setup
        .create(
            "/api/exercise-logs",
            &json!({
                "activity": "Running",
                "duration_minutes": 35.0,
                "calories_burned": 420.0,
                "intensity": "high"
            }),
        )
        .await;
    assert_eq!(log["activity"], "Running");
    assert_eq!(log["duration_minutes"], 35.0);

    let list: serde_json::Value = AxumTestRequest::get("/api/exercise-logs")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["logs"][0]["activity"], "Running");
}

#[tokio::test]
async fn test_exercise_log_rejects_nonpositive_duration() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::post("/api/exercise-logs")
        .bearer(&setup.token)
        .json(&json!({"activity": "Running", "duration_minutes": 0.0}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

// ============================================================================
// /api/sleep - Sleep Entry Tests
// ============================================================================

#[tokio::test]
async fn test_sleep_entry_create_and_list() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let entry = setup
        .create(
            "/api/sleep",
            &json!({
                "date": "2025-03-10",
                "duration_hours": 7.5,
                "quality": "good"
            }),
        )
        .await;
    assert_eq!(entry["date"], "2025-03-10");
    assert_eq!(entry["duration_hours"], 7.5);

    let list: serde_json::Value = AxumTestRequest::get("/api/sleep")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["entries"][0]["quality"], "good");
}

#[tokio::test]
async fn test_sleep_entry_rejects_out_of_range_duration() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::post("/api/sleep")
        .bearer(&setup.token)
        .json(&json!({"date": "2025-03-10", "duration_hours": 25.0}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_sleep_entry_delete_enforces_ownership() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");
    let other_token = setup.other_user_token().await.expect("other user");

    let entry = setup
        .create(
            "/api/sleep",
            &json!({"date": "2025-03-10", "duration_hours": 8.0}),
        )
        .await;
    let id = entry["id"].as_str().expect("id");

    let forbidden = AxumTestRequest::delete(&format!("/api/sleep/{id}"))
        .bearer(&other_token)
        .send(setup.routes())
        .await;
    assert_eq!(forbidden.status(), 403);
    let body: serde_json::Value = forbidden.json();
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");
}

// ============================================================================
// /api/health-reports - Health Report Tests
// ============================================================================

#[tokio::test]
async fn test_health_report_create_fetch_and_delete() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let report = setup
        .create(
            "/api/health-reports",
            &json!({
                "title": "Annual Blood Panel",
                "report_type": "lab",
                "summary": "All markers in range",
                "reported_on": "2025-02-01"
            }),
        )
        .await;
    let id = report["id"].as_str().expect("id");

    let fetched: serde_json::Value = AxumTestRequest::get(&format!("/api/health-reports/{id}"))
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(fetched["title"], "Annual Blood Panel");
    assert_eq!(fetched["reported_on"], "2025-02-01");

    let deleted = AxumTestRequest::delete(&format!("/api/health-reports/{id}"))
        .bearer(&setup.token)
        .send(setup.routes())
        .await;
    assert_eq!(deleted.status(), 200);

    let gone = AxumTestRequest::get(&format!("/api/health-reports/{id}"))
        .bearer(&setup.token)
        .send(setup.routes())
        .await;
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
async fn test_health_report_fetch_of_another_user_is_forbidden() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");
    let other_token = setup.other_user_token().await.expect("other user");

    let report = setup
        .create(
            "/api/health-reports",
            &json!({"title": "Private Report", "reported_on": "2025-02-01"}),
        )
        .await;
    let id = report["id"].as_str().expect("id");

    let response = AxumTestRequest::get(&format!("/api/health-reports/{id}"))
        .bearer(&other_token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 403);
}

// ============================================================================
// /api/vaccinations - Vaccination Tests
// ============================================================================

#[tokio::test]
async fn test_vaccination_create_and_list() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let vaccination = setup
        .create(
            "/api/vaccinations",
            &json!({
                "vaccine_name": "Influenza",
                "dose": "1",
                "administered_on": "2024-10-15",
                "next_due": "2025-10-15"
            }),
        )
        .await;
    assert_eq!(vaccination["vaccine_name"], "Influenza");
    assert_eq!(vaccination["next_due"], "2025-10-15");

    let list: serde_json::Value = AxumTestRequest::get("/api/vaccinations")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["vaccinations"][0]["vaccine_name"], "Influenza");
}

#[tokio::test]
async fn test_vaccination_rejects_blank_name() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::post("/api/vaccinations")
        .bearer(&setup.token)
        .json(&json!({"vaccine_name": " ", "administered_on": "2024-10-15"}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_wellness_routes_require_authentication() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");

    for uri in [
        "/api/exercise-plans",
        "/api/exercise-logs",
        "/api/sleep",
        "/api/health-reports",
        "/api/vaccinations",
    ] {
        let response = AxumTestRequest::get(uri).send(setup.routes()).await;
        assert_eq!(response.status(), 401, "expected 401 for {uri}");
    }
}

#[tokio::test]
async fn test_wellness_lists_are_scoped_to_user() {
    let setup = WellnessTestSetup::new().await.expect("Setup failed");
    let other_token = setup.other_user_token().await.expect("other user");

    setup
        .create("/api/exercise-plans", &json!({"title": "Mine"}))
        .await;

    let other_list: serde_json::Value = AxumTestRequest::get("/api/exercise-plans")
        .bearer(&other_token)
        .send(setup.routes())
        .await
        .json();
    assert_eq!(other_list["count"], 0);
}
