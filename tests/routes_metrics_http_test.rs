// ABOUTME: HTTP integration tests for health-metrics routes
// ABOUTME: Tests snapshot upsert, retrieval with energy targets, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::uninlined_format_args)]

//! HTTP integration tests for the health-metrics endpoints
//!
//! Validates snapshot submission, the derived calorie targets in responses,
//! and the append-only history.

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use std::sync::Arc;
use vitalpath_server::routes::MetricsRoutes;
use vitalpath_server::server::ServerResources;

struct MetricsTestSetup {
    resources: Arc<ServerResources>,
    token: String,
}

impl MetricsTestSetup {
    async fn new() -> anyhow::Result<Self> {
        let resources = Arc::new(common::create_test_resources().await?);
        let (_, token) =
            common::register_and_login(&resources, "metrics@example.com", "password123").await?;
        Ok(Self { resources, token })
    }

    fn routes(&self) -> axum::Router {
        MetricsRoutes::routes(self.resources.clone())
    }
}

fn reference_metrics() -> serde_json::Value {
    json!({
        "height_cm": 175.0,
        "weight_kg": 80.0,
        "age": 30,
        "gender": "male",
        "activity_level": "moderate"
    })
}

// ============================================================================
// PUT /api/health-metrics - Snapshot Upsert Tests
// ============================================================================

#[tokio::test]
async fn test_upsert_metrics_returns_energy_targets() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::put("/api/health-metrics")
        .bearer(&setup.token)
        .json(&reference_metrics())
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["weight_kg"], 80.0);
    // Mifflin-St Jeor for 80kg / 175cm / 30y male
    let bmr = body["energy"]["bmr"].as_f64().expect("bmr");
    assert!((bmr - 1748.75).abs() < 1e-9);
    // Moderate multiplier 1.55, no goal adjustment
    assert_eq!(body["energy"]["target_calories"], 2711);
}

#[tokio::test]
async fn test_upsert_metrics_rejects_nonpositive_values() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    let request = json!({
        "height_cm": 0.0,
        "weight_kg": 80.0,
        "age": 30,
        "gender": "male",
        "activity_level": "moderate"
    });

    let response = AxumTestRequest::put("/api/health-metrics")
        .bearer(&setup.token)
        .json(&request)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_upsert_metrics_requires_authentication() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::put("/api/health-metrics")
        .json(&reference_metrics())
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// GET /api/health-metrics - Snapshot Retrieval Tests
// ============================================================================

#[tokio::test]
async fn test_get_metrics_before_any_submission() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/health-metrics")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_get_metrics_returns_latest_snapshot() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    AxumTestRequest::put("/api/health-metrics")
        .bearer(&setup.token)
        .json(&reference_metrics())
        .send(setup.routes())
        .await;

    // Second submission replaces the current snapshot
    let updated = json!({
        "height_cm": 175.0,
        "weight_kg": 78.5,
        "age": 30,
        "gender": "male",
        "activity_level": "active"
    });
    AxumTestRequest::put("/api/health-metrics")
        .bearer(&setup.token)
        .json(&updated)
        .send(setup.routes())
        .await;

    let response = AxumTestRequest::get("/api/health-metrics")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["weight_kg"], 78.5);
    assert_eq!(body["activity_level"], "active");
}

// ============================================================================
// GET /api/health-metrics/history - History Tests
// ============================================================================

#[tokio::test]
async fn test_metrics_history_accumulates_submissions() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    for weight in [80.0, 79.2, 78.5] {
        let request = json!({
            "height_cm": 175.0,
            "weight_kg": weight,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate"
        });
        let response = AxumTestRequest::put("/api/health-metrics")
            .bearer(&setup.token)
            .json(&request)
            .send(setup.routes())
            .await;
        assert_eq!(response.status(), 200);
    }

    let response = AxumTestRequest::get("/api/health-metrics/history")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 3);
    // Newest first
    assert_eq!(body["history"][0]["weight_kg"], 78.5);
    assert_eq!(body["history"][2]["weight_kg"], 80.0);
}

#[tokio::test]
async fn test_metrics_history_respects_limit() {
    let setup = MetricsTestSetup::new().await.expect("Setup failed");

    for weight in [80.0, 79.2, 78.5] {
        let request = json!({
            "height_cm": 175.0,
            "weight_kg": weight,
            "age": 30,
            "gender": "male",
            "activity_level": "moderate"
        });
        AxumTestRequest::put("/api/health-metrics")
            .bearer(&setup.token)
            .json(&request)
            .send(setup.routes())
            .await;
    }

    let response = AxumTestRequest::get("/api/health-metrics/history?limit=2")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 2);
}
