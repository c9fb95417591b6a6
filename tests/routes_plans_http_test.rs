// ABOUTME: HTTP integration tests for diet-plan routes
// ABOUTME: Tests generation with a scripted provider, weekly reuse, latest lookup, and PDF export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::uninlined_format_args)]

//! HTTP integration tests for the diet-plan endpoints
//!
//! Drives the full generation pipeline against a scripted provider with
//! canned model responses, covering the happy path and the failure taxonomy
//! (missing profile, unconfigured provider, unparseable model output).

mod common;
mod helpers;

use async_trait::async_trait;
use chrono::Utc;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use vitalpath_server::errors::AppError;
use vitalpath_server::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use vitalpath_server::models::HealthMetrics;
use vitalpath_server::routes::PlanRoutes;
use vitalpath_server::server::ServerResources;

/// Direct-JSON base plan with full macros and a statically-known food
const BASE_PLAN_JSON: &str = r#"{"meals":[
    {"name":"Breakfast Bowl","calories":500,"protein":30,"carbs":60,"fat":15,
     "foods":[{"name":"Oatmeal","portion":"1 cup"}]},
    {"name":"Grilled Chicken Plate","calories":700,"protein":55,"carbs":50,"fat":25,
     "foods":[{"name":"Grilled Chicken","portion":"200 g"}]}
]}"#;

/// Fenced weekly plan whose breakfasts omit macros, exercising the backfill
const WEEKLY_PLAN_JSON: &str = "```json\n{\"weeklyPlan\":[\
    {\"day\":\"Monday\",\"meals\":{\
        \"breakfast\":{\"name\":\"Yogurt Parfait\",\"calories\":400,\
            \"foods\":[{\"name\":\"Greek Yogurt\",\"portion\":\"200 g\"}]},\
        \"lunch\":{\"name\":\"Quinoa Bowl\",\"calories\":600,\"protein\":35,\"carbs\":70,\"fat\":18,\
            \"foods\":[{\"name\":\"Quinoa\",\"portion\":\"1 cup\"}]},\
        \"dinner\":{\"name\":\"Salmon Plate\",\"calories\":700,\"protein\":45,\"carbs\":40,\"fat\":30,\
            \"foods\":[{\"name\":\"Salmon\",\"portion\":\"180 g\"}]}}},\
    {\"day\":\"Tuesday\",\"meals\":{\
        \"breakfast\":{\"name\":\"Avocado Toast\",\"calories\":450,\
            \"foods\":[{\"name\":\"Avocado Toast\",\"portion\":\"2 slices\"}]},\
        \"lunch\":{\"name\":\"Lentil Soup\",\"calories\":550,\"protein\":28,\"carbs\":65,\"fat\":12,\
            \"foods\":[{\"name\":\"Lentil Soup\",\"portion\":\"1 bowl\"}]},\
        \"dinner\":{\"name\":\"Tofu Stir Fry\",\"calories\":650,\"protein\":38,\"carbs\":55,\"fat\":22,\
            \"foods\":[{\"name\":\"Tofu Stir Fry\",\"portion\":\"1 plate\"}]}}}\
]}\n```";

const MALFORMED_RESPONSE: &str = "Sorry, I cannot help with meal planning today.";

/// Provider that replays a fixed sequence of canned responses
///
/// Once the script is exhausted further completions fail like an unreachable
/// upstream, which makes unexpected generation attempts visible in tests.
struct ScriptedLlm {
    responses: Mutex<VecDeque<&'static str>>,
}

impl ScriptedLlm {
    fn new(responses: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().copied().collect()),
        })
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let next = self.responses.lock().unwrap().pop_front();
        next.map_or_else(
            || Err(AppError::external_service("scripted", "script exhausted")),
            |content| {
                Ok(ChatResponse {
                    content: content.to_owned(),
                    model: "scripted-1".to_owned(),
                    usage: None,
                    finish_reason: Some("stop".to_owned()),
                })
            },
        )
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

struct PlanTestSetup {
    resources: Arc<ServerResources>,
    user_id: Uuid,
    token: String,
}

impl PlanTestSetup {
    /// Resources with a scripted provider and a logged-in user
    async fn with_script(responses: &[&'static str]) -> anyhow::Result<Self> {
        let mut resources = common::create_test_resources().await?;
        resources.llm = Some(ScriptedLlm::new(responses));
        let resources = Arc::new(resources);
        let (user_id, token) =
            common::register_and_login(&resources, "plans@example.com", "password123").await?;
        Ok(Self {
            resources,
            user_id,
            token,
        })
    }

    /// Resources with no provider configured at all
    async fn without_provider() -> anyhow::Result<Self> {
        let resources = Arc::new(common::create_test_resources().await?);
        let (user_id, token) =
            common::register_and_login(&resources, "plans@example.com", "password123").await?;
        Ok(Self {
            resources,
            user_id,
            token,
        })
    }

    fn routes(&self) -> axum::Router {
        PlanRoutes::routes(self.resources.clone())
    }

    /// Store the reference profile: 80 kg, 175 cm, 30-year-old male, moderate
    async fn store_reference_metrics(&self) -> anyhow::Result<()> {
        let metrics = HealthMetrics {
            user_id: self.user_id,
            height_cm: 175.0,
            weight_kg: 80.0,
            age: 30,
            gender: "male".to_owned(),
            activity_level: "moderate".to_owned(),
            chronic_conditions: None,
            allergies: None,
            updated_at: Utc::now(),
        };
        self.resources.database.upsert_health_metrics(&metrics).await?;
        Ok(())
    }

    async fn generate_plan(&self, body: &serde_json::Value) -> helpers::axum_test::AxumTestResponse {
        AxumTestRequest::post("/api/diet-plan")
            .bearer(&self.token)
            .json(body)
            .send(self.routes())
            .await
    }
}

// ============================================================================
// POST /api/diet-plan - Base Plan Generation Tests
// ============================================================================

#[tokio::test]
async fn test_generate_plan_requires_authentication() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON])
        .await
        .expect("Setup failed");

    let response = AxumTestRequest::post("/api/diet-plan")
        .json(&json!({"dietType": "balanced"}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_generate_plan_without_metrics() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON])
        .await
        .expect("Setup failed");

    let response = setup.generate_plan(&json!({"dietType": "balanced"})).await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_generate_plan_success() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON])
        .await
        .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");

    let response = setup
        .generate_plan(&json!({
            "goalWeight": 75.0,
            "timeframe": 12,
            "dietType": "balanced",
            "mealCount": 3,
            "includeSnacks": false
        }))
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    // TDEE 2711 minus the 500 kcal weight-loss adjustment
    assert_eq!(body["target_calories"], 2211.0);
    assert_eq!(body["diet_type"], "balanced");
    assert_eq!(body["goal_weight_kg"], 75.0);
    assert_eq!(body["meals"][0]["name"], "Breakfast Bowl");
    assert_eq!(body["meals"][0]["protein"], 30.0);
    // First food "Oatmeal" resolves through the static dish map
    let image = body["meals"][0]["imageUrl"].as_str().expect("image url");
    assert!(image.contains("oatmeal"));
}

#[tokio::test]
async fn test_generate_plan_rejects_invalid_meal_count() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON])
        .await
        .expect("Setup failed");

    let response = setup.generate_plan(&json!({"mealCount": 0})).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_generate_plan_rejects_nonpositive_goal_weight() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON])
        .await
        .expect("Setup failed");

    let response = setup.generate_plan(&json!({"goalWeight": -5.0})).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_generate_plan_without_provider_configured() {
    let setup = PlanTestSetup::without_provider().await.expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");

    let response = setup.generate_plan(&json!({"dietType": "balanced"})).await;

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_generate_plan_with_unparseable_model_output() {
    let setup = PlanTestSetup::with_script(&[MALFORMED_RESPONSE])
        .await
        .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");

    let response = setup.generate_plan(&json!({"dietType": "balanced"})).await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json();
    // This 500 keeps its descriptive message, unlike generic internal errors
    assert_eq!(body["error"]["code"], "MALFORMED_AI_RESPONSE");
    let message = body["error"]["message"].as_str().expect("message");
    assert!(!message.is_empty());
}

// ============================================================================
// GET /api/diet-plan/latest - Latest Plan Tests
// ============================================================================

#[tokio::test]
async fn test_latest_plan_before_any_generation() {
    let setup = PlanTestSetup::with_script(&[])
        .await
        .expect("Setup failed");

    let response = AxumTestRequest::get("/api/diet-plan/latest")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_latest_plan_returns_most_recent() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON, BASE_PLAN_JSON])
        .await
        .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");

    let first: serde_json::Value = setup
        .generate_plan(&json!({"dietType": "balanced"}))
        .await
        .json();
    let second: serde_json::Value = setup
        .generate_plan(&json!({"dietType": "vegetarian"}))
        .await
        .json();
    assert_ne!(first["id"], second["id"]);

    let latest: serde_json::Value = AxumTestRequest::get("/api/diet-plan/latest")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();

    assert_eq!(latest["id"], second["id"]);
    assert_eq!(latest["diet_type"], "vegetarian");
}

// ============================================================================
// GET /api/diet-plan/weekly - Weekly Plan Tests
// ============================================================================

#[tokio::test]
async fn test_weekly_plan_requires_base_plan() {
    let setup = PlanTestSetup::with_script(&[WEEKLY_PLAN_JSON])
        .await
        .expect("Setup failed");

    let response = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_weekly_plan_generates_and_backfills_macros() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON, WEEKLY_PLAN_JSON])
        .await
        .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");
    setup.generate_plan(&json!({"dietType": "balanced"})).await;

    let response = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["days"][0]["day"], "Monday");
    // 400 kcal breakfast with no macros: 20% of calories as protein at 4 kcal/g
    assert_eq!(body["days"][0]["meals"]["breakfast"]["protein"], 20.0);
    assert_eq!(body["days"][0]["meals"]["breakfast"]["carbs"], 60.0);
    // Lunch macros came from the model and are untouched
    assert_eq!(body["days"][0]["meals"]["lunch"]["protein"], 35.0);
}

#[tokio::test]
async fn test_weekly_plan_reuses_existing() {
    let setup = PlanTestSetup::with_script(&[BASE_PLAN_JSON, WEEKLY_PLAN_JSON])
        .await
        .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");
    setup.generate_plan(&json!({"dietType": "balanced"})).await;

    let first: serde_json::Value = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();

    // The script is exhausted, so any further generation attempt would 502
    let second = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await;

    assert_eq!(second.status(), 200);
    let second: serde_json::Value = second.json();
    assert_eq!(second["id"], first["id"]);
}

#[tokio::test]
async fn test_weekly_plan_regenerate_creates_new() {
    let setup =
        PlanTestSetup::with_script(&[BASE_PLAN_JSON, WEEKLY_PLAN_JSON, WEEKLY_PLAN_JSON])
            .await
            .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");
    setup.generate_plan(&json!({"dietType": "balanced"})).await;

    let first: serde_json::Value = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();

    let regenerated: serde_json::Value =
        AxumTestRequest::get("/api/diet-plan/weekly?regenerate=true")
            .bearer(&setup.token)
            .send(setup.routes())
            .await
            .json();

    assert_ne!(regenerated["id"], first["id"]);
}

#[tokio::test]
async fn test_weekly_plan_cuisine_variants_are_separate() {
    let setup =
        PlanTestSetup::with_script(&[BASE_PLAN_JSON, WEEKLY_PLAN_JSON, WEEKLY_PLAN_JSON])
            .await
            .expect("Setup failed");
    setup.store_reference_metrics().await.expect("metrics");
    setup.generate_plan(&json!({"dietType": "balanced"})).await;

    let plain: serde_json::Value = AxumTestRequest::get("/api/diet-plan/weekly")
        .bearer(&setup.token)
        .send(setup.routes())
        .await
        .json();

    // A cuisine-tagged request does not reuse the untagged plan
    let italian: serde_json::Value =
        AxumTestRequest::get("/api/diet-plan/weekly?cuisineType=italian")
            .bearer(&setup.token)
            .send(setup.routes())
            .await
            .json();
    assert_ne!(italian["id"], plain["id"]);
    assert_eq!(italian["cuisine_type"], "italian");

    // But a repeat of the same cuisine does
    let italian_again: serde_json::Value =
        AxumTestRequest::get("/api/diet-plan/weekly?cuisineType=italian")
            .bearer(&setup.token)
            .send(setup.routes())
            .await
            .json();
    assert_eq!(italian_again["id"], italian["id"]);
}

// ============================================================================
// POST /api/diet-plan/export - PDF Export Tests
// ============================================================================

#[tokio::test]
async fn test_export_plan_as_pdf_attachment() {
    let setup = PlanTestSetup::with_script(&[])
        .await
        .expect("Setup failed");

    let export_request = json!({
        "title": "My Balanced Plan",
        "dietType": "balanced",
        "targetCalories": 2211.0,
        "meals": [
            {"name": "Breakfast Bowl", "calories": 500, "protein": 30, "carbs": 60, "fat": 15,
             "foods": [{"name": "Oatmeal", "portion": "1 cup"}]}
        ]
    });

    let response = AxumTestRequest::post("/api/diet-plan/export")
        .bearer(&setup.token)
        .json(&export_request)
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"diet-plan.pdf\"")
    );
    let bytes = response.bytes();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_plan_rejects_empty_payload() {
    let setup = PlanTestSetup::with_script(&[])
        .await
        .expect("Setup failed");

    let response = AxumTestRequest::post("/api/diet-plan/export")
        .bearer(&setup.token)
        .json(&json!({"title": "Empty"}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_export_plan_requires_authentication() {
    let setup = PlanTestSetup::with_script(&[])
        .await
        .expect("Setup failed");

    let response = AxumTestRequest::post("/api/diet-plan/export")
        .json(&json!({"title": "Anonymous"}))
        .send(setup.routes())
        .await;

    assert_eq!(response.status(), 401);
}
