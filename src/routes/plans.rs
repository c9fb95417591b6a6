// ABOUTME: Diet-plan route handlers for generation, lookup, and PDF export
// ABOUTME: Base-plan POST, weekly GET with reuse precedence, latest lookup, export attachment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Diet-plan routes.
//!
//! Plan request and response bodies use camelCase field names, matching the
//! JSON contract the mobile clients already speak.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::AppError;
use crate::server::ServerResources;
use crate::services::export::{render_plan_pdf, PlanExportRequest};
use crate::services::plan_generation::{self, BasePlanRequest, WeeklyPlanQuery};

const MAX_MEAL_COUNT: u32 = 8;

/// Base-plan generation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRequest {
    /// Goal weight in kilograms
    pub goal_weight: Option<f64>,
    /// Weeks to reach the goal
    pub timeframe: Option<u32>,
    #[serde(default = "default_diet_type")]
    pub diet_type: String,
    #[serde(default = "default_meal_count")]
    pub meal_count: u32,
    #[serde(default)]
    pub include_snacks: bool,
    /// Accepted for client compatibility; generation always runs
    #[serde(default = "default_true")]
    pub auto_generate: bool,
}

fn default_diet_type() -> String {
    "balanced".to_owned()
}

const fn default_meal_count() -> u32 {
    3
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeeklyQuery {
    #[serde(default)]
    regenerate: bool,
    cuisine_type: Option<String>,
}

/// Diet-plan route handlers
pub struct PlanRoutes;

impl PlanRoutes {
    /// Router for diet-plan endpoints
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/diet-plan", post(handle_generate_plan))
            .route("/api/diet-plan/weekly", get(handle_weekly_plan))
            .route("/api/diet-plan/latest", get(handle_latest_plan))
            .route("/api/diet-plan/export", post(handle_export_plan))
            .with_state(resources)
    }
}

async fn handle_generate_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<DietPlanRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if let Some(goal) = request.goal_weight {
        if goal <= 0.0 {
            return Err(AppError::invalid_input("goalWeight must be positive"));
        }
    }
    if request.meal_count == 0 || request.meal_count > MAX_MEAL_COUNT {
        return Err(AppError::invalid_input(format!(
            "mealCount must be between 1 and {MAX_MEAL_COUNT}"
        )));
    }

    let service_request = BasePlanRequest {
        goal_weight_kg: request.goal_weight,
        timeframe_weeks: request.timeframe,
        diet_type: request.diet_type,
        meal_count: request.meal_count,
        include_snacks: request.include_snacks,
    };

    let plan = plan_generation::generate_base_plan(
        &resources.database,
        resources.llm.as_deref(),
        resources.image_search.as_deref(),
        user.user_id,
        &service_request,
    )
    .await?;

    tracing::info!("Diet plan {} generated for user {}", plan.id, user.user_id);
    Ok((StatusCode::OK, Json(plan)).into_response())
}

async fn handle_weekly_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<WeeklyQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let service_query = WeeklyPlanQuery {
        regenerate: query.regenerate,
        cuisine_type: query.cuisine_type,
    };

    let plan = plan_generation::weekly_plan(
        &resources.database,
        resources.llm.as_deref(),
        resources.image_search.as_deref(),
        user.user_id,
        &service_query,
    )
    .await?;

    Ok((StatusCode::OK, Json(plan)).into_response())
}

async fn handle_latest_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let plan = resources
        .database
        .latest_diet_plan(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("diet plan"))?;

    Ok((StatusCode::OK, Json(plan)).into_response())
}

async fn handle_export_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<PlanExportRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let bytes = render_plan_pdf(&request)?;
    tracing::debug!(
        "Exported {}-byte plan PDF for user {}",
        bytes.len(),
        user.user_id
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"diet-plan.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
