// ABOUTME: Health-metrics route handlers for profile snapshots and history
// ABOUTME: PUT upserts the current snapshot and appends history; GET derives energy targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Health-metrics profile routes.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vitalpath_intelligence::energy::{energy_targets, EnergyTargets};

use crate::errors::AppError;
use crate::models::{HealthMetrics, HealthMetricsRecord};
use crate::server::ServerResources;

/// Health-metrics snapshot submission
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: i32,
    pub gender: String,
    pub activity_level: String,
    pub chronic_conditions: Option<String>,
    pub allergies: Option<String>,
}

/// Current snapshot with derived energy targets
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: HealthMetrics,
    pub energy: EnergyTargets,
}

/// Historical snapshots, newest first
#[derive(Debug, Serialize)]
pub struct MetricsHistoryResponse {
    pub history: Vec<HealthMetricsRecord>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<u32>,
}

const DEFAULT_HISTORY_LIMIT: u32 = 30;
const MAX_HISTORY_LIMIT: u32 = 365;

/// Health-metrics route handlers
pub struct MetricsRoutes;

impl MetricsRoutes {
    /// Router for health-metrics endpoints
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/health-metrics",
                put(handle_upsert_metrics).get(handle_get_metrics),
            )
            .route("/api/health-metrics/history", get(handle_metrics_history))
            .with_state(resources)
    }
}

async fn handle_upsert_metrics(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<MetricsRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.height_cm <= 0.0 || request.weight_kg <= 0.0 {
        return Err(AppError::invalid_input(
            "Height and weight must be positive",
        ));
    }
    if request.age <= 0 {
        return Err(AppError::invalid_input("Age must be positive"));
    }

    let metrics = HealthMetrics {
        user_id: user.user_id,
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        age: request.age,
        gender: request.gender,
        activity_level: request.activity_level,
        chronic_conditions: request.chronic_conditions,
        allergies: request.allergies,
        updated_at: Utc::now(),
    };

    resources.database.upsert_health_metrics(&metrics).await?;
    tracing::info!("Health metrics updated for user {}", user.user_id);

    let energy = energy_targets(&metrics, None);
    let response = MetricsResponse { metrics, energy };
    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn handle_get_metrics(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let metrics = resources
        .database
        .get_health_metrics(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("health metrics"))?;

    let energy = energy_targets(&metrics, None);
    let response = MetricsResponse { metrics, energy };
    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn handle_metrics_history(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);
    let history = resources
        .database
        .get_health_metrics_history(user.user_id, limit)
        .await?;

    let response = MetricsHistoryResponse {
        count: history.len(),
        history,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}
