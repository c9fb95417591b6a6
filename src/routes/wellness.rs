// ABOUTME: Wellness route handlers for exercise, sleep, reports, and vaccinations
// ABOUTME: Owner-checked create, list, and delete endpoints over simple records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Wellness resource routes.
//!
//! Five record families share the same shape: authenticated create, list of
//! the caller's own records, and delete with an ownership check. Health
//! reports additionally support fetch by id.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ExerciseLog, ExercisePlan, HealthReport, SleepEntry, Vaccination};
use crate::server::ServerResources;

const DEFAULT_LIST_LIMIT: u32 = 100;
const MAX_LIST_LIMIT: u32 = 365;

/// Exercise-plan creation request
#[derive(Debug, Clone, Deserialize)]
pub struct ExercisePlanRequest {
    pub title: String,
    pub description: Option<String>,
    pub sessions_per_week: Option<i32>,
    pub focus_area: Option<String>,
}

/// Exercise-log creation request
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseLogRequest {
    pub activity: String,
    pub duration_minutes: f64,
    pub calories_burned: Option<f64>,
    pub intensity: Option<String>,
    pub logged_at: Option<DateTime<Utc>>,
}

/// Sleep-entry creation request
#[derive(Debug, Clone, Deserialize)]
pub struct SleepEntryRequest {
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub quality: Option<String>,
    pub notes: Option<String>,
}

/// Health-report creation request
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReportRequest {
    pub title: String,
    pub report_type: Option<String>,
    pub summary: Option<String>,
    pub file_url: Option<String>,
    pub reported_on: NaiveDate,
}

/// Vaccination creation request
#[derive(Debug, Clone, Deserialize)]
pub struct VaccinationRequest {
    pub vaccine_name: String,
    pub dose: Option<String>,
    pub administered_on: NaiveDate,
    pub next_due: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u32>,
}

impl ListQuery {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
    }
}

/// Wellness resource route handlers
pub struct WellnessRoutes;

impl WellnessRoutes {
    /// Router for wellness endpoints
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/exercise-plans",
                get(handle_list_exercise_plans).post(handle_create_exercise_plan),
            )
            .route("/api/exercise-plans/:id", delete(handle_delete_exercise_plan))
            .route(
                "/api/exercise-logs",
                get(handle_list_exercise_logs).post(handle_create_exercise_log),
            )
            .route("/api/exercise-logs/:id", delete(handle_delete_exercise_log))
            .route(
                "/api/sleep",
                get(handle_list_sleep_entries).post(handle_create_sleep_entry),
            )
            .route("/api/sleep/:id", delete(handle_delete_sleep_entry))
            .route(
                "/api/health-reports",
                get(handle_list_health_reports).post(handle_create_health_report),
            )
            .route(
                "/api/health-reports/:id",
                get(handle_get_health_report).delete(handle_delete_health_report),
            )
            .route(
                "/api/vaccinations",
                get(handle_list_vaccinations).post(handle_create_vaccination),
            )
            .route("/api/vaccinations/:id", delete(handle_delete_vaccination))
            .with_state(resources)
    }
}

fn deleted_response(kind: &str, id: Uuid) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("{kind} deleted"),
            "id": id,
        })),
    )
        .into_response()
}

async fn handle_create_exercise_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<ExercisePlanRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::invalid_input("Plan title must not be empty"));
    }
    if matches!(request.sessions_per_week, Some(sessions) if sessions <= 0) {
        return Err(AppError::invalid_input(
            "sessions_per_week must be positive",
        ));
    }

    let plan = ExercisePlan {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        title: request.title.trim().to_owned(),
        description: request.description,
        sessions_per_week: request.sessions_per_week,
        focus_area: request.focus_area,
        created_at: Utc::now(),
    };
    resources.database.create_exercise_plan(&plan).await?;

    Ok((StatusCode::CREATED, Json(plan)).into_response())
}

async fn handle_list_exercise_plans(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let plans = resources.database.get_exercise_plans(user.user_id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "count": plans.len(),
            "plans": plans,
        })),
    )
        .into_response())
}

async fn handle_delete_exercise_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(plan_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let plan = resources
        .database
        .get_exercise_plan(plan_id)
        .await?
        .ok_or_else(|| AppError::not_found("exercise plan"))?;
    if plan.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Exercise plan belongs to another user",
        ));
    }

    resources.database.delete_exercise_plan(plan_id).await?;
    Ok(deleted_response("Exercise plan", plan_id))
}

async fn handle_create_exercise_log(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<ExerciseLogRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.activity.trim().is_empty() {
        return Err(AppError::invalid_input("Activity must not be empty"));
    }
    if request.duration_minutes <= 0.0 {
        return Err(AppError::invalid_input("duration_minutes must be positive"));
    }

    let log = ExerciseLog {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        activity: request.activity.trim().to_owned(),
        duration_minutes: request.duration_minutes,
        calories_burned: request.calories_burned,
        intensity: request.intensity,
        logged_at: request.logged_at.unwrap_or_else(Utc::now),
        created_at: Utc::now(),
    };
    resources.database.create_exercise_log(&log).await?;

    Ok((StatusCode::CREATED, Json(log)).into_response())
}

async fn handle_list_exercise_logs(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let logs = resources
        .database
        .get_exercise_logs(user.user_id, query.limit())
        .await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "count": logs.len(),
            "logs": logs,
        })),
    )
        .into_response())
}

async fn handle_delete_exercise_log(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(log_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let log = resources
        .database
        .get_exercise_log(log_id)
        .await?
        .ok_or_else(|| AppError::not_found("exercise log"))?;
    if log.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Exercise log belongs to another user",
        ));
    }

    resources.database.delete_exercise_log(log_id).await?;
    Ok(deleted_response("Exercise log", log_id))
}

async fn handle_create_sleep_entry(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<SleepEntryRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.duration_hours <= 0.0 || request.duration_hours > 24.0 {
        return Err(AppError::invalid_input(
            "duration_hours must be between 0 and 24",
        ));
    }

    let entry = SleepEntry {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        date: request.date,
        duration_hours: request.duration_hours,
        quality: request.quality,
        notes: request.notes,
        created_at: Utc::now(),
    };
    resources.database.create_sleep_entry(&entry).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

async fn handle_list_sleep_entries(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let entries = resources
        .database
        .get_sleep_entries(user.user_id, query.limit())
        .await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "count": entries.len(),
            "entries": entries,
        })),
    )
        .into_response())
}

async fn handle_delete_sleep_entry(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(entry_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let entry = resources
        .database
        .get_sleep_entry(entry_id)
        .await?
        .ok_or_else(|| AppError::not_found("sleep entry"))?;
    if entry.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Sleep entry belongs to another user",
        ));
    }

    resources.database.delete_sleep_entry(entry_id).await?;
    Ok(deleted_response("Sleep entry", entry_id))
}

async fn handle_create_health_report(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<HealthReportRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::invalid_input("Report title must not be empty"));
    }

    let report = HealthReport {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        title: request.title.trim().to_owned(),
        report_type: request.report_type,
        summary: request.summary,
        file_url: request.file_url,
        reported_on: request.reported_on,
        created_at: Utc::now(),
    };
    resources.database.create_health_report(&report).await?;

    Ok((StatusCode::CREATED, Json(report)).into_response())
}

async fn handle_list_health_reports(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let reports = resources.database.get_health_reports(user.user_id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "count": reports.len(),
            "reports": reports,
        })),
    )
        .into_response())
}

async fn handle_get_health_report(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(report_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let report = resources
        .database
        .get_health_report(report_id)
        .await?
        .ok_or_else(|| AppError::not_found("health report"))?;
    if report.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Health report belongs to another user",
        ));
    }

    Ok((StatusCode::OK, Json(report)).into_response())
}

async fn handle_delete_health_report(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(report_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let report = resources
        .database
        .get_health_report(report_id)
        .await?
        .ok_or_else(|| AppError::not_found("health report"))?;
    if report.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Health report belongs to another user",
        ));
    }

    resources.database.delete_health_report(report_id).await?;
    Ok(deleted_response("Health report", report_id))
}

async fn handle_create_vaccination(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<VaccinationRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    if request.vaccine_name.trim().is_empty() {
        return Err(AppError::invalid_input("Vaccine name must not be empty"));
    }

    let vaccination = Vaccination {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        vaccine_name: request.vaccine_name.trim().to_owned(),
        dose: request.dose,
        administered_on: request.administered_on,
        next_due: request.next_due,
        notes: request.notes,
        created_at: Utc::now(),
    };
    resources.database.create_vaccination(&vaccination).await?;

    Ok((StatusCode::CREATED, Json(vaccination)).into_response())
}

async fn handle_list_vaccinations(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let vaccinations = resources.database.get_vaccinations(user.user_id).await?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "count": vaccinations.len(),
            "vaccinations": vaccinations,
        })),
    )
        .into_response())
}

async fn handle_delete_vaccination(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(vaccination_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let vaccination = resources
        .database
        .get_vaccination(vaccination_id)
        .await?
        .ok_or_else(|| AppError::not_found("vaccination"))?;
    if vaccination.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Vaccination belongs to another user",
        ));
    }

    resources.database.delete_vaccination(vaccination_id).await?;
    Ok(deleted_response("Vaccination", vaccination_id))
}
