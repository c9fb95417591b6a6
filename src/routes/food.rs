// ABOUTME: Food-entry route handlers for logging, editing, and summarizing intake
// ABOUTME: CRUD over food entries plus bucketed nutrition summaries and daily rollups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Food-entry and nutrition-summary routes.
//!
//! Every entry mutation keeps the per-day rollup current: the database layer
//! recomputes the entry's day, and the update handler additionally recomputes
//! the previous day when an edit moves the entry across a day boundary.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use vitalpath_intelligence::aggregation::{summarize, Granularity};

use crate::errors::AppError;
use crate::models::{FoodEntry, MealSlot, UserFoodHistory};
use crate::server::ServerResources;

const DEFAULT_RECENT_LIMIT: u32 = 50;
const MAX_RECENT_LIMIT: u32 = 200;

/// Food entry create/update payload
#[derive(Debug, Clone, Deserialize)]
pub struct FoodEntryRequest {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    pub protein_pct: Option<f64>,
    pub carbs_pct: Option<f64>,
    pub fat_pct: Option<f64>,
    pub meal_slot: Option<String>,
    pub image_url: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Recent entries, newest first
#[derive(Debug, Serialize)]
pub struct FoodEntriesResponse {
    pub entries: Vec<FoodEntry>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    start: Option<String>,
    end: Option<String>,
    granularity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuery {
    date: Option<String>,
}

/// Food-entry route handlers
pub struct FoodRoutes;

impl FoodRoutes {
    /// Router for food-entry endpoints
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/food-entries",
                get(handle_list_entries).post(handle_create_entry),
            )
            .route(
                "/api/food-entries/:id",
                axum::routing::put(handle_update_entry).delete(handle_delete_entry),
            )
            .route("/api/food-entries/summary", get(handle_summary))
            .route("/api/food-entries/daily", get(handle_daily))
            .with_state(resources)
    }
}

fn validate_entry(request: &FoodEntryRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::invalid_input("Food name must not be empty"));
    }
    if request.calories < 0.0
        || request.protein_g < 0.0
        || request.carbs_g < 0.0
        || request.fat_g < 0.0
    {
        return Err(AppError::invalid_input(
            "Calories and macros must be non-negative",
        ));
    }
    Ok(())
}

fn parse_day(value: Option<&str>, name: &str) -> Result<NaiveDate, AppError> {
    let Some(raw) = value else {
        return Err(AppError::invalid_input(format!(
            "Missing required parameter: {name}"
        )));
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid {name} date (expected YYYY-MM-DD)")))
}

async fn handle_create_entry(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(request): Json<FoodEntryRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;
    validate_entry(&request)?;

    let now = Utc::now();
    let entry = FoodEntry {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        name: request.name.trim().to_owned(),
        calories: request.calories,
        protein_g: request.protein_g,
        carbs_g: request.carbs_g,
        fat_g: request.fat_g,
        protein_pct: request.protein_pct,
        carbs_pct: request.carbs_pct,
        fat_pct: request.fat_pct,
        meal_slot: request
            .meal_slot
            .as_deref()
            .map_or(MealSlot::Other, MealSlot::from_str_lossy),
        image_url: request.image_url,
        recorded_at: request.recorded_at.unwrap_or(now),
        created_at: now,
    };

    resources.database.create_food_entry(&entry).await?;
    tracing::debug!("Food entry {} created for user {}", entry.id, user.user_id);

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

async fn handle_list_entries(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<RecentQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);
    let entries = resources
        .database
        .get_recent_food_entries(user.user_id, limit)
        .await?;

    let response = FoodEntriesResponse {
        count: entries.len(),
        entries,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn handle_update_entry(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<FoodEntryRequest>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let existing = resources
        .database
        .get_food_entry(entry_id)
        .await?
        .ok_or_else(|| AppError::not_found("food entry"))?;
    if existing.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Food entry belongs to another user",
        ));
    }

    validate_entry(&request)?;

    let previous_day = existing.day();
    let updated = FoodEntry {
        id: existing.id,
        user_id: existing.user_id,
        name: request.name.trim().to_owned(),
        calories: request.calories,
        protein_g: request.protein_g,
        carbs_g: request.carbs_g,
        fat_g: request.fat_g,
        protein_pct: request.protein_pct,
        carbs_pct: request.carbs_pct,
        fat_pct: request.fat_pct,
        meal_slot: request
            .meal_slot
            .as_deref()
            .map_or(existing.meal_slot, MealSlot::from_str_lossy),
        image_url: request.image_url.or(existing.image_url),
        recorded_at: request.recorded_at.unwrap_or(existing.recorded_at),
        created_at: existing.created_at,
    };

    resources.database.update_food_entry(&updated).await?;
    if updated.day() != previous_day {
        resources
            .database
            .recompute_food_history(user.user_id, previous_day)
            .await?;
    }

    Ok((StatusCode::OK, Json(updated)).into_response())
}

async fn handle_delete_entry(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Path(entry_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let existing = resources
        .database
        .get_food_entry(entry_id)
        .await?
        .ok_or_else(|| AppError::not_found("food entry"))?;
    if existing.user_id != user.user_id {
        return Err(AppError::permission_denied(
            "Food entry belongs to another user",
        ));
    }

    resources.database.delete_food_entry(entry_id).await?;
    tracing::debug!("Food entry {} deleted for user {}", entry_id, user.user_id);

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Food entry deleted",
            "id": entry_id,
        })),
    )
        .into_response())
}

async fn handle_summary(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let start = parse_day(query.start.as_deref(), "start")?;
    let end = parse_day(query.end.as_deref(), "end")?;
    if start > end {
        return Err(AppError::invalid_input("start must not be after end"));
    }
    let granularity: Granularity = query
        .granularity
        .as_deref()
        .unwrap_or("day")
        .parse()
        .map_err(|e: vitalpath_intelligence::aggregation::UnknownGranularity| {
            AppError::invalid_input(e.to_string())
        })?;

    let start_at = day_start(start);
    let end_at = day_start(end + chrono::Days::new(1));
    let entries = resources
        .database
        .get_food_entries_in_range(user.user_id, start_at, end_at)
        .await?;
    let history = resources
        .database
        .get_food_history_range(user.user_id, start, end)
        .await?;

    let summary = summarize(&entries, &history, end, granularity);
    Ok((StatusCode::OK, Json(summary)).into_response())
}

async fn handle_daily(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(query): Query<DailyQuery>,
) -> Result<Response, AppError> {
    let user = resources.auth_middleware.authenticate_request(&headers).await?;

    let day = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_input("Invalid date (expected YYYY-MM-DD)"))?,
        None => Utc::now().date_naive(),
    };

    let rollup = resources
        .database
        .get_food_history_day(user.user_id, day)
        .await?
        .unwrap_or_else(|| UserFoodHistory::empty(user.user_id, day));

    Ok((StatusCode::OK, Json(rollup)).into_response())
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(day.and_hms_opt(0, 0, 0).unwrap_or_default(), Utc)
}
