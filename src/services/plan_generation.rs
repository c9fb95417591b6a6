// ABOUTME: Diet-plan generation pipelines for base and weekly plans
// ABOUTME: Profile-driven prompting, model calls, parsing, backfill, enrichment, persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Plan generation orchestration.
//!
//! Both pipelines follow the same arc: load the user's profile, compute
//! calorie targets, assemble a deterministic prompt, call the generative
//! provider, parse the response into a typed document, enrich it, and insert
//! it. Plans are insert-only; "latest" always means greatest creation
//! timestamp, and regeneration adds a row rather than touching old ones.

use chrono::Utc;
use uuid::Uuid;
use vitalpath_core::models::{DietPlan, HealthMetrics, WeeklyDietPlan};
use vitalpath_intelligence::aggregation::{top_foods, TOP_FOOD_LIMIT};
use vitalpath_intelligence::energy::energy_targets;
use vitalpath_intelligence::macros::backfill_week;
use vitalpath_intelligence::parser::{parse_meal_plan, parse_weekly_plan};
use vitalpath_intelligence::prompts::{meal_plan_prompt, weekly_plan_prompt, PlanPromptContext};

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::external::ImageSearchClient;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::services::enrichment;

/// Days of food history consulted for preferred foods and macro averages
const PREFERENCE_WINDOW_DAYS: u64 = 30;

/// Sampling temperature for plan generation
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Output budget for a single-day plan
const BASE_PLAN_MAX_TOKENS: u32 = 4096;

/// Output budget for a seven-day plan
const WEEKLY_PLAN_MAX_TOKENS: u32 = 8192;

/// Weekly plans always cover the three fixed slots
const WEEKLY_MEALS_PER_DAY: u32 = 3;

/// Inputs for base-plan generation, decoded from the request body
#[derive(Debug, Clone)]
pub struct BasePlanRequest {
    /// Goal weight in kilograms, if the user set one
    pub goal_weight_kg: Option<f64>,
    /// Weeks to reach the goal, if set
    pub timeframe_weeks: Option<u32>,
    /// Requested diet type ("balanced", "vegetarian", ...)
    pub diet_type: String,
    /// Meals per day
    pub meal_count: u32,
    /// Whether to plan snacks between meals
    pub include_snacks: bool,
}

/// Inputs for weekly-plan lookup/generation
#[derive(Debug, Clone, Default)]
pub struct WeeklyPlanQuery {
    /// Force generation of a fresh plan even when one exists
    pub regenerate: bool,
    /// Restrict every meal to one regional cuisine
    pub cuisine_type: Option<String>,
}

/// Generate and persist a base (single-day) diet plan.
///
/// Business rules:
/// - The user must have a health-metrics snapshot (404 otherwise)
/// - Calorie target comes from Mifflin-St Jeor BMR, the activity
///   multiplier, and the goal-weight adjustment
/// - A response the parser cannot recover a plan from is a server-side
///   failure; no placeholder plan is ever substituted
/// - Every generation inserts a new plan row
///
/// # Errors
///
/// Returns `AppError::NotFound` without metrics, `ExternalServiceError`
/// when no provider is configured or the call fails, and
/// `MalformedAiResponse` when the model's text has no usable plan.
pub async fn generate_base_plan(
    database: &Database,
    llm: Option<&dyn LlmProvider>,
    image_search: Option<&ImageSearchClient>,
    user_id: Uuid,
    request: &BasePlanRequest,
) -> AppResult<DietPlan> {
    let metrics = database
        .get_health_metrics(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load health metrics: {e}")))?
        .ok_or_else(|| AppError::not_found("health metrics"))?;

    let provider = require_provider(llm)?;
    let targets = energy_targets(&metrics, request.goal_weight_kg);

    let context = profile_context(
        database,
        user_id,
        &metrics,
        targets.target_calories,
        &request.diet_type,
        request.meal_count,
        request.include_snacks,
    )
    .await?;
    let prompt = meal_plan_prompt(&context);

    let chat = ChatRequest::new(vec![ChatMessage::user(prompt)])
        .with_temperature(GENERATION_TEMPERATURE)
        .with_max_tokens(BASE_PLAN_MAX_TOKENS);
    let response = provider.complete(&chat).await?;

    let mut document = parse_meal_plan(&response.content)?;
    enrichment::enrich_meals(database, image_search, &mut document.meals, None).await;

    let plan = DietPlan {
        id: Uuid::new_v4(),
        user_id,
        target_calories: f64::from(targets.target_calories),
        diet_type: request.diet_type.clone(),
        goal_weight_kg: request.goal_weight_kg,
        timeframe_weeks: request.timeframe_weeks,
        meals: document.meals,
        created_at: Utc::now(),
    };

    database
        .create_diet_plan(&plan)
        .await
        .map_err(|e| AppError::database(format!("Failed to store diet plan: {e}")))?;

    Ok(plan)
}

/// Return an existing weekly plan or generate and persist a fresh one.
///
/// Business rules:
/// - The user must have a base plan (404 otherwise); weekly plans always
///   derive from the latest one
/// - With a cuisine filter, only a stored plan with that exact cuisine tag
///   (for the current base plan) is reused; without one, the most recent
///   weekly plan for the base plan is reused
/// - `regenerate` skips reuse entirely; old rows are kept as history
/// - Weekly responses carry names and calories only; macro grams are
///   backfilled per slot before enrichment
///
/// # Errors
///
/// Returns `AppError::NotFound` without a base plan, plus the same
/// provider/parse errors as [`generate_base_plan`].
pub async fn weekly_plan(
    database: &Database,
    llm: Option<&dyn LlmProvider>,
    image_search: Option<&ImageSearchClient>,
    user_id: Uuid,
    query: &WeeklyPlanQuery,
) -> AppResult<WeeklyDietPlan> {
    let base = database
        .latest_diet_plan(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load diet plan: {e}")))?
        .ok_or_else(|| AppError::not_found("diet plan"))?;

    let cuisine = query
        .cuisine_type
        .as_deref()
        .map(str::trim)
        .filter(|cuisine| !cuisine.is_empty());

    if !query.regenerate {
        let existing = database
            .latest_weekly_plan(base.id, cuisine)
            .await
            .map_err(|e| AppError::database(format!("Failed to load weekly plan: {e}")))?;
        if let Some(plan) = existing {
            return Ok(plan);
        }
    }

    let provider = require_provider(llm)?;

    // The weekly plan inherits the base plan's target instead of recomputing
    // it, so the pair stays consistent even if metrics changed since.
    #[allow(clippy::cast_possible_truncation)]
    let target_calories = base.target_calories.round() as i32;

    let metrics = database
        .get_health_metrics(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load health metrics: {e}")))?;

    let mut context = profile_context_with_history(
        database,
        user_id,
        target_calories,
        &base.diet_type,
        WEEKLY_MEALS_PER_DAY,
        false,
    )
    .await?;
    if let Some(metrics) = &metrics {
        context.allergies = metrics.allergies.clone();
        context.chronic_conditions = metrics.chronic_conditions.clone();
    }

    let prompt = weekly_plan_prompt(&context, cuisine);

    let chat = ChatRequest::new(vec![ChatMessage::user(prompt)])
        .with_temperature(GENERATION_TEMPERATURE)
        .with_max_tokens(WEEKLY_PLAN_MAX_TOKENS);
    let response = provider.complete(&chat).await?;

    let mut document = parse_weekly_plan(&response.content)?;
    backfill_week(&mut document);
    enrichment::enrich_week(database, image_search, &mut document.weekly_plan, cuisine).await;

    let plan = WeeklyDietPlan {
        id: Uuid::new_v4(),
        user_id,
        base_plan_id: base.id,
        cuisine_type: cuisine.map(str::to_owned),
        days: document.weekly_plan,
        created_at: Utc::now(),
    };

    database
        .create_weekly_plan(&plan)
        .await
        .map_err(|e| AppError::database(format!("Failed to store weekly plan: {e}")))?;

    Ok(plan)
}

fn require_provider(llm: Option<&dyn LlmProvider>) -> AppResult<&dyn LlmProvider> {
    llm.ok_or_else(|| AppError::external_service("gemini", "AI provider not configured"))
}

/// Prompt context from the metrics snapshot plus recent food history
async fn profile_context(
    database: &Database,
    user_id: Uuid,
    metrics: &HealthMetrics,
    target_calories: i32,
    diet_type: &str,
    meal_count: u32,
    include_snacks: bool,
) -> AppResult<PlanPromptContext> {
    let mut context = profile_context_with_history(
        database,
        user_id,
        target_calories,
        diet_type,
        meal_count,
        include_snacks,
    )
    .await?;
    context.allergies = metrics.allergies.clone();
    context.chronic_conditions = metrics.chronic_conditions.clone();
    Ok(context)
}

/// Prompt context carrying the history-derived sections only
async fn profile_context_with_history(
    database: &Database,
    user_id: Uuid,
    target_calories: i32,
    diet_type: &str,
    meal_count: u32,
    include_snacks: bool,
) -> AppResult<PlanPromptContext> {
    let today = Utc::now().date_naive();
    let start = today - chrono::Days::new(PREFERENCE_WINDOW_DAYS);

    let start_at = day_start(start);
    let end_at = day_start(today + chrono::Days::new(1));

    let entries = database
        .get_food_entries_in_range(user_id, start_at, end_at)
        .await
        .map_err(|e| AppError::database(format!("Failed to load food entries: {e}")))?;

    let preferred_foods = top_foods(&entries, TOP_FOOD_LIMIT)
        .into_iter()
        .map(|food| food.name)
        .collect();

    let history = database
        .get_food_history_range(user_id, start, today)
        .await
        .map_err(|e| AppError::database(format!("Failed to load food history: {e}")))?;
    let average_macros = average_macros_line(&history);

    Ok(PlanPromptContext {
        target_calories,
        diet_type: diet_type.to_owned(),
        meal_count,
        include_snacks,
        allergies: None,
        chronic_conditions: None,
        preferred_foods,
        average_macros,
    })
}

/// Format the recent-intake summary line, averaging over logged days only
fn average_macros_line(history: &[vitalpath_core::models::UserFoodHistory]) -> Option<String> {
    let logged: Vec<_> = history.iter().filter(|day| day.entry_count > 0).collect();
    if logged.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = logged.len() as f64;
    let calories: f64 = logged.iter().map(|day| day.total_calories).sum::<f64>() / count;
    let protein: f64 = logged.iter().map(|day| day.total_protein_g).sum::<f64>() / count;
    let carbs: f64 = logged.iter().map(|day| day.total_carbs_g).sum::<f64>() / count;
    let fat: f64 = logged.iter().map(|day| day.total_fat_g).sum::<f64>() / count;

    Some(format!(
        "{calories:.0} kcal, {protein:.0} g protein, {carbs:.0} g carbs, {fat:.0} g fat"
    ))
}

fn day_start(day: chrono::NaiveDate) -> chrono::DateTime<Utc> {
    chrono::DateTime::from_naive_utc_and_offset(
        day.and_hms_opt(0, 0, 0).unwrap_or_default(),
        Utc,
    )
}
