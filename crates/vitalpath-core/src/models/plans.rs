// ABOUTME: Diet plan models for AI-generated base and weekly meal plans
// ABOUTME: Lenient serde documents for model output plus persisted plan records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One food within a planned meal, with a human-readable portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPortion {
    /// Food name
    #[serde(default)]
    pub name: String,
    /// Portion description ("150 g", "1 cup")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
}

/// A single planned meal
///
/// Base-plan responses carry full macros. Weekly-plan responses often omit
/// them, in which case the macro backfill estimator fills the `protein`,
/// `carbs`, and `fat` fields from the meal's calories. All fields default so
/// a partially-formed meal still deserializes; consumers treat absent values
/// as empty or zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    /// Meal name
    #[serde(default)]
    pub name: String,
    /// Calories (kcal)
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Foods making up the meal, with portions
    #[serde(default)]
    pub foods: Vec<FoodPortion>,
    /// Image URL resolved for the meal's first food item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PlannedMeal {
    /// First listed food item, the one image enrichment resolves
    #[must_use]
    pub fn first_food(&self) -> Option<&FoodPortion> {
        self.foods.first()
    }
}

/// Top-level document of a base-plan model response: `{ "meals": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDocument {
    /// Meals for one day, in serving order
    #[serde(default)]
    pub meals: Vec<PlannedMeal>,
}

/// The three fixed meal slots of one planned day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    /// Breakfast, if planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<PlannedMeal>,
    /// Lunch, if planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<PlannedMeal>,
    /// Dinner, if planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<PlannedMeal>,
}

impl DayMeals {
    /// Mutable references to the slots present, in breakfast/lunch/dinner order
    pub fn slots_mut(&mut self) -> [(MealSlotKind, Option<&mut PlannedMeal>); 3] {
        [
            (MealSlotKind::Breakfast, self.breakfast.as_mut()),
            (MealSlotKind::Lunch, self.lunch.as_mut()),
            (MealSlotKind::Dinner, self.dinner.as_mut()),
        ]
    }
}

/// Which of the three planned slots a meal occupies
///
/// Distinct from the free-form [`super::MealSlot`] used for logged food
/// entries: weekly plans only ever carry these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlotKind {
    /// Breakfast slot
    Breakfast,
    /// Lunch slot
    Lunch,
    /// Dinner slot
    Dinner,
}

/// One day of a weekly plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label ("Monday", "Day 1")
    #[serde(default)]
    pub day: String,
    /// Planned meals for the day
    #[serde(default)]
    pub meals: DayMeals,
}

/// Top-level document of a weekly-plan model response: `{ "weeklyPlan": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlanDocument {
    /// Seven day-plans, in week order
    #[serde(default, rename = "weeklyPlan")]
    pub weekly_plan: Vec<DayPlan>,
}

/// Persisted base diet plan
///
/// Insert-only: regeneration inserts a new row and the latest plan is the one
/// with the greatest creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Daily calorie target the plan was generated for
    pub target_calories: f64,
    /// Diet type requested ("balanced", "vegetarian", ...)
    pub diet_type: String,
    /// Goal weight in kilograms, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    /// Timeframe for the goal in weeks, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe_weeks: Option<u32>,
    /// The planned meals
    pub meals: Vec<PlannedMeal>,
    /// When the plan was generated
    pub created_at: DateTime<Utc>,
}

/// Persisted weekly diet plan derived from a base plan
///
/// Insert-only like [`DietPlan`]; lookup precedence and regeneration are the
/// plan service's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDietPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Base plan this weekly plan was derived from
    pub base_plan_id: Uuid,
    /// Cuisine tag the plan was generated for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    /// Seven day-plans
    pub days: Vec<DayPlan>,
    /// When the plan was generated
    pub created_at: DateTime<Utc>,
}
