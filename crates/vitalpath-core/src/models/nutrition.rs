// ABOUTME: Nutrition tracking models for food intake analysis
// ABOUTME: MealSlot, FoodEntry, and the per-day UserFoodHistory rollup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slot of the day a food entry belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal slot
    Other,
}

impl MealSlot {
    /// Parse a meal slot from free-form user input
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }

    /// Canonical lowercase name, used as the storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Other => "other",
        }
    }
}

/// One recorded food item
///
/// Creating, updating, or deleting an entry triggers a full recomputation of
/// the [`UserFoodHistory`] row for the day the entry falls on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Food name as entered
    pub name: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Protein share of calories, percent (if the client supplied it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_pct: Option<f64>,
    /// Carbohydrate share of calories, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_pct: Option<f64>,
    /// Fat share of calories, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_pct: Option<f64>,
    /// Slot of the day this entry belongs to
    pub meal_slot: MealSlot,
    /// Image URL for the food (if resolved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// When the food was consumed
    pub recorded_at: DateTime<Utc>,
    /// When the entry row was created
    pub created_at: DateTime<Utc>,
}

impl FoodEntry {
    /// UTC calendar day this entry contributes to
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }
}

/// Per-day nutrition rollup for one user
///
/// One row per (user, day). Never updated incrementally: every food-entry
/// mutation recomputes the whole day from its entry set, which makes the
/// recomputation idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFoodHistory {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day this row summarizes
    pub day: NaiveDate,
    /// Total calories across the day's entries
    pub total_calories: f64,
    /// Total protein in grams
    pub total_protein_g: f64,
    /// Total carbohydrates in grams
    pub total_carbs_g: f64,
    /// Total fat in grams
    pub total_fat_g: f64,
    /// Number of entries contributing to the totals
    pub entry_count: u32,
    /// Ids of the contributing entries
    pub entry_ids: Vec<Uuid>,
    /// When the row was last recomputed
    pub updated_at: DateTime<Utc>,
}

impl UserFoodHistory {
    /// An empty rollup for a day with no entries
    #[must_use]
    pub fn empty(user_id: Uuid, day: NaiveDate) -> Self {
        Self {
            user_id,
            day,
            total_calories: 0.0,
            total_protein_g: 0.0,
            total_carbs_g: 0.0,
            total_fat_g: 0.0,
            entry_count: 0,
            entry_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}
