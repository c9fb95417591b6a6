// ABOUTME: Macro backfill estimator for weekly plans with missing macro breakdowns
// ABOUTME: Fixed per-slot caloric ratios, 4/4/9 kcal-per-gram, independent rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Estimation of missing macro grams from meal calories.
//!
//! Weekly-plan generation asks the model for meal names and calories only;
//! macro grams get filled in here from a fixed caloric split per slot. Base
//! (single-day) plans are never backfilled: the model supplies their macros
//! directly. Each gram value is rounded to the nearest integer on its own,
//! with no renormalization pass, so recombining the grams can drift a few
//! kcal from the stated meal calories.

use vitalpath_core::models::{MealSlotKind, PlannedMeal, WeeklyPlanDocument};

// === Constants ===

/// Energy density of protein (kcal per gram).
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;

/// Energy density of carbohydrates (kcal per gram).
pub const CARBS_KCAL_PER_G: f64 = 4.0;

/// Energy density of fat (kcal per gram).
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Caloric ratio split for one meal slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSplit {
    /// Share of calories assigned to protein
    pub protein: f64,
    /// Share of calories assigned to carbohydrates
    pub carbs: f64,
    /// Share of calories assigned to fat
    pub fat: f64,
}

/// Breakfast split: 20% protein / 60% carbs / 20% fat.
pub const BREAKFAST_SPLIT: SlotSplit = SlotSplit {
    protein: 0.20,
    carbs: 0.60,
    fat: 0.20,
};

/// Lunch split: 30% protein / 40% carbs / 30% fat.
pub const LUNCH_SPLIT: SlotSplit = SlotSplit {
    protein: 0.30,
    carbs: 0.40,
    fat: 0.30,
};

/// Dinner split: 40% protein / 30% carbs / 30% fat.
pub const DINNER_SPLIT: SlotSplit = SlotSplit {
    protein: 0.40,
    carbs: 0.30,
    fat: 0.30,
};

// === Backfill ===

/// The caloric split used for a slot.
#[must_use]
pub const fn split_for(slot: MealSlotKind) -> SlotSplit {
    match slot {
        MealSlotKind::Breakfast => BREAKFAST_SPLIT,
        MealSlotKind::Lunch => LUNCH_SPLIT,
        MealSlotKind::Dinner => DINNER_SPLIT,
    }
}

/// Fill the missing macro grams of one meal from its calories.
///
/// Only absent fields are written; macros the model did supply are kept.
/// Each gram value rounds to the nearest integer independently.
pub fn backfill_meal(meal: &mut PlannedMeal, slot: MealSlotKind) {
    if meal.protein.is_some() && meal.carbs.is_some() && meal.fat.is_some() {
        return;
    }

    let split = split_for(slot);
    if meal.protein.is_none() {
        meal.protein = Some((meal.calories * split.protein / PROTEIN_KCAL_PER_G).round());
    }
    if meal.carbs.is_none() {
        meal.carbs = Some((meal.calories * split.carbs / CARBS_KCAL_PER_G).round());
    }
    if meal.fat.is_none() {
        meal.fat = Some((meal.calories * split.fat / FAT_KCAL_PER_G).round());
    }
}

/// Backfill every slot of every day in a weekly plan document.
pub fn backfill_week(document: &mut WeeklyPlanDocument) {
    for day in &mut document.weekly_plan {
        for (slot, meal) in day.meals.slots_mut() {
            if let Some(meal) = meal {
                backfill_meal(meal, slot);
            }
        }
    }
}
