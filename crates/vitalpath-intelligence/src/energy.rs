// ABOUTME: Energy expenditure math: BMR (Mifflin-St Jeor), TDEE, calorie targets
// ABOUTME: Pure total functions; unrecognized activity levels fall back to moderate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Basal metabolic rate and daily calorie-target calculation.
//!
//! Uses the Mifflin-St Jeor equation with the standard five-level activity
//! multiplier table. All functions are pure and total: unrecognized activity
//! levels resolve to the moderate multiplier, and non-"female" genders take
//! the male formula branch. Callers validate that numeric inputs are
//! non-negative and finite.

use serde::Serialize;
use vitalpath_core::models::HealthMetrics;

// === Constants ===

/// Mifflin-St Jeor weight coefficient (kcal per kg).
pub const WEIGHT_COEFFICIENT: f64 = 10.0;

/// Mifflin-St Jeor height coefficient (kcal per cm).
pub const HEIGHT_COEFFICIENT: f64 = 6.25;

/// Mifflin-St Jeor age coefficient (kcal per year).
pub const AGE_COEFFICIENT: f64 = 5.0;

/// Constant term for the female formula branch.
pub const FEMALE_OFFSET: f64 = -161.0;

/// Constant term for the male formula branch.
pub const MALE_OFFSET: f64 = 5.0;

/// Activity multiplier: little or no exercise.
pub const SEDENTARY_MULTIPLIER: f64 = 1.2;

/// Activity multiplier: light exercise 1-3 days/week.
pub const LIGHT_MULTIPLIER: f64 = 1.375;

/// Activity multiplier: moderate exercise 3-5 days/week. Also the fallback
/// for unrecognized activity levels.
pub const MODERATE_MULTIPLIER: f64 = 1.55;

/// Activity multiplier: hard exercise 6-7 days/week.
pub const ACTIVE_MULTIPLIER: f64 = 1.725;

/// Activity multiplier: very hard exercise and a physical job.
pub const VERY_ACTIVE_MULTIPLIER: f64 = 1.9;

/// Daily deficit applied when the goal weight is below the current weight.
pub const WEIGHT_LOSS_DEFICIT: i32 = 500;

/// Daily surplus applied when the goal weight is above the current weight.
pub const WEIGHT_GAIN_SURPLUS: i32 = 300;

// === Calculations ===

/// Basal metabolic rate in kcal/day via Mifflin-St Jeor.
///
/// The female branch is selected when `gender` trims and lowercases to
/// exactly `"female"`; every other value takes the male branch.
#[must_use]
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> f64 {
    let offset = if gender.trim().eq_ignore_ascii_case("female") {
        FEMALE_OFFSET
    } else {
        MALE_OFFSET
    };
    WEIGHT_COEFFICIENT * weight_kg + HEIGHT_COEFFICIENT * height_cm
        - AGE_COEFFICIENT * f64::from(age_years)
        + offset
}

/// Activity multiplier for a free-text activity level.
///
/// Total over all inputs: the level is trimmed, lowercased, and has
/// whitespace and underscores collapsed to hyphens before lookup, and
/// anything unrecognized resolves to [`MODERATE_MULTIPLIER`].
#[must_use]
pub fn activity_multiplier(level: &str) -> f64 {
    let normalized: String = level
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    match normalized.as_str() {
        "sedentary" => SEDENTARY_MULTIPLIER,
        "light" => LIGHT_MULTIPLIER,
        "active" => ACTIVE_MULTIPLIER,
        "very-active" => VERY_ACTIVE_MULTIPLIER,
        _ => MODERATE_MULTIPLIER,
    }
}

/// Calorie adjustment for a weight goal relative to the current weight.
///
/// Negative for weight loss, positive for weight gain, zero when no goal is
/// set or the goal equals the current weight.
#[must_use]
pub fn goal_adjustment(current_weight_kg: f64, goal_weight_kg: Option<f64>) -> i32 {
    match goal_weight_kg {
        Some(goal) if goal < current_weight_kg => -WEIGHT_LOSS_DEFICIT,
        Some(goal) if goal > current_weight_kg => WEIGHT_GAIN_SURPLUS,
        _ => 0,
    }
}

/// Integer daily calorie target: `round(bmr * multiplier) + adjustment`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn daily_calorie_target(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: &str,
    activity_level: &str,
    goal_weight_kg: Option<f64>,
) -> i32 {
    let tdee = bmr(weight_kg, height_cm, age_years, gender) * activity_multiplier(activity_level);
    tdee.round() as i32 + goal_adjustment(weight_kg, goal_weight_kg)
}

// === Results ===

/// Computed energy figures for one metrics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyTargets {
    /// Basal metabolic rate in kcal/day.
    pub bmr: f64,
    /// Total daily energy expenditure (BMR times activity multiplier),
    /// before rounding.
    pub tdee: f64,
    /// Integer daily calorie target after the goal adjustment.
    pub target_calories: i32,
}

/// Compute BMR, TDEE, and the daily calorie target for a metrics snapshot.
#[must_use]
pub fn energy_targets(metrics: &HealthMetrics, goal_weight_kg: Option<f64>) -> EnergyTargets {
    let bmr_value = bmr(
        metrics.weight_kg,
        metrics.height_cm,
        metrics.age,
        &metrics.gender,
    );
    let tdee = bmr_value * activity_multiplier(&metrics.activity_level);
    EnergyTargets {
        bmr: bmr_value,
        tdee,
        target_calories: daily_calorie_target(
            metrics.weight_kg,
            metrics.height_cm,
            metrics.age,
            &metrics.gender,
            &metrics.activity_level,
            goal_weight_kg,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bmr_female_branch_requires_exactly_female() {
        let female = bmr(60.0, 165.0, 25, "female");
        assert!(close(female, 600.0 + 1031.25 - 125.0 - 161.0));

        // Case and surrounding whitespace do not matter
        assert!(close(bmr(60.0, 165.0, 25, "FEMALE"), female));
        assert!(close(bmr(60.0, 165.0, 25, "  Female "), female));

        // Anything else takes the male branch
        let male = bmr(60.0, 165.0, 25, "male");
        assert!(close(male, 600.0 + 1031.25 - 125.0 + 5.0));
        assert!(close(bmr(60.0, 165.0, 25, "nonbinary"), male));
        assert!(close(bmr(60.0, 165.0, 25, ""), male));
        assert!(close(bmr(60.0, 165.0, 25, "femme"), male));
    }

    #[test]
    fn test_activity_multiplier_known_levels() {
        assert!(close(activity_multiplier("sedentary"), 1.2));
        assert!(close(activity_multiplier("light"), 1.375));
        assert!(close(activity_multiplier("moderate"), 1.55));
        assert!(close(activity_multiplier("active"), 1.725));
        assert!(close(activity_multiplier("very-active"), 1.9));
    }

    #[test]
    fn test_activity_multiplier_is_total() {
        // Case, spacing, and underscores are tolerated
        assert!(close(activity_multiplier("SEDENTARY"), 1.2));
        assert!(close(activity_multiplier("Very Active"), 1.9));
        assert!(close(activity_multiplier("very_active"), 1.9));
        assert!(close(activity_multiplier("  moderate  "), 1.55));

        // Unrecognized levels fall back to moderate
        assert!(close(activity_multiplier(""), 1.55));
        assert!(close(activity_multiplier("superhuman"), 1.55));
        assert!(close(activity_multiplier("couch"), 1.55));
    }

    #[test]
    fn test_goal_adjustment_direction() {
        assert_eq!(goal_adjustment(80.0, Some(75.0)), -500);
        assert_eq!(goal_adjustment(80.0, Some(85.0)), 300);
        assert_eq!(goal_adjustment(80.0, Some(80.0)), 0);
        assert_eq!(goal_adjustment(80.0, None), 0);
    }

    #[test]
    fn test_reference_scenario_80kg_175cm_30y_male() {
        // 10*80 + 6.25*175 - 5*30 + 5 = 1748.75
        let basal = bmr(80.0, 175.0, 30, "male");
        assert!(close(basal, 1748.75));

        // 1748.75 * 1.55 = 2710.5625, rounded 2711, minus the 500 deficit
        let target = daily_calorie_target(80.0, 175.0, 30, "male", "moderate", Some(75.0));
        assert_eq!(target, 2211);

        // Gaining instead adds the 300 surplus
        let gaining = daily_calorie_target(80.0, 175.0, 30, "male", "moderate", Some(85.0));
        assert_eq!(gaining, 3011);

        // No goal leaves the rounded TDEE untouched
        let maintain = daily_calorie_target(80.0, 175.0, 30, "male", "moderate", None);
        assert_eq!(maintain, 2711);
    }
}
