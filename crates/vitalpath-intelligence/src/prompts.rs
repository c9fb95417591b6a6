// ABOUTME: Deterministic prompt templates for base and weekly diet-plan generation
// ABOUTME: Pure string assembly; the JSON response contract is embedded verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Prompt construction for diet-plan generation.
//!
//! Builders are deterministic string transforms over a [`PlanPromptContext`]
//! and never touch the network. Each optional input contributes one labeled
//! section, so tests can assert on substrings per input combination. The
//! prompts end with the exact JSON contract the response parser expects.

// === Constants ===

/// Upper bound on preferred foods embedded in a prompt.
pub const MAX_PREFERRED_FOODS: usize = 5;

/// JSON shape the model must produce for a base plan.
pub const MEAL_PLAN_CONTRACT: &str = r#"{"meals": [{"name": "...", "calories": 0, "protein": 0, "carbs": 0, "fat": 0, "foods": [{"name": "...", "portion": "..."}]}]}"#;

/// JSON shape the model must produce for a weekly plan.
pub const WEEKLY_PLAN_CONTRACT: &str = r#"{"weeklyPlan": [{"day": "Monday", "meals": {"breakfast": {"name": "...", "calories": 0, "foods": [{"name": "...", "portion": "..."}]}, "lunch": {"name": "...", "calories": 0, "foods": []}, "dinner": {"name": "...", "calories": 0, "foods": []}}}]}"#;

// === Context ===

/// Inputs shared by the base and weekly prompt builders.
#[derive(Debug, Clone, Default)]
pub struct PlanPromptContext {
    /// Daily calorie target in kcal
    pub target_calories: i32,
    /// Requested diet type ("balanced", "vegetarian", ...)
    pub diet_type: String,
    /// Number of meals per day
    pub meal_count: u32,
    /// Whether snacks between meals are wanted
    pub include_snacks: bool,
    /// Known allergies, free text
    pub allergies: Option<String>,
    /// Chronic conditions to account for, free text
    pub chronic_conditions: Option<String>,
    /// Foods the user logs most often; only the first
    /// [`MAX_PREFERRED_FOODS`] are embedded
    pub preferred_foods: Vec<String>,
    /// Pre-formatted average daily macro summary line
    pub average_macros: Option<String>,
}

// === Builders ===

/// Prompt for a single-day base meal plan.
#[must_use]
pub fn meal_plan_prompt(context: &PlanPromptContext) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a registered dietitian creating a personalized one-day meal plan.\n\n",
    );
    push_requirements(&mut prompt, context);
    push_profile_sections(&mut prompt, context);

    prompt.push_str("Respond with only a JSON object in exactly this shape:\n");
    prompt.push_str(MEAL_PLAN_CONTRACT);
    prompt.push_str(
        "\nEvery meal needs calories, protein, carbs, and fat. Do not wrap the JSON in markdown fences or add commentary.\n",
    );

    prompt
}

/// Prompt for a seven-day weekly plan derived from the same profile.
///
/// When `cuisine_type` is given, every meal is constrained to that cuisine.
#[must_use]
pub fn weekly_plan_prompt(context: &PlanPromptContext, cuisine_type: Option<&str>) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a registered dietitian creating a seven-day meal plan with breakfast, lunch, and dinner for each day.\n\n",
    );
    push_requirements(&mut prompt, context);
    if let Some(cuisine) = cuisine_type {
        prompt.push_str(&format!("All meals must be {cuisine} cuisine.\n"));
    }
    push_profile_sections(&mut prompt, context);

    prompt.push_str(
        "Label the days Monday through Sunday. Respond with only a JSON object in exactly this shape:\n",
    );
    prompt.push_str(WEEKLY_PLAN_CONTRACT);
    prompt.push_str(
        "\nEvery meal needs a name and calories. Do not wrap the JSON in markdown fences or add commentary.\n",
    );

    prompt
}

fn push_requirements(prompt: &mut String, context: &PlanPromptContext) {
    prompt.push_str(&format!(
        "Daily target: {} kcal.\nDiet type: {}.\nMeals per day: {}.\n",
        context.target_calories, context.diet_type, context.meal_count
    ));
    if context.include_snacks {
        prompt.push_str("Include healthy snacks between meals.\n");
    } else {
        prompt.push_str("Do not include snacks.\n");
    }
}

fn push_profile_sections(prompt: &mut String, context: &PlanPromptContext) {
    if let Some(allergies) = &context.allergies {
        prompt.push_str(&format!("Strictly avoid these allergens: {allergies}.\n"));
    }
    if let Some(conditions) = &context.chronic_conditions {
        prompt.push_str(&format!(
            "Account for these health conditions: {conditions}.\n"
        ));
    }
    if !context.preferred_foods.is_empty() {
        let favorites: Vec<&str> = context
            .preferred_foods
            .iter()
            .take(MAX_PREFERRED_FOODS)
            .map(String::as_str)
            .collect();
        prompt.push_str(&format!(
            "Favor foods the user already eats: {}.\n",
            favorites.join(", ")
        ));
    }
    if let Some(macros) = &context.average_macros {
        prompt.push_str(&format!("Recent average daily intake: {macros}.\n"));
    }
    prompt.push('\n');
}
