// ABOUTME: Image resolution pipeline attaching photos to planned meals
// ABOUTME: Static dish map, stored lookup, search-and-store, then placeholder fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Meal image enrichment.
//!
//! Each planned meal gets one image, resolved for its first listed food item
//! only. Resolution tries, in order: a static map of pre-known dish names,
//! the stored-image table, an external image search whose hit is persisted
//! for next time, and finally a placeholder. Failures along the way downgrade
//! to the next step and are logged; enriching one meal can never abort the
//! plan it belongs to.
//!
//! Calls run sequentially within a request. A full weekly plan resolves at
//! most 21 items, and every search hit is persisted, so steady state costs
//! one lookup per item and no search calls.

use tracing::{debug, warn};
use vitalpath_core::models::{DayPlan, PlannedMeal};

use crate::database::Database;
use crate::external::ImageSearchClient;

/// Placeholder shown when no image could be resolved and no cuisine is known
pub const GENERIC_PLACEHOLDER_URL: &str =
    "https://cdn.vitalpath.app/food-images/placeholder-meal.jpg";

/// Placeholder shown when the plan was generated for a regional cuisine
pub const CUISINE_PLACEHOLDER_URL: &str =
    "https://cdn.vitalpath.app/food-images/placeholder-cuisine.jpg";

/// Source tag stored alongside image URLs resolved through search
const SEARCH_SOURCE: &str = "search";

/// Pre-known dishes matched by substring against the normalized food name.
///
/// Keys are in normalized (hyphenated) form. More specific keys come first
/// so "chicken-salad" wins over both "chicken" and "salad".
const KNOWN_DISH_IMAGES: &[(&str, &str)] = &[
    (
        "chicken-salad",
        "https://cdn.vitalpath.app/food-images/chicken-salad.jpg",
    ),
    (
        "grilled-chicken",
        "https://cdn.vitalpath.app/food-images/grilled-chicken.jpg",
    ),
    (
        "scrambled-egg",
        "https://cdn.vitalpath.app/food-images/scrambled-eggs.jpg",
    ),
    (
        "greek-yogurt",
        "https://cdn.vitalpath.app/food-images/greek-yogurt.jpg",
    ),
    (
        "avocado-toast",
        "https://cdn.vitalpath.app/food-images/avocado-toast.jpg",
    ),
    (
        "brown-rice",
        "https://cdn.vitalpath.app/food-images/brown-rice.jpg",
    ),
    (
        "stir-fry",
        "https://cdn.vitalpath.app/food-images/stir-fry.jpg",
    ),
    ("oatmeal", "https://cdn.vitalpath.app/food-images/oatmeal.jpg"),
    (
        "omelette",
        "https://cdn.vitalpath.app/food-images/omelette.jpg",
    ),
    ("pancake", "https://cdn.vitalpath.app/food-images/pancakes.jpg"),
    (
        "smoothie",
        "https://cdn.vitalpath.app/food-images/smoothie.jpg",
    ),
    ("granola", "https://cdn.vitalpath.app/food-images/granola.jpg"),
    ("chicken", "https://cdn.vitalpath.app/food-images/chicken.jpg"),
    ("salmon", "https://cdn.vitalpath.app/food-images/salmon.jpg"),
    ("salad", "https://cdn.vitalpath.app/food-images/salad.jpg"),
    ("quinoa", "https://cdn.vitalpath.app/food-images/quinoa.jpg"),
    ("pasta", "https://cdn.vitalpath.app/food-images/pasta.jpg"),
    ("lentil", "https://cdn.vitalpath.app/food-images/lentils.jpg"),
    ("soup", "https://cdn.vitalpath.app/food-images/soup.jpg"),
    ("tofu", "https://cdn.vitalpath.app/food-images/tofu.jpg"),
];

/// Normalize a food name into its lookup/storage key.
///
/// Trims, lowercases, and collapses whitespace runs into single hyphens, so
/// " Grilled  Chicken " and "grilled chicken" share the key
/// "grilled-chicken".
#[must_use]
pub fn normalize_food_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Static-map hit for a normalized food name, if any
#[must_use]
pub fn known_dish_image(normalized_name: &str) -> Option<&'static str> {
    KNOWN_DISH_IMAGES
        .iter()
        .find(|(key, _)| normalized_name.contains(key))
        .map(|(_, url)| *url)
}

/// Placeholder URL for the prompt's cuisine context
#[must_use]
pub const fn placeholder_url(cuisine: Option<&str>) -> &'static str {
    match cuisine {
        Some(_) => CUISINE_PLACEHOLDER_URL,
        None => GENERIC_PLACEHOLDER_URL,
    }
}

/// Resolve an image URL for one food name.
///
/// Business rules:
/// - Static-map hits return immediately and are never persisted
/// - Stored lookups use the exact normalized-name key
/// - Search hits are persisted under the normalized name before returning
/// - Any storage or search failure falls back to a placeholder; the error
///   is logged and never propagated
pub async fn resolve_food_image(
    database: &Database,
    image_search: Option<&ImageSearchClient>,
    food_name: &str,
    cuisine: Option<&str>,
) -> String {
    let normalized = normalize_food_name(food_name);

    if let Some(url) = known_dish_image(&normalized) {
        return url.to_owned();
    }

    match lookup_or_search(database, image_search, &normalized, food_name).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            debug!(food = %food_name, "no image found, using placeholder");
            placeholder_url(cuisine).to_owned()
        }
        Err(error) => {
            warn!(food = %food_name, error = %error, "image resolution failed, using placeholder");
            placeholder_url(cuisine).to_owned()
        }
    }
}

/// Stored lookup, then external search with persist-on-hit
async fn lookup_or_search(
    database: &Database,
    image_search: Option<&ImageSearchClient>,
    normalized: &str,
    food_name: &str,
) -> anyhow::Result<Option<String>> {
    if let Some(url) = database.get_food_image(normalized).await? {
        return Ok(Some(url));
    }

    let Some(client) = image_search else {
        return Ok(None);
    };

    let query = format!("{} food", food_name.trim());
    let Some(url) = client.top_image_url(&query).await? else {
        return Ok(None);
    };

    database
        .store_food_image(normalized, &url, SEARCH_SOURCE)
        .await?;

    Ok(Some(url))
}

/// Attach images to a list of planned meals, first food item of each only.
///
/// Meals without foods (or with a blank first food name) are left without an
/// image reference.
pub async fn enrich_meals(
    database: &Database,
    image_search: Option<&ImageSearchClient>,
    meals: &mut [PlannedMeal],
    cuisine: Option<&str>,
) {
    for meal in meals.iter_mut() {
        enrich_one(database, image_search, meal, cuisine).await;
    }
}

/// Attach images across every day of a weekly plan
pub async fn enrich_week(
    database: &Database,
    image_search: Option<&ImageSearchClient>,
    days: &mut [DayPlan],
    cuisine: Option<&str>,
) {
    for day in days.iter_mut() {
        for (_, meal) in day.meals.slots_mut() {
            if let Some(meal) = meal {
                enrich_one(database, image_search, meal, cuisine).await;
            }
        }
    }
}

async fn enrich_one(
    database: &Database,
    image_search: Option<&ImageSearchClient>,
    meal: &mut PlannedMeal,
    cuisine: Option<&str>,
) {
    let Some(food_name) = meal
        .first_food()
        .map(|food| food.name.trim().to_owned())
        .filter(|name| !name.is_empty())
    else {
        return;
    };

    meal.image_url = Some(resolve_food_image(database, image_search, &food_name, cuisine).await);
}
