// ABOUTME: Nutrition history aggregation: bucketed sums, top foods, streaks, extremes
// ABOUTME: Pure functions over FoodEntry and UserFoodHistory slices fetched by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Bucketed nutrition summaries over a user's food history.
//!
//! The database layer fetches the rows for a closed date range; everything
//! here is a deterministic transform over those slices. Absence of data is
//! never an error: empty inputs produce zeroed aggregates.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use vitalpath_core::models::{FoodEntry, UserFoodHistory};

// === Constants ===

/// How many most-frequent food names a summary reports.
pub const TOP_FOOD_LIMIT: usize = 5;

// === Granularity ===

/// Bucketing granularity for history summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One bucket per calendar day (`2025-03-14`).
    Day,
    /// One bucket per ISO week (`2025-W11`).
    Week,
    /// One bucket per calendar month (`2025-03`).
    Month,
}

/// Error for a granularity string that is not day, week, or month.
#[derive(Debug, Error)]
#[error("unknown granularity '{0}', expected day, week, or month")]
pub struct UnknownGranularity(pub String);

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(UnknownGranularity(other.to_string())),
        }
    }
}

impl Granularity {
    /// Bucket key for a date at this granularity.
    ///
    /// Keys are zero-padded so lexicographic order equals chronological
    /// order, which keeps bucket output sorted for free.
    #[must_use]
    pub fn bucket_key(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => date.format("%G-W%V").to_string(),
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }
}

// === Results ===

/// Summed nutrition for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    /// Bucket key (day, ISO week, or month)
    pub bucket: String,
    /// Total calories
    pub calories: f64,
    /// Total protein in grams
    pub protein_g: f64,
    /// Total carbohydrates in grams
    pub carbs_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Number of entries in the bucket
    pub entry_count: u32,
}

/// One frequently-logged food name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopFood {
    /// Food name as logged
    pub name: String,
    /// How many entries used this name
    pub count: u32,
}

/// Longest and current consecutive-day logging streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Longest run of consecutive non-empty days in the range
    pub longest_days: u32,
    /// Run of consecutive non-empty days ending at the range end
    pub current_days: u32,
}

/// A single day singled out for its calorie total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayExtreme {
    /// The day
    pub day: NaiveDate,
    /// Its calorie total
    pub calories: f64,
}

/// Full nutrition summary for a date range.
#[derive(Debug, Clone, Serialize)]
pub struct NutritionSummary {
    /// Granularity the buckets were computed at
    pub granularity: Granularity,
    /// Bucketed sums in chronological order
    pub buckets: Vec<BucketSummary>,
    /// Most frequent food names, ties broken by first appearance
    pub top_foods: Vec<TopFood>,
    /// Consecutive-day logging streaks
    pub streaks: StreakSummary,
    /// Highest-calorie day, if any day was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_day: Option<DayExtreme>,
    /// Lowest-calorie day among days with at least one entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_day: Option<DayExtreme>,
}

// === Aggregation ===

/// Group entries into buckets and sum calories and macros per bucket.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn bucket_entries(entries: &[FoodEntry], granularity: Granularity) -> Vec<BucketSummary> {
    let mut buckets: BTreeMap<String, (f64, f64, f64, f64, u32)> = BTreeMap::new();
    for entry in entries {
        let key = granularity.bucket_key(entry.day());
        let slot = buckets.entry(key).or_insert((0.0, 0.0, 0.0, 0.0, 0));
        slot.0 += entry.calories;
        slot.1 += entry.protein_g;
        slot.2 += entry.carbs_g;
        slot.3 += entry.fat_g;
        slot.4 += 1;
    }

    buckets
        .into_iter()
        .map(
            |(bucket, (calories, protein_g, carbs_g, fat_g, entry_count))| BucketSummary {
                bucket,
                calories,
                protein_g,
                carbs_g,
                fat_g,
                entry_count,
            },
        )
        .collect()
}

/// Most frequent food names, ties broken by first-seen order.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn top_foods(entries: &[FoodEntry], limit: usize) -> Vec<TopFood> {
    // name -> (count, index of first appearance)
    let mut counts: HashMap<&str, (u32, usize)> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        counts
            .entry(entry.name.as_str())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }

    let mut ranked: Vec<(&str, u32, usize)> = counts
        .into_iter()
        .map(|(name, (count, first_seen))| (name, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(name, count, _)| TopFood {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Longest and current consecutive-day streaks of non-empty days.
///
/// A day counts toward a streak when its [`UserFoodHistory`] row has
/// `entry_count > 0`. The current streak is anchored at `through` (the end
/// of the requested range) and is zero when that day itself is empty.
#[must_use]
pub fn streaks(history: &[UserFoodHistory], through: NaiveDate) -> StreakSummary {
    let days: BTreeSet<NaiveDate> = history
        .iter()
        .filter(|row| row.entry_count > 0)
        .map(|row| row.day)
        .collect();

    let mut longest = 0_u32;
    let mut run = 0_u32;
    let mut previous: Option<NaiveDate> = None;
    for day in &days {
        run = match previous.and_then(|p| p.checked_add_days(Days::new(1))) {
            Some(next) if next == *day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }

    let mut current = 0_u32;
    let mut cursor = through;
    while days.contains(&cursor) {
        current += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prior) => cursor = prior,
            None => break,
        }
    }

    StreakSummary {
        longest_days: longest,
        current_days: current,
    }
}

/// Highest-calorie day and lowest-calorie non-empty day.
///
/// The minimum skips zero-entry days so an untouched tracker day never
/// registers as a "lowest intake" day. Ties keep the earliest day scanned.
#[must_use]
pub fn extremes(history: &[UserFoodHistory]) -> (Option<DayExtreme>, Option<DayExtreme>) {
    let mut highest: Option<DayExtreme> = None;
    let mut lowest: Option<DayExtreme> = None;

    for row in history {
        let candidate = DayExtreme {
            day: row.day,
            calories: row.total_calories,
        };
        match &highest {
            Some(best) if candidate.calories.total_cmp(&best.calories) != Ordering::Greater => {}
            _ => highest = Some(candidate.clone()),
        }
        if row.entry_count > 0 {
            match &lowest {
                Some(best) if candidate.calories.total_cmp(&best.calories) != Ordering::Less => {}
                _ => lowest = Some(candidate),
            }
        }
    }

    (highest, lowest)
}

/// Compose the full summary for a range.
///
/// `entries` and `history` are the rows for the closed range; `through` is
/// the range end used to anchor the current streak. Running this twice over
/// the same rows yields identical output.
#[must_use]
pub fn summarize(
    entries: &[FoodEntry],
    history: &[UserFoodHistory],
    through: NaiveDate,
    granularity: Granularity,
) -> NutritionSummary {
    let (highest_day, lowest_day) = extremes(history);
    NutritionSummary {
        granularity,
        buckets: bucket_entries(entries, granularity),
        top_foods: top_foods(entries, TOP_FOOD_LIMIT),
        streaks: streaks(history, through),
        highest_day,
        lowest_day,
    }
}

/// Recompute one day's [`UserFoodHistory`] rollup from that day's entries.
///
/// This is the only way rollup rows are produced: every food-entry mutation
/// rebuilds the whole day, so repeated recomputation over the same entry set
/// is idempotent (up to `updated_at`).
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn day_rollup(user_id: Uuid, day: NaiveDate, entries: &[FoodEntry]) -> UserFoodHistory {
    let mut rollup = UserFoodHistory::empty(user_id, day);
    for entry in entries {
        rollup.total_calories += entry.calories;
        rollup.total_protein_g += entry.protein_g;
        rollup.total_carbs_g += entry.carbs_g;
        rollup.total_fat_g += entry.fat_g;
        rollup.entry_ids.push(entry.id);
    }
    rollup.entry_count = entries.len() as u32;
    rollup.updated_at = Utc::now();
    rollup
}
