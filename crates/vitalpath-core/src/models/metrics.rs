// ABOUTME: Health metrics models for per-user physiological snapshots
// ABOUTME: Current HealthMetrics upsert plus append-only HealthMetricsRecord history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current physiological snapshot for a user
///
/// One row per user, replaced on every submission. Each submission also
/// appends a [`HealthMetricsRecord`] so trends stay reconstructable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// User this snapshot belongs to
    pub user_id: Uuid,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age: i32,
    /// Self-reported gender, free text ("female" selects the female BMR branch)
    pub gender: String,
    /// Self-reported activity level, free text (sedentary, light, moderate, ...)
    pub activity_level: String,
    /// Chronic conditions, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<String>,
    /// Known allergies, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    /// When this snapshot was last submitted
    pub updated_at: DateTime<Utc>,
}

/// One append-only history row, written on every metrics submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetricsRecord {
    /// Row identifier (insertion order)
    pub id: i64,
    /// User this record belongs to
    pub user_id: Uuid,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age: i32,
    /// Self-reported gender at submission time
    pub gender: String,
    /// Self-reported activity level at submission time
    pub activity_level: String,
    /// When the snapshot was recorded
    pub recorded_at: DateTime<Utc>,
}
