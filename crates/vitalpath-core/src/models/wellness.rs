// ABOUTME: Wellness record models for exercise, sleep, reports, and vaccinations
// ABOUTME: Simple owned records with CRUD semantics and no derived invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planned exercise routine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Plan title
    pub title: String,
    /// Free-text description of the routine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target sessions per week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_per_week: Option<i32>,
    /// Primary focus ("strength", "cardio", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    /// When the plan was created
    pub created_at: DateTime<Utc>,
}

/// A completed exercise session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Unique log identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Activity performed ("running", "yoga", ...)
    pub activity: String,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Estimated calories burned, if tracked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    /// Perceived intensity ("low", "moderate", "high")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    /// When the session happened
    pub logged_at: DateTime<Utc>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// One night of sleep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Night the sleep ended on
    pub date: NaiveDate,
    /// Hours slept
    pub duration_hours: f64,
    /// Subjective quality ("poor", "fair", "good")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// A medical report or lab result reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Unique report identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Report title
    pub title: String,
    /// Report category ("lab", "imaging", "checkup", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    /// Summary or findings, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// External document URL, if stored elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Date the report was issued
    pub reported_on: NaiveDate,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// A received vaccination dose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vaccination {
    /// Unique record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Vaccine name
    pub vaccine_name: String,
    /// Dose label ("1st", "booster")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    /// Date the dose was administered
    pub administered_on: NaiveDate,
    /// Next due date, if a follow-up is scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<NaiveDate>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}
