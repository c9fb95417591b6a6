// ABOUTME: Core data models and types for the VitalPath health API
// ABOUTME: Re-exports User, HealthMetrics, FoodEntry, DietPlan and other domain structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! # Data Models
//!
//! This module contains the core data structures used throughout the VitalPath
//! server. The models are storage-agnostic: the database layer maps rows into
//! them by hand, and the HTTP layer serializes them with `serde`.
//!
//! ## Design Principles
//!
//! - **Owned Records**: every user-generated entity carries a `user_id`
//! - **Serializable**: all models support JSON serialization for the API
//! - **Lenient AI Payloads**: plan documents parsed from model output default
//!   missing nested fields instead of failing the whole parse

// Domain modules
mod metrics;
mod nutrition;
mod plans;
mod user;
mod wellness;

// Re-export all public types for convenience
// User domain
pub use user::User;

// Health metrics domain
pub use metrics::{HealthMetrics, HealthMetricsRecord};

// Nutrition domain
pub use nutrition::{FoodEntry, MealSlot, UserFoodHistory};

// Diet plan domain
pub use plans::{
    DayMeals, DayPlan, DietPlan, FoodPortion, MealPlanDocument, MealSlotKind, PlannedMeal,
    WeeklyDietPlan, WeeklyPlanDocument,
};

// Wellness records domain
pub use wellness::{ExerciseLog, ExercisePlan, HealthReport, SleepEntry, Vaccination};
