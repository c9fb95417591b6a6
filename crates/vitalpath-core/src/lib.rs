// ABOUTME: Core domain types for the VitalPath health tracking platform
// ABOUTME: Foundation crate with user, metrics, nutrition, plan, and wellness models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

#![deny(unsafe_code)]

//! # VitalPath Core
//!
//! Foundation crate providing the shared domain types for the VitalPath health
//! tracking platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **models**: Domain data structures (users, health metrics, food entries,
//!   diet plans, wellness records)

/// Core data models (User, HealthMetrics, FoodEntry, DietPlan, etc.)
pub mod models;
