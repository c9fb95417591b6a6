// ABOUTME: Route module organization for VitalPath HTTP endpoints
// ABOUTME: Domain modules with thin handlers delegating to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! HTTP routes, organized by domain.
//!
//! Each module owns the routes for one resource family and keeps its
//! handlers thin: decode, authenticate, delegate to a service or the
//! database layer, encode. Errors surface as [`crate::errors::AppError`]
//! and map to JSON error responses through its `IntoResponse` impl.

/// Registration and login routes
pub mod auth;
/// Food-entry CRUD and nutrition summary routes
pub mod food;
/// Health check and readiness routes
pub mod health;
/// Health-metrics profile routes
pub mod metrics;
/// Diet-plan generation, lookup, and export routes
pub mod plans;
/// Exercise, sleep, report, and vaccination routes
pub mod wellness;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Login request payload
pub use auth::LoginRequest;
/// Login response with token
pub use auth::LoginResponse;
/// User registration request
pub use auth::RegisterRequest;
/// Registration response with user details
pub use auth::RegisterResponse;
/// Food-entry route handlers
pub use food::FoodRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Health-metrics route handlers
pub use metrics::MetricsRoutes;
/// Diet-plan route handlers
pub use plans::PlanRoutes;
/// Wellness resource route handlers
pub use wellness::WellnessRoutes;
