// ABOUTME: Main library entry point for the VitalPath health platform
// ABOUTME: REST API for nutrition tracking, AI diet planning, and wellness records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

// Crate-level attributes:
// - recursion_limit: raised for complex derive macros (serde, thiserror) on
//   nested response types
// - deny(unsafe_code): zero-tolerance unsafe policy
#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # VitalPath Server
//!
//! A health and nutrition backend: users log food and wellness data, and the
//! server turns a health-metrics profile into AI-generated diet plans with
//! calorie targets, macro estimates, and per-meal imagery.
//!
//! ## Features
//!
//! - **Nutrition tracking**: food entries with per-day rollups and bucketed
//!   summaries (day/ISO-week/month)
//! - **Energy targets**: Mifflin-St Jeor BMR, activity-scaled TDEE, and
//!   goal-adjusted calorie targets
//! - **AI diet plans**: base and weekly meal plans generated via Gemini,
//!   parsed into typed documents, macro-backfilled, and image-enriched
//! - **Wellness records**: exercise plans and logs, sleep, health reports,
//!   and vaccinations
//! - **PDF export**: downloadable rendering of any plan payload
//!
//! ## Quick Start
//!
//! 1. Set `JWT_SECRET`, `DATABASE_URL`, and (for plan generation)
//!    `GEMINI_API_KEY`
//! 2. Start the server with `vitalpath-server`
//! 3. Register and log in via `/api/auth`, then call the `/api` endpoints
//!    with the issued bearer token
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers per domain, sharing [`server::ServerResources`]
//! - **Services**: plan generation, image enrichment, and PDF export
//! - **Intelligence**: pure calculation crates (energy, aggregation, prompts,
//!   parsing, macro backfill) with no I/O
//! - **Database**: sqlx over SQLite, one submodule per table family
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitalpath_server::config::environment::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("VitalPath server configured with port: HTTP={}",
//!              config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Authentication and session management
pub mod auth;

/// Configuration management and persistence
pub mod config;

/// User and health data storage
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// External API clients (image search)
pub mod external;

/// LLM provider abstraction for AI plan generation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// `HTTP` routes for the REST API
pub mod routes;

/// Shared server resources, router assembly, and serve loop
pub mod server;

/// Common data models for health and nutrition data
pub use vitalpath_core::models;

// ── Internal modules ────────────────────────────────────────────────────

/// Domain service layer for plan generation, enrichment, and export
pub(crate) mod services;
