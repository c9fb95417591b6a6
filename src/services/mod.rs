// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Plan generation, image enrichment, and PDF export pipelines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Domain service layer
//!
//! This module contains business logic extracted from route handlers, so the
//! HTTP layer stays thin and the pipelines are testable against an in-memory
//! database and stubbed providers.

/// Image resolution pipeline for planned meals
pub mod enrichment;

/// PDF rendering of plan documents for download
pub mod export;

/// Base and weekly diet-plan generation pipelines
pub mod plan_generation;
