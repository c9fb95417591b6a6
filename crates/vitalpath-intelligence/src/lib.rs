// ABOUTME: Nutrition intelligence engine for the VitalPath health platform
// ABOUTME: Pure algorithms for energy targets, aggregation, prompts, parsing, and backfill
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

#![deny(unsafe_code)]

//! # VitalPath Intelligence
//!
//! Pure computation over the core domain types. Everything in this crate is
//! deterministic and network-free; the server crate wires these functions to
//! storage and to the generative-AI provider.
//!
//! ## Modules
//!
//! - **energy**: BMR (Mifflin-St Jeor), TDEE, and daily calorie targets
//! - **aggregation**: bucketed nutrition summaries, top foods, streaks, extremes
//! - **prompts**: deterministic prompt templates for plan generation
//! - **parser**: recovery of typed plan documents from model output
//! - **macros**: per-slot macro backfill for weekly plans

/// Basal metabolic rate, TDEE, and calorie-target calculations
pub mod energy;

/// Bucketed nutrition history aggregation
pub mod aggregation;

/// Prompt templates for diet-plan generation
pub mod prompts;

/// Parsing of generative-model responses into typed plan documents
pub mod parser;

/// Macro backfill estimation for weekly plans
pub mod macros;
