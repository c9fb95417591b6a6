// ABOUTME: External API client modules (Google Custom Search image lookup)
// ABOUTME: Provides meal image resolution for plan enrichment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! External API Clients
//!
//! This module contains clients for external APIs used by the VitalPath server.

pub mod image_search;

// Re-export commonly used types
pub use image_search::ImageSearchClient;
