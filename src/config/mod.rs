// ABOUTME: Configuration module for the VitalPath server
// ABOUTME: Environment-driven settings for HTTP, database, auth, and external services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Server configuration loaded from environment variables

/// Environment-driven server configuration
pub mod environment;

pub use environment::ServerConfig;
