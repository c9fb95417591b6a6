// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and server resource creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::wildcard_in_or_patterns
)]
//! Shared test utilities for `vitalpath_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use std::sync::{Arc, Once};
use uuid::Uuid;
use vitalpath_server::{
    auth::{hash_password, AuthManager},
    config::environment::{
        AuthConfig, DatabaseConfig, ExternalServicesConfig, GeminiConfig, ImageSearchConfig,
        ServerConfig,
    },
    database::Database,
    models::User,
    server::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(b"test_jwt_secret_for_integration", 24)
}

/// Build a test server configuration with no external services enabled
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
        },
        auth: AuthConfig {
            jwt_secret: "test_jwt_secret_for_integration".to_owned(),
            jwt_expiry_hours: 24,
        },
        external_services: ExternalServicesConfig {
            gemini: GeminiConfig {
                api_key: None,
                api_base: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
                model: "gemini-2.0-flash".to_owned(),
            },
            image_search: ImageSearchConfig {
                api_key: None,
                engine_id: None,
                endpoint: "https://www.googleapis.com/customsearch/v1".to_owned(),
            },
        },
    }
}

/// Standard server resources backed by an in-memory database
///
/// No generative provider is configured; plan-generation tests inject a
/// stub through the public `llm` field before wrapping in `Arc`.
pub async fn create_test_resources() -> Result<ServerResources> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    Ok(ServerResources::new(
        database,
        auth_manager,
        Arc::new(test_server_config()),
    ))
}

/// Create a user directly in the database and mint a JWT for them
///
/// Returns the user id and a token suitable for `Authorization: Bearer`.
pub async fn register_and_login(
    resources: &ServerResources,
    email: &str,
    password: &str,
) -> Result<(Uuid, String)> {
    let password_hash = hash_password(password.to_owned()).await?;
    let user = User::new(email.to_owned(), password_hash, Some("Test User".to_owned()));
    let user_id = resources.database.create_user(&user).await?;
    let token = resources.auth_manager.generate_token(user_id, email)?;
    Ok((user_id, token))
}
