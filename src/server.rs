// ABOUTME: Shared server resources and HTTP server assembly
// ABOUTME: Dependency-injected resource container, router construction, and serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! # Server Assembly
//!
//! [`ServerResources`] is the dependency-injection container holding
//! everything route handlers share: the database pool, auth machinery, and
//! the optional external clients. It is constructed once at bootstrap and
//! handed to every router as `Arc<ServerResources>`; nothing in the crate
//! reaches for globals.

use anyhow::Result;
use axum::http::{header::HeaderName, Method};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{AuthManager, AuthMiddleware};
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::external::ImageSearchClient;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::routes::{
    AuthRoutes, FoodRoutes, HealthRoutes, MetricsRoutes, PlanRoutes, WellnessRoutes,
};

/// Centralized resource container for dependency injection
///
/// Holds all shared server state. The external clients are optional:
/// without a Gemini key plan generation returns 502, and without image
/// search credentials enrichment falls back to placeholders.
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub auth_middleware: AuthMiddleware,
    pub llm: Option<Arc<dyn LlmProvider>>,
    pub image_search: Option<Arc<ImageSearchClient>>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    ///
    /// External clients are built from the configuration; absent
    /// credentials leave them as `None`.
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());

        let llm = GeminiProvider::from_config(&config.external_services.gemini)
            .map(|provider| Arc::new(provider) as Arc<dyn LlmProvider>);
        if llm.is_none() {
            tracing::warn!("No Gemini API key configured; plan generation disabled");
        }
        let image_search = ImageSearchClient::from_config(&config.external_services.image_search)
            .map(Arc::new);

        Self {
            database,
            auth_manager,
            auth_middleware,
            llm,
            image_search,
            config,
        }
    }
}

/// Assemble the complete HTTP router over shared resources
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(MetricsRoutes::routes(resources.clone()))
        .merge(FoodRoutes::routes(resources.clone()))
        .merge(PlanRoutes::routes(resources.clone()))
        .merge(WellnessRoutes::routes(resources.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors())
}

/// Permissive CORS for browser clients
fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Bind the configured port and serve the HTTP API until shutdown
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server loop fails
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let router = build_router(&resources);
    let addr = format!("0.0.0.0:{}", resources.config.http_port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("VitalPath server listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
