// ABOUTME: Google Custom Search client used to find representative food images
// ABOUTME: Returns the top image hit for a dish name; callers treat failures as soft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Food Image Search Client
//!
//! This module provides a client for the Google Programmable Search JSON API,
//! scoped to image results. The enrichment pipeline asks it for one
//! representative photo per dish and persists the answer, so each distinct
//! dish name costs at most one API call over the lifetime of the database.
//!
//! # API Reference
//! Custom Search JSON API: <https://developers.google.com/custom-search/v1/overview>
//!
//! # Example
//! ```rust,no_run
//! use vitalpath_server::config::environment::ImageSearchConfig;
//! use vitalpath_server::external::ImageSearchClient;
//!
//! # async fn example(config: &ImageSearchConfig) -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(client) = ImageSearchClient::from_config(config) {
//!     let url = client.top_image_url("paneer tikka").await?;
//!     println!("{url:?}");
//! }
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::environment::ImageSearchConfig;
use crate::errors::AppError;

/// Custom Search API response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent entirely when the query has no hits
    items: Option<Vec<SearchItem>>,
}

/// One search hit; only the direct link is used
#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

/// Google Programmable Search client scoped to image results
pub struct ImageSearchClient {
    api_key: String,
    engine_id: String,
    endpoint: String,
    http_client: reqwest::Client,
}

impl ImageSearchClient {
    /// Create a client from resolved configuration
    ///
    /// Returns `None` unless both the API key and the engine id are
    /// present, so the enrichment pipeline can fall back to placeholders
    /// instead of failing at startup.
    #[must_use]
    pub fn from_config(config: &ImageSearchConfig) -> Option<Self> {
        match (&config.api_key, &config.engine_id) {
            (Some(api_key), Some(engine_id)) => Some(Self {
                api_key: api_key.clone(),
                engine_id: engine_id.clone(),
                endpoint: config.endpoint.clone(),
                http_client: reqwest::Client::new(),
            }),
            _ => None,
        }
    }

    /// Search for a representative image and return its direct URL
    ///
    /// # Errors
    /// Returns error if the API request fails or the response cannot be
    /// parsed. A successful search with no hits is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn top_image_url(&self, query: &str) -> Result<Option<String>, AppError> {
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("num", "1"),
                ("safe", "active"),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service("image search", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "image search",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service("image search", format!("JSON parse error: {e}"))
        })?;

        let link = search_response
            .items
            .and_then(|items| items.into_iter().next())
            .map(|item| item.link);

        debug!(found = link.is_some(), "image search completed");

        Ok(link)
    }
}
