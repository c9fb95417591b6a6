// ABOUTME: Main server binary that boots the VitalPath health backend
// ABOUTME: Loads environment configuration, opens the database, and serves the HTTP API
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![recursion_limit = "256"]

//! # VitalPath Server Binary
//!
//! Starts the VitalPath health and nutrition API with user authentication,
//! health tracking endpoints, and AI-assisted diet plan generation.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use vitalpath_server::{
    auth::AuthManager, config::environment::ServerConfig, database::Database, logging,
    server::ServerResources,
};

#[derive(Parser)]
#[command(name = "vitalpath-server")]
#[command(about = "VitalPath - Health tracking and AI diet planning API")]
#[command(version)]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting VitalPath server");

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized and migrations applied");

    // Safe: JWT expiry hours are small positive configuration values
    #[allow(clippy::cast_possible_wrap)]
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours as i64,
    );
    info!("Authentication manager initialized");

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));

    if let Err(e) = vitalpath_server::server::serve(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
