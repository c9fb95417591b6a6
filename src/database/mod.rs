// ABOUTME: Database management for user accounts and health data
// ABOUTME: Connection pooling, schema migration, and table-per-module operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! # Database Management
//!
//! SQLite-backed storage for the VitalPath server. Each submodule owns the
//! schema and queries for one group of tables; all operations hang off the
//! shared [`Database`] handle.

mod food;
mod health_metrics;
mod images;
mod plans;
mod users;
mod wellness;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user and health data storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_health_metrics().await?;
        self.migrate_food().await?;
        self.migrate_plans().await?;
        self.migrate_wellness().await?;
        self.migrate_images().await?;

        Ok(())
    }

    /// Verify database connectivity for readiness probes
    ///
    /// # Errors
    ///
    /// Returns an error if the connection check query fails
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
