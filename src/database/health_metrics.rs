// ABOUTME: Health metrics database operations for user body profiles
// ABOUTME: Current profile upsert plus an append-only history of measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use super::Database;
use crate::models::{HealthMetrics, HealthMetricsRecord};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create health metrics tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_health_metrics(&self) -> Result<()> {
        // Current profile, one row per user
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_metrics (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                activity_level TEXT NOT NULL,
                chronic_conditions TEXT,
                allergies TEXT,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Append-only measurement history
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_metrics_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                activity_level TEXT NOT NULL,
                recorded_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_health_metrics_history_user
            ON health_metrics_history(user_id, recorded_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create or update a user's health metrics profile
    ///
    /// Every write also appends a row to the measurement history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_health_metrics(&self, metrics: &HealthMetrics) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO health_metrics (
                user_id, height_cm, weight_kg, age, gender, activity_level,
                chronic_conditions, allergies, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(user_id) DO UPDATE SET
                height_cm = $2,
                weight_kg = $3,
                age = $4,
                gender = $5,
                activity_level = $6,
                chronic_conditions = $7,
                allergies = $8,
                updated_at = $9
            ",
        )
        .bind(metrics.user_id.to_string())
        .bind(metrics.height_cm)
        .bind(metrics.weight_kg)
        .bind(metrics.age)
        .bind(&metrics.gender)
        .bind(&metrics.activity_level)
        .bind(&metrics.chronic_conditions)
        .bind(&metrics.allergies)
        .bind(metrics.updated_at)
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            INSERT INTO health_metrics_history (
                user_id, height_cm, weight_kg, age, gender, activity_level, recorded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(metrics.user_id.to_string())
        .bind(metrics.height_cm)
        .bind(metrics.weight_kg)
        .bind(metrics.age)
        .bind(&metrics.gender)
        .bind(&metrics.activity_level)
        .bind(metrics.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a user's current health metrics profile
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_metrics(&self, user_id: Uuid) -> Result<Option<HealthMetrics>> {
        let row = sqlx::query(
            r"
            SELECT user_id, height_cm, weight_kg, age, gender, activity_level,
                   chronic_conditions, allergies, updated_at
            FROM health_metrics WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let metrics = Self::row_to_health_metrics(&row)?;
            Ok(Some(metrics))
        } else {
            Ok(None)
        }
    }

    /// Get a user's measurement history, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_metrics_history(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<HealthMetricsRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, height_cm, weight_kg, age, gender, activity_level, recorded_at
            FROM health_metrics_history
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_health_metrics_record).collect()
    }

    /// Convert a database row to a HealthMetrics struct
    fn row_to_health_metrics(row: &sqlx::sqlite::SqliteRow) -> Result<HealthMetrics> {
        let user_id: String = row.get("user_id");

        Ok(HealthMetrics {
            user_id: Uuid::parse_str(&user_id)?,
            height_cm: row.get("height_cm"),
            weight_kg: row.get("weight_kg"),
            age: row.get("age"),
            gender: row.get("gender"),
            activity_level: row.get("activity_level"),
            chronic_conditions: row.get("chronic_conditions"),
            allergies: row.get("allergies"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Convert a database row to a HealthMetricsRecord struct
    fn row_to_health_metrics_record(row: &sqlx::sqlite::SqliteRow) -> Result<HealthMetricsRecord> {
        let user_id: String = row.get("user_id");

        Ok(HealthMetricsRecord {
            id: row.get("id"),
            user_id: Uuid::parse_str(&user_id)?,
            height_cm: row.get("height_cm"),
            weight_kg: row.get("weight_kg"),
            age: row.get("age"),
            gender: row.get("gender"),
            activity_level: row.get("activity_level"),
            recorded_at: row.get("recorded_at"),
        })
    }
}
