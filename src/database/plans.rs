// ABOUTME: Diet plan database operations for base and weekly plans
// ABOUTME: Insert-only storage; latest plan resolved by creation timestamp at query time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use super::Database;
use crate::models::{DietPlan, WeeklyDietPlan};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create diet plan tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_plans(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS diet_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                target_calories REAL NOT NULL,
                diet_type TEXT NOT NULL,
                goal_weight_kg REAL,
                timeframe_weeks INTEGER,
                meals TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_diet_plans_user_created
            ON diet_plans(user_id, created_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        // Weekly plans reference a base plan; no uniqueness constraint, so
        // concurrent generation may insert duplicates that remain as history
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weekly_diet_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                base_plan_id TEXT NOT NULL REFERENCES diet_plans(id) ON DELETE CASCADE,
                cuisine_type TEXT,
                days TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_weekly_diet_plans_base_created
            ON weekly_diet_plans(base_plan_id, created_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new base diet plan
    ///
    /// Plans are never updated in place; older plans remain as history.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails
    pub async fn create_diet_plan(&self, plan: &DietPlan) -> Result<Uuid> {
        let meals = serde_json::to_string(&plan.meals)?;

        sqlx::query(
            r"
            INSERT INTO diet_plans (
                id, user_id, target_calories, diet_type, goal_weight_kg,
                timeframe_weeks, meals, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.target_calories)
        .bind(&plan.diet_type)
        .bind(plan.goal_weight_kg)
        .bind(plan.timeframe_weeks.map(i64::from))
        .bind(meals)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(plan.id)
    }

    /// Get a base diet plan by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_diet_plan(&self, plan_id: Uuid) -> Result<Option<DietPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, target_calories, diet_type, goal_weight_kg,
                   timeframe_weeks, meals, created_at
            FROM diet_plans WHERE id = $1
            ",
        )
        .bind(plan_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let plan = Self::row_to_diet_plan(&row)?;
            Ok(Some(plan))
        } else {
            Ok(None)
        }
    }

    /// Get a user's most recently created base plan
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn latest_diet_plan(&self, user_id: Uuid) -> Result<Option<DietPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, target_calories, diet_type, goal_weight_kg,
                   timeframe_weeks, meals, created_at
            FROM diet_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let plan = Self::row_to_diet_plan(&row)?;
            Ok(Some(plan))
        } else {
            Ok(None)
        }
    }

    /// Insert a new weekly plan derived from a base plan
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails
    pub async fn create_weekly_plan(&self, plan: &WeeklyDietPlan) -> Result<Uuid> {
        let days = serde_json::to_string(&plan.days)?;

        sqlx::query(
            r"
            INSERT INTO weekly_diet_plans (
                id, user_id, base_plan_id, cuisine_type, days, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.base_plan_id.to_string())
        .bind(&plan.cuisine_type)
        .bind(days)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(plan.id)
    }

    /// Get the most recent weekly plan for a base plan
    ///
    /// With a cuisine filter only plans carrying that exact tag match;
    /// without one any weekly plan for the base qualifies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn latest_weekly_plan(
        &self,
        base_plan_id: Uuid,
        cuisine: Option<&str>,
    ) -> Result<Option<WeeklyDietPlan>> {
        let row = if let Some(cuisine) = cuisine {
            sqlx::query(
                r"
                SELECT id, user_id, base_plan_id, cuisine_type, days, created_at
                FROM weekly_diet_plans
                WHERE base_plan_id = $1 AND cuisine_type = $2
                ORDER BY created_at DESC
                LIMIT 1
                ",
            )
            .bind(base_plan_id.to_string())
            .bind(cuisine)
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query(
                r"
                SELECT id, user_id, base_plan_id, cuisine_type, days, created_at
                FROM weekly_diet_plans
                WHERE base_plan_id = $1
                ORDER BY created_at DESC
                LIMIT 1
                ",
            )
            .bind(base_plan_id.to_string())
            .fetch_optional(&self.pool)
            .await?
        };

        if let Some(row) = row {
            let plan = Self::row_to_weekly_plan(&row)?;
            Ok(Some(plan))
        } else {
            Ok(None)
        }
    }

    /// Convert a database row to a DietPlan struct
    fn row_to_diet_plan(row: &sqlx::sqlite::SqliteRow) -> Result<DietPlan> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let meals: String = row.get("meals");
        let timeframe_weeks: Option<i64> = row.get("timeframe_weeks");

        Ok(DietPlan {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            target_calories: row.get("target_calories"),
            diet_type: row.get("diet_type"),
            goal_weight_kg: row.get("goal_weight_kg"),
            timeframe_weeks: timeframe_weeks.and_then(|w| u32::try_from(w).ok()),
            meals: serde_json::from_str(&meals)?,
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a WeeklyDietPlan struct
    fn row_to_weekly_plan(row: &sqlx::sqlite::SqliteRow) -> Result<WeeklyDietPlan> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let base_plan_id: String = row.get("base_plan_id");
        let days: String = row.get("days");

        Ok(WeeklyDietPlan {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            base_plan_id: Uuid::parse_str(&base_plan_id)?,
            cuisine_type: row.get("cuisine_type"),
            days: serde_json::from_str(&days)?,
            created_at: row.get("created_at"),
        })
    }
}
