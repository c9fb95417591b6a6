// ABOUTME: Food entry database operations and per-day nutrition rollups
// ABOUTME: Entry CRUD keeps the user_food_history table in sync on every write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use super::Database;
use crate::models::{FoodEntry, MealSlot, UserFoodHistory};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;
use vitalpath_intelligence::aggregation::day_rollup;

impl Database {
    /// Create food entry and rollup tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_food(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                calories REAL NOT NULL,
                protein_g REAL NOT NULL,
                carbs_g REAL NOT NULL,
                fat_g REAL NOT NULL,
                protein_pct REAL,
                carbs_pct REAL,
                fat_pct REAL,
                meal_slot TEXT NOT NULL,
                image_url TEXT,
                recorded_at DATETIME NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_food_entries_user_recorded
            ON food_entries(user_id, recorded_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        // Per-day rollup, recomputed after every entry write
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_food_history (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                day TEXT NOT NULL,
                total_calories REAL NOT NULL DEFAULT 0,
                total_protein_g REAL NOT NULL DEFAULT 0,
                total_carbs_g REAL NOT NULL DEFAULT 0,
                total_fat_g REAL NOT NULL DEFAULT 0,
                entry_count INTEGER NOT NULL DEFAULT 0,
                entry_ids TEXT NOT NULL DEFAULT '[]',
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, day)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a food entry and refresh that day's rollup
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_food_entry(&self, entry: &FoodEntry) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO food_entries (
                id, user_id, name, calories, protein_g, carbs_g, fat_g,
                protein_pct, carbs_pct, fat_pct, meal_slot, image_url,
                recorded_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .bind(entry.protein_pct)
        .bind(entry.carbs_pct)
        .bind(entry.fat_pct)
        .bind(entry.meal_slot.as_str())
        .bind(&entry.image_url)
        .bind(entry.recorded_at)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        self.recompute_food_history(entry.user_id, entry.day())
            .await?;

        Ok(entry.id)
    }

    /// Get a food entry by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_food_entry(&self, entry_id: Uuid) -> Result<Option<FoodEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g,
                   protein_pct, carbs_pct, fat_pct, meal_slot, image_url,
                   recorded_at, created_at
            FROM food_entries WHERE id = $1
            ",
        )
        .bind(entry_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let entry = Self::row_to_food_entry(&row)?;
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    /// Get a user's most recent food entries
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recent_food_entries(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g,
                   protein_pct, carbs_pct, fat_pct, meal_slot, image_url,
                   recorded_at, created_at
            FROM food_entries
            WHERE user_id = $1
            ORDER BY recorded_at DESC, created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_food_entry).collect()
    }

    /// Get a user's food entries in `[start, end)`, oldest first
    ///
    /// Ascending order preserves first-seen ranking for top-food ties.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_food_entries_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, calories, protein_g, carbs_g, fat_g,
                   protein_pct, carbs_pct, fat_pct, meal_slot, image_url,
                   recorded_at, created_at
            FROM food_entries
            WHERE user_id = $1 AND recorded_at >= $2 AND recorded_at < $3
            ORDER BY recorded_at ASC, created_at ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_food_entry).collect()
    }

    /// Update a food entry and refresh its day's rollup
    ///
    /// Callers moving an entry to a different day must also recompute the
    /// previous day via [`Database::recompute_food_history`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_food_entry(&self, entry: &FoodEntry) -> Result<()> {
        sqlx::query(
            r"
            UPDATE food_entries SET
                name = $2,
                calories = $3,
                protein_g = $4,
                carbs_g = $5,
                fat_g = $6,
                protein_pct = $7,
                carbs_pct = $8,
                fat_pct = $9,
                meal_slot = $10,
                image_url = $11,
                recorded_at = $12
            WHERE id = $1
            ",
        )
        .bind(entry.id.to_string())
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .bind(entry.protein_pct)
        .bind(entry.carbs_pct)
        .bind(entry.fat_pct)
        .bind(entry.meal_slot.as_str())
        .bind(&entry.image_url)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await?;

        self.recompute_food_history(entry.user_id, entry.day())
            .await?;

        Ok(())
    }

    /// Delete a food entry and refresh its day's rollup
    ///
    /// Returns the deleted entry, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_food_entry(&self, entry_id: Uuid) -> Result<Option<FoodEntry>> {
        let Some(entry) = self.get_food_entry(entry_id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM food_entries WHERE id = $1")
            .bind(entry_id.to_string())
            .execute(&self.pool)
            .await?;

        self.recompute_food_history(entry.user_id, entry.day())
            .await?;

        Ok(Some(entry))
    }

    /// Recompute one day's rollup from its entries and store it
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn recompute_food_history(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<UserFoodHistory> {
        let start = day_start_utc(day);
        let end = day_start_utc(day + chrono::Days::new(1));
        let entries = self.get_food_entries_in_range(user_id, start, end).await?;

        let rollup = day_rollup(user_id, day, &entries);
        let entry_ids = serde_json::to_string(&rollup.entry_ids)?;

        sqlx::query(
            r"
            INSERT INTO user_food_history (
                user_id, day, total_calories, total_protein_g, total_carbs_g,
                total_fat_g, entry_count, entry_ids, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(user_id, day) DO UPDATE SET
                total_calories = $3,
                total_protein_g = $4,
                total_carbs_g = $5,
                total_fat_g = $6,
                entry_count = $7,
                entry_ids = $8,
                updated_at = $9
            ",
        )
        .bind(user_id.to_string())
        .bind(day)
        .bind(rollup.total_calories)
        .bind(rollup.total_protein_g)
        .bind(rollup.total_carbs_g)
        .bind(rollup.total_fat_g)
        .bind(i64::from(rollup.entry_count))
        .bind(entry_ids)
        .bind(rollup.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(rollup)
    }

    /// Get one day's rollup for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_food_history_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<UserFoodHistory>> {
        let row = sqlx::query(
            r"
            SELECT user_id, day, total_calories, total_protein_g, total_carbs_g,
                   total_fat_g, entry_count, entry_ids, updated_at
            FROM user_food_history
            WHERE user_id = $1 AND day = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let history = Self::row_to_food_history(&row)?;
            Ok(Some(history))
        } else {
            Ok(None)
        }
    }

    /// Get rollups for a closed day range, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_food_history_range(
        &self,
        user_id: Uuid,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> Result<Vec<UserFoodHistory>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, day, total_calories, total_protein_g, total_carbs_g,
                   total_fat_g, entry_count, entry_ids, updated_at
            FROM user_food_history
            WHERE user_id = $1 AND day >= $2 AND day <= $3
            ORDER BY day ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(start_day)
        .bind(end_day)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_food_history).collect()
    }

    /// Convert a database row to a FoodEntry struct
    fn row_to_food_entry(row: &sqlx::sqlite::SqliteRow) -> Result<FoodEntry> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let meal_slot: String = row.get("meal_slot");

        Ok(FoodEntry {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            name: row.get("name"),
            calories: row.get("calories"),
            protein_g: row.get("protein_g"),
            carbs_g: row.get("carbs_g"),
            fat_g: row.get("fat_g"),
            protein_pct: row.get("protein_pct"),
            carbs_pct: row.get("carbs_pct"),
            fat_pct: row.get("fat_pct"),
            meal_slot: MealSlot::from_str_lossy(&meal_slot),
            image_url: row.get("image_url"),
            recorded_at: row.get("recorded_at"),
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a UserFoodHistory struct
    fn row_to_food_history(row: &sqlx::sqlite::SqliteRow) -> Result<UserFoodHistory> {
        let user_id: String = row.get("user_id");
        let entry_ids: String = row.get("entry_ids");
        let entry_count: i64 = row.get("entry_count");

        Ok(UserFoodHistory {
            user_id: Uuid::parse_str(&user_id)?,
            day: row.get("day"),
            total_calories: row.get("total_calories"),
            total_protein_g: row.get("total_protein_g"),
            total_carbs_g: row.get("total_carbs_g"),
            total_fat_g: row.get("total_fat_g"),
            entry_count: u32::try_from(entry_count).unwrap_or(0),
            entry_ids: serde_json::from_str(&entry_ids)?,
            updated_at: row.get("updated_at"),
        })
    }
}

/// Midnight UTC at the start of a calendar day
fn day_start_utc(day: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(day.and_hms_opt(0, 0, 0).unwrap_or_default(), Utc)
}
