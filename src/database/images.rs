// ABOUTME: Food image database operations keyed by normalized dish name
// ABOUTME: Stores resolved image URLs so repeat lookups skip the search API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use super::Database;
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create food image table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_images(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_images (
                normalized_name TEXT PRIMARY KEY,
                image_url TEXT NOT NULL,
                source TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a stored image URL by normalized dish name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_food_image(&self, normalized_name: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT image_url FROM food_images WHERE normalized_name = $1")
            .bind(normalized_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("image_url")))
    }

    /// Store an image URL keyed by normalized dish name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn store_food_image(
        &self,
        normalized_name: &str,
        image_url: &str,
        source: &str,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO food_images (normalized_name, image_url, source)
            VALUES ($1, $2, $3)
            ON CONFLICT(normalized_name) DO UPDATE SET
                image_url = $2,
                source = $3
            ",
        )
        .bind(normalized_name)
        .bind(image_url)
        .bind(source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
