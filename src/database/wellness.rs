// ABOUTME: Wellness record database operations
// ABOUTME: Exercise plans and logs, sleep entries, health reports, and vaccinations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use super::Database;
use crate::models::{ExerciseLog, ExercisePlan, HealthReport, SleepEntry, Vaccination};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create wellness record tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_wellness(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                sessions_per_week INTEGER,
                focus_area TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                activity TEXT NOT NULL,
                duration_minutes REAL NOT NULL,
                calories_burned REAL,
                intensity TEXT,
                logged_at DATETIME NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS sleep_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                duration_hours REAL NOT NULL,
                quality TEXT,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_reports (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                report_type TEXT,
                summary TEXT,
                file_url TEXT,
                reported_on TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS vaccinations (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                vaccine_name TEXT NOT NULL,
                dose TEXT,
                administered_on TEXT NOT NULL,
                next_due TEXT,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for index in [
            "CREATE INDEX IF NOT EXISTS idx_exercise_plans_user ON exercise_plans(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_exercise_logs_user ON exercise_logs(user_id, logged_at)",
            "CREATE INDEX IF NOT EXISTS idx_sleep_entries_user ON sleep_entries(user_id, date)",
            "CREATE INDEX IF NOT EXISTS idx_health_reports_user ON health_reports(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_vaccinations_user ON vaccinations(user_id)",
        ] {
            sqlx::query(index).execute(&self.pool).await?;
        }

        Ok(())
    }

    /// Create an exercise plan
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_exercise_plan(&self, plan: &ExercisePlan) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO exercise_plans (
                id, user_id, title, description, sessions_per_week, focus_area, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(&plan.title)
        .bind(&plan.description)
        .bind(plan.sessions_per_week)
        .bind(&plan.focus_area)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(plan.id)
    }

    /// Get an exercise plan by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercise_plan(&self, plan_id: Uuid) -> Result<Option<ExercisePlan>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, description, sessions_per_week, focus_area, created_at
            FROM exercise_plans WHERE id = $1
            ",
        )
        .bind(plan_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_exercise_plan).transpose()
    }

    /// Get a user's exercise plans, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercise_plans(&self, user_id: Uuid) -> Result<Vec<ExercisePlan>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, description, sessions_per_week, focus_area, created_at
            FROM exercise_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_exercise_plan).collect()
    }

    /// Delete an exercise plan
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_exercise_plan(&self, plan_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM exercise_plans WHERE id = $1")
            .bind(plan_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Create an exercise log entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_exercise_log(&self, log: &ExerciseLog) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO exercise_logs (
                id, user_id, activity, duration_minutes, calories_burned,
                intensity, logged_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(log.id.to_string())
        .bind(log.user_id.to_string())
        .bind(&log.activity)
        .bind(log.duration_minutes)
        .bind(log.calories_burned)
        .bind(&log.intensity)
        .bind(log.logged_at)
        .bind(log.created_at)
        .execute(&self.pool)
        .await?;

        Ok(log.id)
    }

    /// Get an exercise log entry by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercise_log(&self, log_id: Uuid) -> Result<Option<ExerciseLog>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, activity, duration_minutes, calories_burned,
                   intensity, logged_at, created_at
            FROM exercise_logs WHERE id = $1
            ",
        )
        .bind(log_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_exercise_log).transpose()
    }

    /// Get a user's exercise logs, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_exercise_logs(&self, user_id: Uuid, limit: u32) -> Result<Vec<ExerciseLog>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, activity, duration_minutes, calories_burned,
                   intensity, logged_at, created_at
            FROM exercise_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_exercise_log).collect()
    }

    /// Delete an exercise log entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_exercise_log(&self, log_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM exercise_logs WHERE id = $1")
            .bind(log_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Create a sleep entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_sleep_entry(&self, entry: &SleepEntry) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO sleep_entries (
                id, user_id, date, duration_hours, quality, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.date)
        .bind(entry.duration_hours)
        .bind(&entry.quality)
        .bind(&entry.notes)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(entry.id)
    }

    /// Get a sleep entry by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_sleep_entry(&self, entry_id: Uuid) -> Result<Option<SleepEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, duration_hours, quality, notes, created_at
            FROM sleep_entries WHERE id = $1
            ",
        )
        .bind(entry_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_sleep_entry).transpose()
    }

    /// Get a user's sleep entries, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_sleep_entries(&self, user_id: Uuid, limit: u32) -> Result<Vec<SleepEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, duration_hours, quality, notes, created_at
            FROM sleep_entries
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_sleep_entry).collect()
    }

    /// Delete a sleep entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_sleep_entry(&self, entry_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sleep_entries WHERE id = $1")
            .bind(entry_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Create a health report
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_health_report(&self, report: &HealthReport) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO health_reports (
                id, user_id, title, report_type, summary, file_url, reported_on, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(report.id.to_string())
        .bind(report.user_id.to_string())
        .bind(&report.title)
        .bind(&report.report_type)
        .bind(&report.summary)
        .bind(&report.file_url)
        .bind(report.reported_on)
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(report.id)
    }

    /// Get a health report by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_report(&self, report_id: Uuid) -> Result<Option<HealthReport>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, report_type, summary, file_url, reported_on, created_at
            FROM health_reports WHERE id = $1
            ",
        )
        .bind(report_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_health_report).transpose()
    }

    /// Get a user's health reports, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_reports(&self, user_id: Uuid) -> Result<Vec<HealthReport>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, title, report_type, summary, file_url, reported_on, created_at
            FROM health_reports
            WHERE user_id = $1
            ORDER BY reported_on DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_health_report).collect()
    }

    /// Delete a health report
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_health_report(&self, report_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM health_reports WHERE id = $1")
            .bind(report_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Create a vaccination record
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_vaccination(&self, vaccination: &Vaccination) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO vaccinations (
                id, user_id, vaccine_name, dose, administered_on, next_due, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(vaccination.id.to_string())
        .bind(vaccination.user_id.to_string())
        .bind(&vaccination.vaccine_name)
        .bind(&vaccination.dose)
        .bind(vaccination.administered_on)
        .bind(vaccination.next_due)
        .bind(&vaccination.notes)
        .bind(vaccination.created_at)
        .execute(&self.pool)
        .await?;

        Ok(vaccination.id)
    }

    /// Get a vaccination record by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_vaccination(&self, vaccination_id: Uuid) -> Result<Option<Vaccination>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, vaccine_name, dose, administered_on, next_due, notes, created_at
            FROM vaccinations WHERE id = $1
            ",
        )
        .bind(vaccination_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_vaccination).transpose()
    }

    /// Get a user's vaccination records, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_vaccinations(&self, user_id: Uuid) -> Result<Vec<Vaccination>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, vaccine_name, dose, administered_on, next_due, notes, created_at
            FROM vaccinations
            WHERE user_id = $1
            ORDER BY administered_on DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_vaccination).collect()
    }

    /// Delete a vaccination record
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_vaccination(&self, vaccination_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM vaccinations WHERE id = $1")
            .bind(vaccination_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_exercise_plan(row: &sqlx::sqlite::SqliteRow) -> Result<ExercisePlan> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");

        Ok(ExercisePlan {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            title: row.get("title"),
            description: row.get("description"),
            sessions_per_week: row.get("sessions_per_week"),
            focus_area: row.get("focus_area"),
            created_at: row.get("created_at"),
        })
    }

    fn row_to_exercise_log(row: &sqlx::sqlite::SqliteRow) -> Result<ExerciseLog> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");

        Ok(ExerciseLog {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            activity: row.get("activity"),
            duration_minutes: row.get("duration_minutes"),
            calories_burned: row.get("calories_burned"),
            intensity: row.get("intensity"),
            logged_at: row.get("logged_at"),
            created_at: row.get("created_at"),
        })
    }

    fn row_to_sleep_entry(row: &sqlx::sqlite::SqliteRow) -> Result<SleepEntry> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");

        Ok(SleepEntry {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            date: row.get("date"),
            duration_hours: row.get("duration_hours"),
            quality: row.get("quality"),
            notes: row.get("notes"),
            created_at: row.get("created_at"),
        })
    }

    fn row_to_health_report(row: &sqlx::sqlite::SqliteRow) -> Result<HealthReport> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");

        Ok(HealthReport {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            title: row.get("title"),
            report_type: row.get("report_type"),
            summary: row.get("summary"),
            file_url: row.get("file_url"),
            reported_on: row.get("reported_on"),
            created_at: row.get("created_at"),
        })
    }

    fn row_to_vaccination(row: &sqlx::sqlite::SqliteRow) -> Result<Vaccination> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");

        Ok(Vaccination {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            vaccine_name: row.get("vaccine_name"),
            dose: row.get("dose"),
            administered_on: row.get("administered_on"),
            next_due: row.get("next_due"),
            notes: row.get("notes"),
            created_at: row.get("created_at"),
        })
    }
}
