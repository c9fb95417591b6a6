// ABOUTME: User account model for authentication and record ownership
// ABOUTME: Local accounts with bcrypt password hashes and JWT sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account with authentication credentials
///
/// Every other entity in the system is owned by a `User` through its
/// `user_id` field; route handlers enforce owner == caller on each access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for login, unique)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user account is active
    pub is_active: bool,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}
