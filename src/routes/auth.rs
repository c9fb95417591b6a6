// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: REST endpoints issuing HS256 JWT session tokens over bcrypt credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Registration and login routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;
use crate::server::ServerResources;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Router for registration and login endpoints
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(handle_register))
            .route("/api/auth/login", post(handle_login))
            .with_state(resources)
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    let domain_part = &email[at_pos + 1..];
    domain_part.contains('.')
}

const fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
}

async fn handle_register(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    tracing::info!("User registration attempt for email: {}", request.email);

    if !is_valid_email(&request.email) {
        return Err(AppError::invalid_input("Invalid email format"));
    }
    if !is_valid_password(&request.password) {
        return Err(AppError::invalid_input(
            "Password must be at least 8 characters",
        ));
    }

    if resources
        .database
        .get_user_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::already_exists("user"));
    }

    let password_hash = hash_password(request.password.clone()).await?;
    let user = User::new(
        request.email.clone(),
        password_hash,
        request.display_name.clone(),
    );
    let user_id = resources.database.create_user(&user).await?;

    tracing::info!(
        "User registered successfully: {} ({})",
        request.email,
        user_id
    );

    let response = RegisterResponse {
        user_id: user_id.to_string(),
        message: "User registered successfully".into(),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

async fn handle_login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    tracing::info!("User login attempt for email: {}", request.email);

    let user = resources
        .database
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

    let is_valid = verify_password(request.password.clone(), user.password_hash.clone()).await;
    if !is_valid {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(AppError::auth_invalid("Invalid email or password"));
    }

    if !user.is_active {
        tracing::warn!("Login blocked for deactivated user: {}", request.email);
        return Err(AppError::auth_invalid("User account is deactivated"));
    }

    resources.database.update_last_active(user.id).await?;

    let jwt_token = resources.auth_manager.generate_token(user.id, &user.email)?;
    let expires_at = resources.auth_manager.token_expiry();

    tracing::info!(
        "User logged in successfully: {} ({})",
        request.email,
        user.id
    );

    let response = LoginResponse {
        jwt_token,
        expires_at: expires_at.to_rfc3339(),
        user: UserInfo {
            user_id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
        },
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn test_password_validation() {
        assert!(is_valid_password("longenough"));
        assert!(!is_valid_password("short"));
    }
}
