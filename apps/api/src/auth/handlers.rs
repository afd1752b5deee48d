//! Axum route handlers for the Auth API.

use anyhow::anyhow;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::models::user::{User, UserSummary};
use crate::state::AppState;
use crate::store;
use crate::validation::{is_valid_email, FieldErrors};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        if !is_valid_email(&self.email) {
            errors.push("email", "must be a valid email address");
        }
        errors.check_length("password", &self.password, 8, 128);
        if let Some(first) = &self.first_name {
            errors.check_length("firstName", first, 0, 100);
        }
        if let Some(last) = &self.last_name {
            errors.check_length("lastName", last, 0, 100);
        }
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserSummary,
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    state
        .jwt
        .issue(user.id)
        .map_err(|e| AppError::Internal(anyhow!("failed to sign token: {e}")))
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate()?;
    let email = req.email.trim().to_lowercase();

    if store::users::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::BadRequest(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(req.password).await?;
    let user = store::users::insert(
        &state.db,
        store::users::NewUser {
            email: &email,
            password_hash: &password_hash,
            first_name: req.first_name.as_deref(),
            last_name: req.last_name.as_deref(),
        },
    )
    .await
    .map_err(|e| {
        if store::is_unique_violation(&e) {
            AppError::BadRequest("User with this email already exists".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    info!("Registered user {}", user.id);
    let token = issue_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            token,
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let mut errors = FieldErrors::new();
    if req.email.trim().is_empty() {
        errors.push("email", "is required");
    }
    if req.password.is_empty() {
        errors.push("password", "is required");
    }
    errors.into_result()?;

    let user = store::users::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: UserSummary::from(&user),
    }))
}

/// GET /api/auth/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({ "user": UserSummary::from(&user) }))
}

/// GET /api/auth/user
pub async fn handle_current_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn handle_logout() -> Json<Value> {
    Json(json!({ "message": "Logout successful" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation_collects_fields() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            first_name: None,
            last_name: None,
        };
        match req.validate() {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].field, "email");
                assert_eq!(details[1].field, "password");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_register_validation_accepts_good_input() {
        let req = RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "long enough".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let now = chrono::Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["email"], "jane@example.com");
    }
}
