use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::ErrorResponse;
use crate::auth::hash_password;
use crate::error::ApiError;
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Characters allowed in a username besides letters and digits.
const USERNAME_EXTRA_CHARS: &[char] = &['.', '@', '+', '-', '_'];

/// Returns the characters of `username` that fall outside the allowed set.
pub(crate) fn invalid_username_chars(username: &str) -> String {
    username
        .chars()
        .filter(|c| !c.is_alphanumeric() && !USERNAME_EXTRA_CHARS.contains(c))
        .collect()
}

fn validate_signup(req: &SignupRequest) -> Result<(), ApiError> {
    if req.email.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "email",
            message: "Email cannot be empty",
        });
    }
    if req.username.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "username",
            message: "Username cannot be empty",
        });
    }
    if !invalid_username_chars(&req.username).is_empty() {
        return Err(ApiError::Validation {
            field: "username",
            message: "Username may only contain letters, digits and . @ + - _",
        });
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation {
            field: "password",
            message: "Password cannot be empty",
        });
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    validate_signup(&req)?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::Validation {
            field: "password",
            message: "Password could not be processed",
        }
    })?;

    let mut conn = pool.get()?;

    let new_user = NewUser {
        email: &req.email,
        username: &req.username,
        first_name: &req.first_name,
        last_name: &req.last_name,
        password_hash: &password_hash,
    };

    // Email/username uniqueness is the database's call; a concurrent signup
    // surfaces here as a unique violation.
    let user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(invalid_username_chars("alice").is_empty());
        assert!(invalid_username_chars("a.b@c+d-e_f").is_empty());
        assert!(invalid_username_chars("user2026").is_empty());
    }

    #[test]
    fn test_invalid_chars_are_reported() {
        assert_eq!(invalid_username_chars("bad!name"), "!");
        assert_eq!(invalid_username_chars("a b#c"), " #");
    }

    #[test]
    fn test_empty_username_rejected() {
        let req = SignupRequest {
            email: "a@b.c".into(),
            username: "  ".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            password: "pw".into(),
        };
        assert!(matches!(
            validate_signup(&req),
            Err(ApiError::Validation {
                field: "username",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_charset_rejected() {
        let req = SignupRequest {
            email: "a@b.c".into(),
            username: "no spaces".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            password: "pw".into(),
        };
        assert!(matches!(
            validate_signup(&req),
            Err(ApiError::Validation {
                field: "username",
                ..
            })
        ));
    }
}
