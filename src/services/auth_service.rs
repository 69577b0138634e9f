//! Registration and login orchestration.
//!
//! Stateless request-scoped logic: the credential store owns all persistent
//! state, and login issues a signed token instead of a server-side session.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::{password, TokenService};
use crate::database::models::PublicUser;
use crate::database::users;
use crate::error::ApiError;
use crate::services::validate::{is_valid_email, non_empty, FieldErrors};

/// Unknown email and wrong password are deliberately indistinguishable.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug)]
struct ValidRegistration<'a> {
    firstname: &'a str,
    lastname: &'a str,
    email: &'a str,
    password: &'a str,
}

fn validate_registration(request: &RegisterRequest) -> Result<ValidRegistration<'_>, ApiError> {
    let mut errors = FieldErrors::new();

    let firstname = errors.require("firstname", &request.firstname);
    let lastname = errors.require("lastname", &request.lastname);
    let email = errors.require("email", &request.email);
    let password = errors.require("password", &request.password);

    if let Some(email) = email {
        if !is_valid_email(email) {
            errors.reject("email", "Must be a valid email address");
        }
    }

    match (firstname, lastname, email, password) {
        (Some(firstname), Some(lastname), Some(email), Some(password))
            if errors.is_empty() =>
        {
            Ok(ValidRegistration {
                firstname,
                lastname,
                email,
                password,
            })
        }
        _ => Err(errors.into_error()),
    }
}

/// Create a new user account and return its public fields.
pub async fn register(pool: &PgPool, request: RegisterRequest) -> Result<PublicUser, ApiError> {
    let valid = validate_registration(&request)?;

    let password_hash = password::hash_password(valid.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process registration")
    })?;

    let user = match users::insert_user(
        pool,
        valid.firstname,
        valid.lastname,
        valid.email,
        &password_hash,
    )
    .await
    {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(ApiError::conflict("An account with this email already exists"));
        }
        Err(other) => return Err(other.into()),
    };

    info!("Registered user {}", user.id);
    Ok(PublicUser::from(user))
}

/// Verify credentials and issue a bearer token.
pub async fn login(
    pool: &PgPool,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    // Missing fields fail exactly like bad credentials
    let (email, password) = match (non_empty(&request.email), non_empty(&request.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
    };

    let user = match users::find_by_email(pool, email).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown email");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let verified = password::verify_password(password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification failed: {}", e);
        ApiError::internal_server_error("Failed to process login")
    })?;

    if !verified {
        warn!("Login attempt with wrong password for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = tokens.issue(user.id, &user.email)?;
    info!("User {} logged in", user.id);

    Ok(LoginResponse {
        token,
        user: PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RegisterRequest {
        RegisterRequest {
            firstname: Some("John".into()),
            lastname: Some("Doe".into()),
            email: Some("john@example.com".into()),
            password: Some("P@ssw0rd!".into()),
        }
    }

    #[test]
    fn valid_registration_passes() {
        let request = full_request();
        let valid = validate_registration(&request).unwrap();
        assert_eq!(valid.firstname, "John");
        assert_eq!(valid.email, "john@example.com");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let request = RegisterRequest {
            firstname: None,
            lastname: Some("".into()),
            email: Some("john@example.com".into()),
            password: Some("P@ssw0rd!".into()),
        };

        let err = validate_registration(&request).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let body = err.to_json();
        assert_eq!(body["field_errors"]["firstname"], "This field is required");
        assert_eq!(body["field_errors"]["lastname"], "This field is required");
        assert!(body["field_errors"].get("email").is_none());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut request = full_request();
        request.email = Some("not-an-email".into());

        let err = validate_registration(&request).unwrap_err();
        let body = err.to_json();
        assert_eq!(body["field_errors"]["email"], "Must be a valid email address");
    }
}
