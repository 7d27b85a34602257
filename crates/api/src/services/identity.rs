//! Identity & Access: registration, login and the current-user lookup.

use chrono::Utc;
use hostel_core::error::CoreError;
use hostel_core::roles::Role;
use hostel_core::types::DbId;
use hostel_db::models::user::{CreateUser, User, UserResponse};
use hostel_db::store::{UQ_USERNAME, UQ_USER_EMAIL, UQ_USER_STUDENT_CODE};
use hostel_db::{StoreError, Stores};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub role: String,
    #[validate(length(min = 1, max = 200, message = "full_name must be 1-200 characters"))]
    pub full_name: String,
    pub phone: Option<String>,
    /// Student code linking a student account to its Student record.
    pub student_id: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

pub async fn register(
    stores: &Stores,
    config: &ServerConfig,
    input: &RegisterRequest,
) -> AppResult<AuthResponse> {
    input.validate()?;
    validate_password_strength(&input.password, config.min_password_length)
        .map_err(AppError::validation)?;

    let role: Role = input.role.parse()?;
    if role == Role::Warden && !config.allow_warden_signup {
        return Err(AppError::forbidden("Warden self-registration is disabled"));
    }
    let student_code = input
        .student_id
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string);
    if role == Role::Student && student_code.is_none() {
        return Err(AppError::validation("student_id is required for student accounts"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let new_user = CreateUser {
        username: input.username.clone(),
        email: input.email.clone(),
        password_hash,
        role,
        full_name: input.full_name.clone(),
        phone: input.phone.clone(),
        student_code: if role == Role::Student { student_code } else { None },
    };
    let user = stores.users.insert(&new_user).await.map_err(|err| match err {
        StoreError::UniqueViolation(ref c) if c == UQ_USERNAME => {
            AppError::Core(CoreError::Conflict("Username already taken".into()))
        }
        StoreError::UniqueViolation(ref c) if c == UQ_USER_EMAIL => {
            AppError::Core(CoreError::Conflict("Email already registered".into()))
        }
        StoreError::UniqueViolation(ref c) if c == UQ_USER_STUDENT_CODE => {
            AppError::Core(CoreError::Conflict("Student record is already linked to an account".into()))
        }
        other => other.into(),
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User registered");
    auth_response(config, &user)
}

/// Authenticate with username and password.
///
/// Unknown users and wrong passwords get the same message.
pub async fn login(stores: &Stores, config: &ServerConfig, input: &LoginRequest) -> AppResult<AuthResponse> {
    let invalid = || AppError::unauthorized("Invalid username or password");

    let user = stores
        .users
        .find_by_username(&input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %input.username, "Failed login attempt");
        return Err(invalid());
    }

    stores.users.record_login(user.id, Utc::now()).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    auth_response(config, &user)
}

pub async fn current_user(stores: &Stores, user_id: DbId) -> AppResult<UserResponse> {
    let user = stores
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;
    Ok(UserResponse::from(&user))
}

fn auth_response(config: &ServerConfig, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, user.role, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        token_type: "bearer",
        expires_in: config.jwt.expires_in_secs(),
        user: UserResponse::from(user),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::jwt::{validate_token, JwtConfig};
    use crate::config::StorageBackend;

    fn config(allow_warden_signup: bool) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            storage: StorageBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            jwt: JwtConfig {
                secret: "identity-test-secret".into(),
                access_token_expiry_mins: 60,
            },
            min_password_length: 8,
            allow_warden_signup,
            overdue_sweep_interval_secs: 0,
            static_dir: None,
        }
    }

    fn request(username: &str, role: &str, student_id: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "password123".into(),
            role: role.into(),
            full_name: "Test User".into(),
            phone: None,
            student_id: student_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_valid_tokens() {
        let stores = Stores::in_memory();
        let config = config(true);

        let registered = register(&stores, &config, &request("warden1", "warden", None))
            .await
            .unwrap();
        assert_eq!(registered.token_type, "bearer");
        assert_eq!(registered.expires_in, 3600);
        assert_eq!(registered.user.role, Role::Warden);

        let login_input = LoginRequest {
            username: "warden1".into(),
            password: "password123".into(),
        };
        let logged_in = login(&stores, &config, &login_input).await.unwrap();
        let claims = validate_token(&logged_in.access_token, &config.jwt).unwrap();
        assert_eq!(claims.sub, registered.user.id);

        let me = current_user(&stores, claims.sub).await.unwrap();
        assert!(me.last_login_at.is_some());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let stores = Stores::in_memory();
        let config = config(true);
        register(&stores, &config, &request("warden1", "warden", None)).await.unwrap();

        let wrong = LoginRequest {
            username: "warden1".into(),
            password: "not-the-password".into(),
        };
        let unknown = LoginRequest {
            username: "nobody".into(),
            password: "password123".into(),
        };
        let a = login(&stores, &config, &wrong).await.unwrap_err().to_string();
        let b = login(&stores, &config, &unknown).await.unwrap_err().to_string();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn registration_rules() {
        let stores = Stores::in_memory();

        assert_matches!(
            register(&stores, &config(false), &request("boss", "warden", None)).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert_matches!(
            register(&stores, &config(true), &request("kid", "student", None)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            register(&stores, &config(true), &request("admin", "admin", None)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let mut short = request("shorty", "warden", None);
        short.password = "short".into();
        assert_matches!(
            register(&stores, &config(true), &short).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        register(&stores, &config(true), &request("kid", "student", Some("S1")))
            .await
            .unwrap();
        assert_matches!(
            register(&stores, &config(true), &request("kid", "student", Some("S2"))).await,
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[tokio::test]
    async fn one_account_per_student_code() {
        let stores = Stores::in_memory();
        let config = config(true);
        register(&stores, &config, &request("owner", "student", Some("STU001")))
            .await
            .unwrap();

        assert_matches!(
            register(&stores, &config, &request("second", "student", Some("STU001"))).await,
            Err(AppError::Core(CoreError::Conflict(ref msg))) if msg.contains("already linked")
        );
        // A padded code is trimmed before it is stored.
        assert_matches!(
            register(&stores, &config, &request("third", "student", Some(" STU001 "))).await,
            Err(AppError::Core(CoreError::Conflict(_)))
        );
        assert!(stores.users.find_by_username("second").await.unwrap().is_none());

        // Wardens carry no student code and never collide.
        register(&stores, &config, &request("warden1", "warden", None)).await.unwrap();
        register(&stores, &config, &request("warden2", "warden", None)).await.unwrap();
    }
}
