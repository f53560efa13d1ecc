//! Registration and login against the session's user directory.

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tracing::{info, warn};

use supportly_store::SessionState;
use supportly_types::api::{LoginForm, RegisterForm};
use supportly_types::models::User;

use crate::error::ApiError;
use crate::session::SessionContext;

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;

/// Validates the form, stores a new user with an Argon2id hash and makes it
/// the session's authenticated user.
pub fn register(state: &mut SessionState, form: &RegisterForm) -> Result<User, ApiError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("Full name is required".to_string());
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.push("Name must be at least 2 characters".to_string());
    }

    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.push("Invalid email format".to_string());
    } else if state.users.find_by_email(email).is_some() {
        errors.push("Email already registered. Please login instead".to_string());
    }

    if form.password.is_empty() {
        errors.push("Password is required".to_string());
    } else if form.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push("Password must be at least 6 characters".to_string());
    }

    if form.password != form.confirm_password {
        errors.push("Passwords do not match".to_string());
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let password_hash = hash_password(&form.password)?;
    let user = state
        .users
        .insert(name.to_string(), email.to_string(), password_hash, Utc::now())
        .to_user();
    state.user_id = Some(user.id);

    info!("Registered user {}", user.id);
    Ok(user)
}

/// Unknown email and wrong password both yield [`ApiError::InvalidCredentials`].
pub fn login(state: &mut SessionState, form: &LoginForm) -> Result<User, ApiError> {
    let email = form.email.trim();
    let mut errors = Vec::new();

    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.push("Invalid email format".to_string());
    }

    if form.password.is_empty() {
        errors.push("Password is required".to_string());
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let Some(record) = state.users.find_by_email(email) else {
        warn!("Login rejected: invalid credentials");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&form.password, &record.password_hash)? {
        warn!("Login rejected: invalid credentials");
        return Err(ApiError::InvalidCredentials);
    }

    let user = record.to_user();
    state.user_id = Some(user.id);

    info!("User {} logged in", user.id);
    Ok(user)
}

/// Drops all session state and rotates the session id. Returns the name of
/// the user that was logged in, if any.
pub async fn logout(session: &mut SessionContext) -> Result<Option<String>, ApiError> {
    let name = session.state.current_user().map(|user| user.name.clone());
    session.reset().await?;

    if name.is_some() {
        info!("Session closed on logout");
    }
    Ok(name)
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ApiError> {
    let parsed_hash =
        PasswordHash::new(stored_hash).map_err(|e| anyhow!("Corrupt password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Syntax check for a plain `local@domain` address with a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c));

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}
