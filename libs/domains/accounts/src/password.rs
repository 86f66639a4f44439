//! Password hashing and strength policy

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use core_config::password::PasswordPolicyConfig;

use crate::error::{AccountError, AccountResult};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> AccountResult<String>;

    /// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable.
    fn verify(&self, password: &str, hash: &str) -> AccountResult<bool>;
}

/// Argon2id with a fresh random salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> AccountResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    config: PasswordPolicyConfig,
}

impl PasswordPolicy {
    pub fn new(config: PasswordPolicyConfig) -> Self {
        Self { config }
    }

    /// Reports the first rule the password breaks.
    pub fn check(&self, password: &str) -> AccountResult<()> {
        let length = password.chars().count();
        let config = &self.config;

        if length < config.min_length {
            return Err(weak(format!(
                "Password must be at least {} characters",
                config.min_length
            )));
        }

        if length > config.max_length {
            return Err(weak(format!(
                "Password cannot exceed {} characters",
                config.max_length
            )));
        }

        if config.require_mixed_case {
            if !password.chars().any(char::is_uppercase) {
                return Err(weak(
                    "Password must contain at least one uppercase letter".to_string(),
                ));
            }
            if !password.chars().any(char::is_lowercase) {
                return Err(weak(
                    "Password must contain at least one lowercase letter".to_string(),
                ));
            }
        }

        if config.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(weak("Password must contain at least one digit".to_string()));
        }

        if config.require_special && !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            return Err(weak(format!(
                "Password must contain at least one special character ({})",
                SPECIAL_CHARS
            )));
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(PasswordPolicyConfig::default())
    }
}

fn weak(message: String) -> AccountError {
    AccountError::WeakPassword(message)
}
