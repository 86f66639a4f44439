use crate::{env_parse, ConfigError, FromEnv};

/// Password-strength policy parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordPolicyConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub require_mixed_case: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_mixed_case: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl FromEnv for PasswordPolicyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_length: env_parse("PASSWORD_MIN_LENGTH", defaults.min_length)?,
            max_length: env_parse("PASSWORD_MAX_LENGTH", defaults.max_length)?,
            require_mixed_case: env_parse(
                "PASSWORD_REQUIRE_MIXED_CASE",
                defaults.require_mixed_case,
            )?,
            require_digit: env_parse("PASSWORD_REQUIRE_DIGIT", defaults.require_digit)?,
            require_special: env_parse("PASSWORD_REQUIRE_SPECIAL", defaults.require_special)?,
        };

        if config.min_length == 0 || config.min_length > config.max_length {
            return Err(ConfigError::ParseError {
                key: "PASSWORD_MIN_LENGTH".to_string(),
                details: format!(
                    "must be between 1 and PASSWORD_MAX_LENGTH ({})",
                    config.max_length
                ),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 5] = [
        "PASSWORD_MIN_LENGTH",
        "PASSWORD_MAX_LENGTH",
        "PASSWORD_REQUIRE_MIXED_CASE",
        "PASSWORD_REQUIRE_DIGIT",
        "PASSWORD_REQUIRE_SPECIAL",
    ];

    #[test]
    fn test_policy_defaults() {
        temp_env::with_vars_unset(KEYS, || {
            assert_eq!(
                PasswordPolicyConfig::from_env().unwrap(),
                PasswordPolicyConfig::default()
            );
        });
    }

    #[test]
    fn test_policy_overrides() {
        temp_env::with_vars(
            [
                ("PASSWORD_MIN_LENGTH", Some("12")),
                ("PASSWORD_REQUIRE_SPECIAL", Some("false")),
            ],
            || {
                let config = PasswordPolicyConfig::from_env().unwrap();
                assert_eq!(config.min_length, 12);
                assert!(!config.require_special);
                assert!(config.require_digit);
            },
        );
    }

    #[test]
    fn test_policy_min_above_max_rejected() {
        temp_env::with_vars(
            [
                ("PASSWORD_MIN_LENGTH", Some("64")),
                ("PASSWORD_MAX_LENGTH", Some("32")),
            ],
            || {
                let err = PasswordPolicyConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("PASSWORD_MIN_LENGTH"));
            },
        );
    }

    #[test]
    fn test_policy_bad_bool_rejected() {
        temp_env::with_var("PASSWORD_REQUIRE_DIGIT", Some("sometimes"), || {
            assert!(PasswordPolicyConfig::from_env().is_err());
        });
    }
}
