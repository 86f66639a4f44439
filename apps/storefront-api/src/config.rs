//! Configuration for the Storefront API

use core_config::{
    AppInfo, FromEnv, app_info, database::DatabaseConfig, media::MediaConfig,
    password::PasswordPolicyConfig, server::ServerConfig,
};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub postgres: PostgresConfig,
    pub media: MediaConfig,
    pub password_policy: PasswordPolicyConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let database = DatabaseConfig::from_env()?;
        let postgres = PostgresConfig::from_database_config(&database)?;

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database,
            postgres,
            media: MediaConfig::from_env()?,
            password_policy: PasswordPolicyConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/shop")),
                ("PORT", Some("9000")),
                ("MEDIA_URL", Some("https://cdn.example.com/media")),
                ("PASSWORD_MIN_LENGTH", Some("10")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "storefront-api");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.postgres.url, "postgres://localhost/shop");
                assert_eq!(config.media.media_url, "https://cdn.example.com/media/");
                assert_eq!(config.password_policy.min_length, 10);
            },
        );
    }
}
