use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Placeholder secret some tutorials ship; never accepted.
const PLACEHOLDER_SECRET: &str = "dev";
const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file. Its parent directory is the instance folder.
    pub path: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub lifetime_hours: i64,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("lifetime_hours", &self.lifetime_hours)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (APP__SESSION__SECRET, APP__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// No session secret is shipped in any file; loading fails until one is provided.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: APP__SESSION__SECRET=... overrides session.secret
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make the deployment unsafe or unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;

        if self.session.lifetime_hours <= 0 {
            return Err(ConfigError::Message(
                "session.lifetime_hours must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.secret.trim();

        if secret.is_empty() || secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::Message(
                "session.secret must be set to a per-deployment secret".to_string(),
            ));
        }

        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "session.secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Create the instance folder holding the database file if it is missing.
    pub fn ensure_instance_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) if dir != Path::new("") => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                http_port: 5000,
            },
            database: DatabaseConfig {
                path: PathBuf::from("instance/web_app.sqlite"),
            },
            session: SessionConfig {
                secret: secret.to_string(),
                lifetime_hours: 744,
                cookie_secure: false,
            },
        }
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        let config = config_with_secret("a-real-deployment-secret-of-enough-length");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_placeholder_secret() {
        let config = config_with_secret("dev");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = config_with_secret("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let error = config_with_secret("short-secret")
            .validate()
            .unwrap_err()
            .to_string();
        assert!(error.contains("at least 32 bytes"));
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetime() {
        let mut config = config_with_secret("a-real-deployment-secret-of-enough-length");
        config.session.lifetime_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_with_secret("a-real-deployment-secret-of-enough-length");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("a-real-deployment-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_ensure_instance_dir_creates_parent() {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            path: root.path().join("instance").join("web_app.sqlite"),
        };

        config.ensure_instance_dir().expect("Failed to create dir");
        assert!(root.path().join("instance").is_dir());
    }
}
