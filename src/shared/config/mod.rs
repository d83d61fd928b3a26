//! Application configuration module
//!
//! Configuration is assembled in layers: built-in defaults, then an optional
//! TOML file, then environment variables. The result is validated once at
//! startup and shared read-only with the server.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://bridgeb.db";
/// Default listen port
pub const DEFAULT_SERVER_PORT: u16 = 5000;
/// Default token lifetime (7 days)
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 7 * 24;
/// Default bcrypt cost
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Shortest signing secret accepted
pub const MIN_SECRET_LEN: usize = 16;
/// File read when `BRIDGEB_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "bridgeb.toml";

/// Administrator account created or promoted at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx connection string
    pub database_url: String,
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: u64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Allowed browser origin, any origin when `None`
    pub cors_origin: Option<String>,
    /// Optional administrator seed
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the config file (if any) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("BRIDGEB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let file = if Path::new(&path).exists() {
            Some(std::fs::read_to_string(&path)?)
        } else {
            None
        };
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from TOML text and an environment lookup
    ///
    /// Environment values win over file values.
    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = match file {
            Some(text) => toml::from_str(text)?,
            None => FileConfig::default(),
        };

        let mut builder = AppConfig::builder();
        builder.apply_file(file);

        if let Some(url) = env("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = env("SERVER_PORT") {
            builder = builder.server_port(parse_env("SERVER_PORT", &port)?);
        }
        if let Some(secret) = env("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = env("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl_hours(parse_env("TOKEN_TTL_HOURS", &ttl)?);
        }
        if let Some(cost) = env("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_env("BCRYPT_COST", &cost)?);
        }
        if let Some(origin) = env("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(email) = env("ADMIN_EMAIL") {
            builder.admin_email = Some(email);
        }
        if let Some(password) = env("ADMIN_PASSWORD") {
            builder.admin_password = Some(password);
        }
        if let Some(name) = env("ADMIN_NAME") {
            builder.admin_name = Some(name);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                key: "jwt_secret",
                message: format!("must be at least {} bytes", MIN_SECRET_LEN),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                message: "must be between 4 and 31".to_string(),
            });
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "token_ttl_hours",
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(origin) = &self.cors_origin {
            if !origin.chars().all(|c| c.is_ascii_graphic()) {
                return Err(ConfigError::InvalidValue {
                    key: "cors_origin",
                    message: "must be a single origin such as https://example.org".to_string(),
                });
            }
        }
        if let Some(admin) = &self.admin {
            if !admin.email.contains('@') {
                return Err(ConfigError::InvalidValue {
                    key: "admin_email",
                    message: "must be an email address".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Shape of the optional TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_url: Option<String>,
    server_port: Option<u16>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    bcrypt_cost: Option<u32>,
    cors_origin: Option<String>,
    admin_email: Option<String>,
    admin_password: Option<String>,
    admin_name: Option<String>,
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        message: format!("cannot parse '{}'", value),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    bcrypt_cost: Option<u32>,
    cors_origin: Option<String>,
    admin_email: Option<String>,
    admin_password: Option<String>,
    admin_name: Option<String>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    /// Seed an administrator account at startup
    pub fn admin(mut self, email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        self.admin_email = Some(email.into());
        self.admin_password = Some(password.into());
        self.admin_name = Some(name.into());
        self
    }

    fn apply_file(&mut self, file: FileConfig) {
        self.database_url = file.database_url.or(self.database_url.take());
        self.server_port = file.server_port.or(self.server_port);
        self.jwt_secret = file.jwt_secret.or(self.jwt_secret.take());
        self.token_ttl_hours = file.token_ttl_hours.or(self.token_ttl_hours);
        self.bcrypt_cost = file.bcrypt_cost.or(self.bcrypt_cost);
        self.cors_origin = file.cors_origin.or(self.cors_origin.take());
        self.admin_email = file.admin_email.or(self.admin_email.take());
        self.admin_password = file.admin_password.or(self.admin_password.take());
        self.admin_name = file.admin_name.or(self.admin_name.take());
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.ok_or(ConfigError::MissingValue("jwt_secret"))?;

        let admin = match (self.admin_email, self.admin_password) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email: email.trim().to_lowercase(),
                password,
                name: self.admin_name.unwrap_or_else(|| "Administrator".to_string()),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingValue("admin_password")),
            (None, Some(_)) => return Err(ConfigError::MissingValue("admin_email")),
        };

        let config = AppConfig {
            database_url: self.database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            jwt_secret,
            token_ttl_hours: self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            cors_origin: self.cors_origin.filter(|o| !o.trim().is_empty()),
            admin,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}
