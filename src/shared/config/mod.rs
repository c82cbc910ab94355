//! Application configuration module
//!
//! Provides the typed configuration of the server. Values come from the
//! environment (see [`AppConfig::from_env`]) or are assembled in code with
//! [`AppConfig::builder`], which is what the tests do.

use thiserror::Error;

/// Port used when `SERVER_PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// bcrypt cost used when `BCRYPT_COST` is not set
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Base URL of the password-reset links when `RESET_LINK_BASE` is not set
pub const DEFAULT_RESET_LINK_BASE: &str = "http://localhost:3000";

const DEVELOPMENT_JWT_SECRET: &str = "listshare-development-secret-change-me";

/// SMTP relay settings for outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender address, e.g. `listshare <no-reply@example.com>`
    pub from: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// HMAC secret for session and password-reset tokens
    pub jwt_secret: String,
    /// Prefix of the links sent in password-reset emails
    pub reset_link_base: String,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Outgoing mail relay; reset links are only logged when absent
    pub smtp: Option<SmtpConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            reset_link_base: DEFAULT_RESET_LINK_BASE.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            smtp: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from environment variables
    ///
    /// | Variable          | Field             | Default                 |
    /// |-------------------|-------------------|-------------------------|
    /// | `SERVER_PORT`     | `port`            | 3000                    |
    /// | `DATABASE_URL`    | `database_url`    | none (in-memory store)  |
    /// | `JWT_SECRET`      | `jwt_secret`      | development secret      |
    /// | `RESET_LINK_BASE` | `reset_link_base` | `http://localhost:3000` |
    /// | `BCRYPT_COST`     | `bcrypt_cost`     | 10                      |
    /// | `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM` | `smtp` | none |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(port) = env_var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.port(port);
        }

        if let Some(url) = env_var("DATABASE_URL") {
            builder = builder.database_url(url);
        }

        match env_var("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }

        if let Some(base) = env_var("RESET_LINK_BASE") {
            builder = builder.reset_link_base(base);
        }

        if let Some(cost) = env_var("BCRYPT_COST") {
            let cost = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("BCRYPT_COST", cost))?;
            builder = builder.bcrypt_cost(cost);
        }

        if let Some(host) = env_var("SMTP_HOST") {
            builder = builder.smtp(SmtpConfig {
                host,
                username: env_var("SMTP_USERNAME").ok_or(ConfigError::MissingValue("SMTP_USERNAME"))?,
                password: env_var("SMTP_PASSWORD").ok_or(ConfigError::MissingValue("SMTP_PASSWORD"))?,
                from: env_var("SMTP_FROM").ok_or(ConfigError::MissingValue("SMTP_FROM"))?,
            });
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue("BCRYPT_COST", self.bcrypt_cost.to_string()));
        }
        if !self.reset_link_base.starts_with("http://") && !self.reset_link_base.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.reset_link_base.clone()));
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the Postgres connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Set the base URL of password-reset links
    pub fn reset_link_base(mut self, base: impl Into<String>) -> Self {
        self.config.reset_link_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the SMTP relay
    pub fn smtp(mut self, smtp: SmtpConfig) -> Self {
        self.config.smtp = Some(smtp);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
