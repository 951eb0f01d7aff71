//! Server configuration from flags, environment and `.env`.

use anyhow::Context;
use axum::http::HeaderValue;
use clap::{Parser, ValueEnum};
use folio::pool::DEFAULT_POOL_SIZE;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/portfolio_v3";
const TEST_DATABASE_URL: &str = "postgres://localhost/portfolio_v3_test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

/// Server settings, read from flags first and then the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "folio-server", version, about = "HTTP API for the portfolio backend")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    #[arg(long, env = "RECAPTCHA_SECRET", hide_env_values = true)]
    pub recaptcha_secret: Option<String>,

    /// Origin allowed to call the API from a browser.
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3001")]
    pub cors_origin: String,

    #[arg(long = "env", env = "FOLIO_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Apply embedded migrations before serving.
    #[arg(long)]
    pub migrate: bool,
}

impl Config {
    /// Load `.env` (if any), parse flags and environment, and validate.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pool_size == 0 {
            anyhow::bail!("DATABASE_POOL_SIZE must be at least 1");
        }
        if !folio::validate::is_url(&self.cors_origin) {
            anyhow::bail!("CORS_ORIGIN is not a valid URL: {}", self.cors_origin);
        }
        Ok(())
    }

    /// An explicit URL wins; otherwise the test environment gets its own database.
    pub fn database_url(&self) -> &str {
        match (&self.database_url, self.environment) {
            (Some(url), _) => url,
            (None, Environment::Test) => TEST_DATABASE_URL,
            (None, _) => DEFAULT_DATABASE_URL,
        }
    }

    pub fn cors_origin(&self) -> anyhow::Result<HeaderValue> {
        // Browsers send the origin without a trailing slash.
        let origin = self.cors_origin.trim_end_matches('/');
        HeaderValue::from_str(origin)
            .with_context(|| format!("CORS_ORIGIN is not a valid header value: {origin}"))
    }
}
