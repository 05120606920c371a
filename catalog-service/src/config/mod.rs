use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;
use std::env;

/// URL scheme selecting the in-process store instead of MongoDB.
pub const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`. When absent, catalog routes answer 500.
    pub url: Option<String>,
    /// `DATABASE_NAME`. When absent, the database named in the URL is used.
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|url| url.starts_with(MEMORY_URL_SCHEME))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        let url = if is_prod {
            Some(get_env("DATABASE_URL", None, true)?)
        } else {
            non_empty(env::var("DATABASE_URL").ok())
        };

        Ok(CatalogConfig {
            common: common_config,
            database: DatabaseConfig {
                url,
                name: non_empty(env::var("DATABASE_NAME").ok()),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env("CORS_ALLOWED_ORIGINS", Some("*"), false)?),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
