use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub data_backend: DataBackend,
    // Postgres backend
    pub database_url: Option<String>,
    // Hosted data API
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub rest_timeout_secs: u64,
    // Feed paging
    pub default_page_size: i64,
    pub max_page_size: i64,
    // Product lookup cache
    pub product_cache_enabled: bool,
    pub product_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Where products and interactions are stored
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DataBackend {
    /// Direct connection to the database through `DATABASE_URL`
    Postgres,
    /// The hosted data service's REST interface, authenticated with the service role key
    Rest,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_backend = match non_empty("DATA_BACKEND").as_deref() {
            None | Some("postgres") => DataBackend::Postgres,
            Some("rest") => DataBackend::Rest,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "DATA_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let config = Config {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", non_empty("PORT"), 8080)?,
            environment: match non_empty("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match non_empty("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            data_backend,
            database_url: non_empty("DATABASE_URL"),
            supabase_url: non_empty("SUPABASE_URL"),
            supabase_anon_key: non_empty("SUPABASE_ANON_KEY"),
            supabase_service_role_key: non_empty("SUPABASE_SERVICE_ROLE_KEY"),
            rest_timeout_secs: parse_or("REST_TIMEOUT_SECS", non_empty("REST_TIMEOUT_SECS"), 10)?,
            default_page_size: parse_or("DEFAULT_PAGE_SIZE", non_empty("DEFAULT_PAGE_SIZE"), 4)?,
            max_page_size: parse_or("MAX_PAGE_SIZE", non_empty("MAX_PAGE_SIZE"), 50)?,
            product_cache_enabled: non_empty("PRODUCT_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            product_cache_ttl_secs: parse_or(
                "PRODUCT_CACHE_TTL_SECS",
                non_empty("PRODUCT_CACHE_TTL_SECS"),
                300,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.data_backend {
            DataBackend::Postgres => {
                if self.database_url.is_none() {
                    return Err(ConfigError::Missing("DATABASE_URL"));
                }
            }
            DataBackend::Rest => {
                if self.supabase_url.is_none() {
                    return Err(ConfigError::Missing("SUPABASE_URL"));
                }
                if self.supabase_service_role_key.is_none() {
                    return Err(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"));
                }
            }
        }

        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_PAGE_SIZE",
                value: self.default_page_size.to_string(),
            });
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
