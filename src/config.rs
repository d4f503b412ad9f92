use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::google_trends::GoogleTrendsClient;
use crate::api::open_food_facts::OpenFoodFactsClient;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub trends_base_url: String,
    pub trends_hl: String,
    /// Timezone offset in minutes, as Google Trends expects it
    pub trends_tz: i32,
    /// `None` means worldwide
    pub trends_geo: Option<String>,
    pub upstream_timeout: Duration,
    pub food_base_url: String,
    pub words_path: PathBuf,
    pub products_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            trends_base_url: GoogleTrendsClient::DEFAULT_BASE_URL.to_string(),
            trends_hl: "en-US".to_string(),
            trends_tz: 0,
            trends_geo: None,
            upstream_timeout: Duration::from_secs(10),
            food_base_url: OpenFoodFactsClient::DEFAULT_BASE_URL.to_string(),
            words_path: PathBuf::from("public/words.txt"),
            products_path: PathBuf::from("public/food-barcodes.json"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => parse_value("BIND_ADDR", v)?,
            None => defaults.bind_addr,
        };
        let trends_tz = match lookup("TRENDS_TZ") {
            Some(v) => parse_value("TRENDS_TZ", v)?,
            None => defaults.trends_tz,
        };
        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = parse_value("UPSTREAM_TIMEOUT_SECS", v.clone())?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "UPSTREAM_TIMEOUT_SECS",
                        value: v,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            bind_addr,
            trends_base_url: lookup("GOOGLE_TRENDS_BASE_URL").unwrap_or(defaults.trends_base_url),
            trends_hl: lookup("TRENDS_HL").unwrap_or(defaults.trends_hl),
            trends_tz,
            trends_geo: lookup("TRENDS_GEO").filter(|g| !g.trim().is_empty()),
            upstream_timeout,
            food_base_url: lookup("OPEN_FOOD_FACTS_BASE_URL").unwrap_or(defaults.food_base_url),
            words_path: lookup("WORDS_PATH").map(PathBuf::from).unwrap_or(defaults.words_path),
            products_path: lookup("PRODUCTS_PATH").map(PathBuf::from).unwrap_or(defaults.products_path),
        })
    }
}

fn parse_value<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
