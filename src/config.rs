use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub files_url: Url,
    pub request_timeout: Duration,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_url = parse_base_url("RECRUITMENT_API_URL", &get_env("RECRUITMENT_API_URL")?)?;
        let files_url = match env::var("RECRUITMENT_FILES_URL") {
            Ok(raw) if !raw.trim().is_empty() => parse_base_url("RECRUITMENT_FILES_URL", &raw)?,
            _ => api_url.clone(),
        };
        let timeout_secs = match env::var("API_TIMEOUT_SECS") {
            Ok(_) => get_env_parse::<u64>("API_TIMEOUT_SECS")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            files_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds a configuration for the given backend without touching the environment.
    pub fn new(api_url: &str) -> Result<Self> {
        let api_url = parse_base_url("api_url", api_url)?;
        Ok(Self {
            files_url: api_url.clone(),
            api_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

// Relative joins drop the last path segment unless the base ends with '/'.
fn parse_base_url(name: &str, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
