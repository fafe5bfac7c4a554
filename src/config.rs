//! Runtime configuration, read from the environment (and `.env` via dotenvy).

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not in the correct format: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string; the file is created if missing.
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: Ipv4Addr,
    pub port: u16,
    pub app_name: String,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://dota2.db".into()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            host: parse_or(&lookup, "HOST", Ipv4Addr::LOCALHOST)?,
            port: parse_or(&lookup, "PORT", 8000)?,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Dota2 Tools".into()),
            version: lookup("VERSION").unwrap_or_else(|| "0.0.1".into()),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    /// Text served on `/`.
    pub fn banner(&self) -> String {
        format!("{} - v{}", self.app_name, self.version)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
