//! Process configuration, read from the environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::services::seed_source::DEFAULT_SEED_URL;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dash-board.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value \"{value}\" for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub seed_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the config from any variable lookup; unset or empty variables
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: parse_var("HOST", get("HOST"))?.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(DEFAULT_PORT),
            seed_url: get("SEED_URL").unwrap_or_else(|| DEFAULT_SEED_URL.to_string()),
            request_timeout: Duration::from_secs(
                parse_var("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"))?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|value| value.parse::<T>().map_err(|_| ConfigError::Invalid { var, value }))
        .transpose()
}
