//! Environment-driven configuration.

use std::env;

use thiserror::Error;

use crate::ors::{DirectionsFormat, OrsClient, OrsConfig};
use crate::planner::RoutePlanner;
use crate::saved_routes::{HttpRouteRepository, RouteStoreConfig};
use crate::search_stats::InMemoryStore;

pub const ORS_API_KEY: &str = "ORS_API_KEY";
pub const ORS_BASE_URL: &str = "ORS_BASE_URL";
pub const ORS_PROFILE: &str = "ORS_PROFILE";
pub const ORS_FORMAT: &str = "ORS_FORMAT";
pub const ORS_TIMEOUT_SECS: &str = "ORS_TIMEOUT_SECS";
pub const ROUTE_API_BASE: &str = "ROUTE_API_BASE";
pub const ROUTE_API_TIMEOUT_SECS: &str = "ROUTE_API_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub ors: OrsConfig,
    pub route_store: RouteStoreConfig,
}

/// Planner wired to openrouteservice and the HTTP route store.
pub type HttpRoutePlanner = RoutePlanner<OrsClient, OrsClient, HttpRouteRepository, InMemoryStore>;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_key = read(ORS_API_KEY).ok_or(ConfigError::Missing(ORS_API_KEY))?;
        let format = match read(ORS_FORMAT).as_deref() {
            None | Some("json") => DirectionsFormat::Json,
            Some("geojson") => DirectionsFormat::GeoJson,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: ORS_FORMAT,
                    value: other.to_string(),
                });
            }
        };

        let ors = OrsConfig {
            base_url: read(ORS_BASE_URL).unwrap_or(defaults.ors.base_url),
            api_key,
            profile: read(ORS_PROFILE).unwrap_or(defaults.ors.profile),
            format,
            timeout_secs: parse_secs(ORS_TIMEOUT_SECS, read(ORS_TIMEOUT_SECS), defaults.ors.timeout_secs)?,
        };
        let route_store = RouteStoreConfig {
            base_url: read(ROUTE_API_BASE).unwrap_or(defaults.route_store.base_url),
            timeout_secs: parse_secs(
                ROUTE_API_TIMEOUT_SECS,
                read(ROUTE_API_TIMEOUT_SECS),
                defaults.route_store.timeout_secs,
            )?,
        };

        Ok(Self { ors, route_store })
    }

    /// Builds a planner against the configured services.
    pub fn planner(&self) -> Result<HttpRoutePlanner, reqwest::Error> {
        let ors = OrsClient::new(self.ors.clone())?;
        let repository = HttpRouteRepository::new(self.route_store.clone())?;
        Ok(RoutePlanner::new(ors.clone(), ors, repository, InMemoryStore::new())
            .with_profile(self.ors.profile.clone()))
    }
}

fn parse_secs(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
