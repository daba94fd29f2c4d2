//! Saved-route history backed by the `/api/routes` CRUD resource.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::traits::RouteRepository;

/// A point as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredCoordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl StoredCoordinates {
    pub fn from_lat_lng((latitude, longitude): (f64, f64)) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn lat_lng(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A route to be saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub start_text: String,
    pub end_text: String,
    pub start_coordinates: StoredCoordinates,
    pub end_coordinates: StoredCoordinates,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub geometry_encoded: Option<String>,
    pub profile: String,
}

/// A route as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub identifier: String,
    #[serde(flatten)]
    pub route: NewRoute,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SavedRoute {
    /// "start → end" label used in lists.
    pub fn label(&self) -> String {
        format!("{} → {}", self.route.start_text, self.route.end_text)
    }
}

#[derive(Debug, Clone)]
pub struct RouteStoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RouteStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Repository talking to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteRepository {
    config: RouteStoreConfig,
    client: reqwest::blocking::Client,
}

impl HttpRouteRepository {
    pub fn new(config: RouteStoreConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn routes_url(&self) -> String {
        format!("{}/api/routes", self.config.base_url)
    }

    /// URL of one saved route, with `identifier` escaped as a single path segment.
    fn route_url(&self, identifier: &str) -> Result<reqwest::Url, ClientError> {
        let invalid = || ClientError::InvalidBaseUrl(self.config.base_url.clone());
        let mut url = reqwest::Url::parse(&self.config.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "routes", identifier]);
        Ok(url)
    }
}

impl RouteRepository for HttpRouteRepository {
    fn list(&self) -> Result<Vec<SavedRoute>, ClientError> {
        let response = self.client.get(self.routes_url()).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn create(&self, route: &NewRoute) -> Result<SavedRoute, ClientError> {
        let response = self.client.post(self.routes_url()).json(route).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            tracing::warn!(%status, "saving route rejected");
            return Err(ClientError::from_response(status.as_u16(), body));
        }
        let saved: SavedRoute = serde_json::from_str(&body)?;
        tracing::debug!(identifier = %saved.identifier, "route saved");
        Ok(saved)
    }

    fn delete(&self, identifier: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.route_url(identifier)?).send()?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(identifier.to_string()));
        }
        if !status.is_success() {
            let body = response.text()?;
            return Err(ClientError::from_response(status.as_u16(), body));
        }
        Ok(())
    }
}

/// Process-local repository, insertion ordered.
#[derive(Debug, Default)]
pub struct InMemoryRouteRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: u64,
    routes: Vec<SavedRoute>,
}

impl InMemoryRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RouteRepository for InMemoryRouteRepository {
    fn list(&self) -> Result<Vec<SavedRoute>, ClientError> {
        Ok(self.state().routes.clone())
    }

    fn create(&self, route: &NewRoute) -> Result<SavedRoute, ClientError> {
        let mut state = self.state();
        state.next_id += 1;
        let saved = SavedRoute {
            identifier: state.next_id.to_string(),
            route: route.clone(),
            created_at: None,
        };
        state.routes.push(saved.clone());
        Ok(saved)
    }

    fn delete(&self, identifier: &str) -> Result<(), ClientError> {
        let mut state = self.state();
        let before = state.routes.len();
        state.routes.retain(|route| route.identifier != identifier);
        if state.routes.len() == before {
            return Err(ClientError::NotFound(identifier.to_string()));
        }
        Ok(())
    }
}
