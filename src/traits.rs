//! Capabilities the route planner is wired with.
//!
//! Each collaborator (directions provider, geocoder, saved-route store,
//! key-value store, map view) is injected so the core can be exercised
//! without a network or a browser.

use serde_json::Value;

use crate::error::ClientError;
use crate::geometry::BoundingBox;
use crate::saved_routes::{NewRoute, SavedRoute};

/// A geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub label: String,
    /// (latitude, longitude)
    pub position: (f64, f64),
}

/// Fetches a route between two (lat, lng) points.
///
/// The raw response body is returned; its shape is provider specific.
pub trait DirectionsProvider {
    fn directions(&self, start: (f64, f64), end: (f64, f64)) -> Result<Value, ClientError>;
}

/// Number of suggestions requested per autocomplete query.
pub const DEFAULT_AUTOCOMPLETE_SIZE: usize = 5;

/// Address lookups returning ranked candidates.
pub trait Geocoder {
    fn autocomplete(&self, text: &str, size: usize) -> Result<Vec<PlaceCandidate>, ClientError>;

    /// Best single match for a free-text address.
    fn geocode(&self, text: &str) -> Result<Option<PlaceCandidate>, ClientError>;
}

/// CRUD access to the saved-route history.
pub trait RouteRepository {
    fn list(&self) -> Result<Vec<SavedRoute>, ClientError>;
    fn create(&self, route: &NewRoute) -> Result<SavedRoute, ClientError>;
    fn delete(&self, identifier: &str) -> Result<(), ClientError>;
}

/// String key-value storage for small client-side state.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Draws a path and fits the viewport to it.
pub trait MapView {
    fn show_route(&mut self, path: &[(f64, f64)], bounds: BoundingBox);
}
