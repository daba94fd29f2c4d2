//! Route computation flow: locate endpoints, fetch directions, resolve the
//! geometry, count the search and save the route.

use rayon::prelude::*;
use thiserror::Error;

use crate::error::ClientError;
use crate::geometry::is_valid_coordinate;
use crate::polyline::{PRECISION_5, Polyline};
use crate::resolver::{ResolveError, ResolvedRoute, resolve, resolve_encoded};
use crate::saved_routes::{NewRoute, SavedRoute, StoredCoordinates};
use crate::search_stats::{SearchStats, TOP_SEARCHES_LIMIT};
use crate::traits::{
    DEFAULT_AUTOCOMPLETE_SIZE, DirectionsProvider, Geocoder, KeyValueStore, MapView, PlaceCandidate, RouteRepository,
};

pub const DEFAULT_PROFILE: &str = "driving-car";

/// A start or destination as entered by the user.
///
/// `position` is set when the user picked a suggestion; otherwise the text
/// is geocoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub text: String,
    pub position: Option<(f64, f64)>,
}

impl PlaceQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: None,
        }
    }

    pub fn at(text: impl Into<String>, position: (f64, f64)) -> Self {
        Self {
            text: text.into(),
            position: Some(position),
        }
    }
}

impl From<PlaceCandidate> for PlaceQuery {
    fn from(candidate: PlaceCandidate) -> Self {
        Self::at(candidate.label, candidate.position)
    }
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no location found for \"{0}\"")]
    UnknownPlace(String),

    #[error("geocoding failed: {0}")]
    Geocoding(#[source] ClientError),

    #[error("directions request failed: {0}")]
    Directions(#[source] ClientError),

    #[error(transparent)]
    Route(#[from] ResolveError),

    #[error("route store request failed: {0}")]
    Store(#[source] ClientError),
}

/// Outcome of a successful route computation.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub route: ResolvedRoute,
    /// `None` when the route store rejected or could not be reached.
    pub saved: Option<SavedRoute>,
}

/// A saved route together with its decoded geometry.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub saved: SavedRoute,
    /// `None` when the route was stored without geometry.
    pub geometry: Option<Result<Polyline, ResolveError>>,
}

#[derive(Debug)]
pub struct RoutePlanner<D, G, R, S> {
    directions: D,
    geocoder: G,
    repository: R,
    stats: SearchStats<S>,
    profile: String,
}

impl<D, G, R, S> RoutePlanner<D, G, R, S>
where
    D: DirectionsProvider,
    G: Geocoder,
    R: RouteRepository,
    S: KeyValueStore,
{
    pub fn new(directions: D, geocoder: G, repository: R, store: S) -> Self {
        Self {
            directions,
            geocoder,
            repository,
            stats: SearchStats::new(store),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Sets the routing profile recorded with saved routes.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn stats(&self) -> &SearchStats<S> {
        &self.stats
    }

    pub fn suggestions(&self, text: &str) -> Result<Vec<PlaceCandidate>, PlannerError> {
        self.geocoder
            .autocomplete(text, DEFAULT_AUTOCOMPLETE_SIZE)
            .map_err(PlannerError::Geocoding)
    }

    /// Computes a route between two places and records it.
    pub fn compute(&mut self, start: &PlaceQuery, end: &PlaceQuery) -> Result<PlannedRoute, PlannerError> {
        let start_text = start.text.trim();
        let end_text = end.text.trim();
        let start_position = self.locate(start)?;
        let end_position = self.locate(end)?;

        let body = self
            .directions
            .directions(start_position, end_position)
            .map_err(PlannerError::Directions)?;
        let route = resolve(&body)?;

        let label = format!("{} → {}", start_text, end_text);
        let count = self.stats.record(&label);
        tracing::debug!(%label, count, points = route.polyline.len(), "route computed");

        let new_route = NewRoute {
            start_text: start_text.to_string(),
            end_text: end_text.to_string(),
            start_coordinates: StoredCoordinates::from_lat_lng(start_position),
            end_coordinates: StoredCoordinates::from_lat_lng(end_position),
            distance_meters: Some(route.summary.distance_meters),
            duration_seconds: Some(route.summary.duration_seconds),
            geometry_encoded: Some(
                route
                    .encoded
                    .clone()
                    .unwrap_or_else(|| route.polyline.encode(PRECISION_5)),
            ),
            profile: self.profile.clone(),
        };

        let saved = match self.repository.create(&new_route) {
            Ok(saved) => Some(saved),
            Err(err) => {
                tracing::warn!(%err, %label, "route computed but not saved");
                None
            }
        };

        Ok(PlannedRoute {
            start: start_position,
            end: end_position,
            route,
            saved,
        })
    }

    /// Lists saved routes and decodes their geometries.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, PlannerError> {
        let saved = self.repository.list().map_err(PlannerError::Store)?;

        Ok(saved
            .into_par_iter()
            .map(|saved| {
                let geometry = saved
                    .route
                    .geometry_encoded
                    .as_deref()
                    .map(|encoded| resolve_encoded(encoded).map(|(polyline, _)| polyline));
                HistoryEntry { saved, geometry }
            })
            .collect())
    }

    pub fn delete(&self, identifier: &str) -> Result<(), PlannerError> {
        self.repository.delete(identifier).map_err(PlannerError::Store)
    }

    pub fn top_searches(&self) -> Vec<(String, u64)> {
        self.stats.top(TOP_SEARCHES_LIMIT)
    }

    fn locate(&self, place: &PlaceQuery) -> Result<(f64, f64), PlannerError> {
        if let Some(position) = place.position.filter(|p| is_valid_coordinate(*p)) {
            return Ok(position);
        }

        let text = place.text.trim();
        self.geocoder
            .geocode(text)
            .map_err(PlannerError::Geocoding)?
            .map(|candidate| candidate.position)
            .ok_or_else(|| PlannerError::UnknownPlace(text.to_string()))
    }
}

/// Draws a path on the map, returning `false` for an empty path.
pub fn show<V: MapView>(view: &mut V, polyline: &Polyline) -> bool {
    match polyline.bounds() {
        Some(bounds) => {
            view.show_route(polyline.points(), bounds);
            true
        }
        None => false,
    }
}
