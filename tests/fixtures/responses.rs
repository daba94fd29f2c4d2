//! Directions responses and provider stand-ins.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use route_mapper::error::ClientError;
use route_mapper::traits::{DirectionsProvider, Geocoder, PlaceCandidate};

use super::swiss_locations::{Location, ZURICH_TO_BERN};

/// Canonical example of the polyline algorithm at precision 5.
pub const REFERENCE_ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
pub const REFERENCE_POINTS: [(f64, f64); 3] = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

/// `ZURICH_TO_BERN` encoded at precision 6. Out of range when read at precision 5.
pub const ZURICH_TO_BERN_POLYLINE6: &str = "g_tjyAg_jhOynAh_Hl_gY|l_bA";

fn positions(path: &[Location]) -> Vec<[f64; 2]> {
    path.iter().map(Location::lon_lat).collect()
}

/// openrouteservice `/v2/directions/{profile}` body.
pub fn ors_json_response(encoded: &str) -> Value {
    json!({
        "bbox": [7.439136, 46.94809, 8.5417, 47.3769],
        "routes": [{
            "summary": { "distance": 124543.6, "duration": 5535.9 },
            "geometry": encoded,
            "way_points": [0, 2]
        }],
        "metadata": { "service": "routing" }
    })
}

/// openrouteservice `/v2/directions/{profile}/geojson` body.
pub fn ors_geojson_response(path: &[Location]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "summary": { "distance": 124543.6, "duration": 5535.9 } },
            "geometry": { "type": "LineString", "coordinates": positions(path) }
        }]
    })
}

/// OSRM `geometries=geojson` body: structured geometry, flat summary fields.
pub fn osrm_geojson_response(path: &[Location]) -> Value {
    json!({
        "code": "Ok",
        "routes": [{
            "distance": 124543.6,
            "duration": 5535.9,
            "geometry": { "type": "LineString", "coordinates": positions(path) }
        }]
    })
}

/// What a provider answers when two points are not connected.
pub fn no_route_response() -> Value {
    json!({ "routes": [], "features": [] })
}

/// Directions provider replaying a fixed body, recording requests.
pub struct StubDirections {
    body: Result<Value, u16>,
    pub requests: Rc<RefCell<Vec<((f64, f64), (f64, f64))>>>,
}

impl StubDirections {
    pub fn answering(body: Value) -> Self {
        Self {
            body: Ok(body),
            requests: Rc::default(),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            body: Err(status),
            requests: Rc::default(),
        }
    }
}

impl DirectionsProvider for StubDirections {
    fn directions(&self, start: (f64, f64), end: (f64, f64)) -> Result<Value, ClientError> {
        self.requests.borrow_mut().push((start, end));
        match &self.body {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(ClientError::Status {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// Geocoder resolving from a fixed list of locations by exact name.
pub struct StubGeocoder {
    places: Vec<Location>,
    pub autocomplete_sizes: Rc<RefCell<Vec<usize>>>,
}

impl StubGeocoder {
    pub fn new(places: &[Location]) -> Self {
        Self {
            places: places.to_vec(),
            autocomplete_sizes: Rc::default(),
        }
    }

    pub fn swiss() -> Self {
        Self::new(ZURICH_TO_BERN)
    }
}

impl Geocoder for StubGeocoder {
    fn autocomplete(&self, text: &str, size: usize) -> Result<Vec<PlaceCandidate>, ClientError> {
        self.autocomplete_sizes.borrow_mut().push(size);
        Ok(self
            .places
            .iter()
            .filter(|place| place.name.starts_with(text))
            .take(size)
            .map(|place| PlaceCandidate {
                label: place.name.to_string(),
                position: place.coords(),
            })
            .collect())
    }

    fn geocode(&self, text: &str) -> Result<Option<PlaceCandidate>, ClientError> {
        Ok(self
            .places
            .iter()
            .find(|place| place.name == text)
            .map(|place| PlaceCandidate {
                label: place.name.to_string(),
                position: place.coords(),
            }))
    }
}
