//! Real Swiss locations for route fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

#![allow(dead_code)]

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// GeoJSON position order.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

pub const ZURICH_CENTER: Location = Location::new("Zürich", 47.3769, 8.5417);
pub const ZURICH_HB: Location = Location::new("Zürich HB, Schweiz", 47.378177, 8.537087);
pub const BERN_BAHNHOF: Location = Location::new("Bern Bahnhof, Schweiz", 46.94809, 7.439136);

/// Zürich HB → Bern as a coarse path.
pub const ZURICH_TO_BERN: &[Location] = &[ZURICH_CENTER, ZURICH_HB, BERN_BAHNHOF];
