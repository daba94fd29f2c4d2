//! Coordinate validation and viewport bounds.

use serde::{Deserialize, Serialize};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Whether a (latitude, longitude) pair lies on the globe.
pub fn is_valid_coordinate((lat, lng): (f64, f64)) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&lat)
        && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&lng)
}

/// Whether every point of a decoded path is a valid coordinate.
///
/// An out-of-range point after decoding is the signal that the encoder used
/// a different precision than the one assumed.
pub fn all_in_range(points: &[(f64, f64)]) -> bool {
    points.iter().copied().all(is_valid_coordinate)
}

/// Axis-aligned box around a path, used to fit the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(lat, lng), rest) = points.split_first()?;
        let mut bounds = Self {
            min_lat: lat,
            min_lng: lng,
            max_lat: lat,
            max_lng: lng,
        };
        for &(lat, lng) in rest {
            bounds.min_lat = bounds.min_lat.min(lat);
            bounds.min_lng = bounds.min_lng.min(lng);
            bounds.max_lat = bounds.max_lat.max(lat);
            bounds.max_lng = bounds.max_lng.max(lng);
        }
        Some(bounds)
    }

    pub fn south_west(&self) -> (f64, f64) {
        (self.min_lat, self.min_lng)
    }

    pub fn north_east(&self) -> (f64, f64) {
        (self.max_lat, self.max_lng)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, (lat, lng): (f64, f64)) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}
