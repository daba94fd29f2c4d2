//! Encoded polyline codec and the decoded route geometry type.
//!
//! Directions providers ship route geometry in the compact polyline
//! algorithm format: each coordinate is a pair of zig-zag encoded deltas,
//! split into 5-bit chunks, least significant chunk first, with 0x20 as the
//! continuation flag and 63 added to land in printable ASCII.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::BoundingBox;

/// Precision used by Google-style encoders and by openrouteservice.
pub const PRECISION_5: u32 = 5;

/// Precision used by OSRM `polyline6` and Valhalla style encoders.
pub const PRECISION_6: u32 = 6;

const CHUNK_OFFSET: u8 = 63;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Points are (latitude, longitude) tuples in path order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the path, `None` when there are no points.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// Encodes the points back into the compact string format.
    pub fn encode(&self, precision: u32) -> String {
        encode(&self.points, precision)
    }
}

/// Reasons an encoded string cannot be decoded.
///
/// Any of these means the provider handed over a corrupt geometry; the
/// decoder never returns a partial sequence alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("encoded polyline ends mid-value at byte {index}")]
    Truncated { index: usize },

    #[error("byte {byte:#04x} at {index} is outside the polyline alphabet")]
    InvalidCharacter { index: usize, byte: u8 },

    #[error("encoded value starting before byte {index} does not fit in 64 bits")]
    Overflow { index: usize },
}

/// Decodes an encoded polyline at the given precision.
///
/// The empty string decodes to an empty polyline. Latitude and longitude
/// deltas are summed into running accumulators, so every point is relative
/// to the one before it.
pub fn decode(encoded: &str, precision: u32) -> Result<Polyline, PolylineError> {
    let bytes = encoded.as_bytes();
    let factor = scale(precision);

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        let delta_lat = decode_value(bytes, &mut index)?;
        let delta_lng = decode_value(bytes, &mut index)?;

        lat = lat
            .checked_add(delta_lat)
            .ok_or(PolylineError::Overflow { index })?;
        lng = lng
            .checked_add(delta_lng)
            .ok_or(PolylineError::Overflow { index })?;

        points.push((lat as f64 / factor, lng as f64 / factor));
    }

    Ok(Polyline::new(points))
}

/// Encodes (latitude, longitude) points at the given precision.
///
/// Scaled values saturate at the `i64` range (NaN becomes 0) and deltas wrap,
/// so inputs far outside valid coordinates encode without panicking but do
/// not round-trip.
pub fn encode(points: &[(f64, f64)], precision: u32) -> String {
    let factor = scale(precision);
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for &(lat, lng) in points {
        let lat = (lat * factor).round() as i64;
        let lng = (lng * factor).round() as i64;
        encode_value(lat.wrapping_sub(prev_lat), &mut out);
        encode_value(lng.wrapping_sub(prev_lng), &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn scale(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

/// Reads one zig-zag value starting at `index`, advancing past it.
fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or(PolylineError::Truncated { index: *index })?;
        if !(CHUNK_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                index: *index,
                byte,
            });
        }
        if shift > 59 {
            return Err(PolylineError::Overflow { index: start });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    // Low bit is the sign flag.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

fn encode_value(value: i64, out: &mut String) {
    let mut value = ((value << 1) ^ (value >> 63)) as u64;
    while value >= CONTINUATION as u64 {
        let chunk = (CONTINUATION as u64 | (value & CHUNK_MASK as u64)) as u8;
        out.push(char::from(chunk + CHUNK_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHUNK_OFFSET));
}
