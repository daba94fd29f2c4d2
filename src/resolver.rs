//! Route geometry resolution.
//!
//! Turns a raw directions response into a single canonical path of
//! (latitude, longitude) points, whatever geometry format the provider used.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::directions::{DirectionsResponse, Position, ResponseShape, RouteSummary};
use crate::geometry::all_in_range;
use crate::polyline::{self, PRECISION_5, PRECISION_6, Polyline};

/// Precisions tried, in order, for an encoded geometry.
pub const CANDIDATE_PRECISIONS: [u32; 2] = [PRECISION_5, PRECISION_6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The provider found no path between the requested points.
    #[error("no route found between the requested points")]
    NoRouteFound,

    /// A path exists but its geometry could not be decoded at any known precision.
    #[error("route geometry is unreadable")]
    UnreadableGeometry,
}

/// Where the canonical path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeometrySource {
    FeatureCollection,
    StructuredRoute,
    Encoded { precision: u32 },
}

/// A resolved route ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub polyline: Polyline,
    pub summary: RouteSummary,
    pub source: GeometrySource,
    /// The encoded string as received, for encoded sources.
    pub encoded: Option<String>,
}

/// Resolves a directions response body into a canonical path.
pub fn resolve(response: &Value) -> Result<ResolvedRoute, ResolveError> {
    let response = DirectionsResponse::from_value(response).ok_or(ResolveError::NoRouteFound)?;

    match response.shape() {
        ResponseShape::FeatureCollection { coordinates, summary } => Ok(ResolvedRoute {
            polyline: from_positions(&coordinates)?,
            summary,
            source: GeometrySource::FeatureCollection,
            encoded: None,
        }),
        ResponseShape::StructuredRoute { coordinates, summary } => Ok(ResolvedRoute {
            polyline: from_positions(&coordinates)?,
            summary,
            source: GeometrySource::StructuredRoute,
            encoded: None,
        }),
        ResponseShape::EncodedRoute { encoded, summary } => {
            let (polyline, precision) = resolve_encoded(&encoded)?;
            Ok(ResolvedRoute {
                polyline,
                summary,
                source: GeometrySource::Encoded { precision },
                encoded: Some(encoded),
            })
        }
        ResponseShape::UnrecognizedGeometry => Err(ResolveError::UnreadableGeometry),
        ResponseShape::Empty => Err(ResolveError::NoRouteFound),
    }
}

/// Decodes an encoded geometry whose precision is not known up front.
///
/// Precision 5 is tried first; an empty, malformed or out-of-range result
/// triggers one retry at precision 6. Returns the path and the precision
/// that produced it.
pub fn resolve_encoded(encoded: &str) -> Result<(Polyline, u32), ResolveError> {
    CANDIDATE_PRECISIONS
        .iter()
        .find_map(|&precision| decode_in_range(encoded, precision).map(|p| (p, precision)))
        .ok_or(ResolveError::UnreadableGeometry)
}

fn decode_in_range(encoded: &str, precision: u32) -> Option<Polyline> {
    polyline::decode(encoded, precision)
        .ok()
        .filter(|p| !p.is_empty() && all_in_range(p.points()))
}

/// Converts GeoJSON `[lon, lat]` positions into (lat, lon) points.
///
/// Returns `None` if any position has fewer than two values. Elevation is dropped.
pub fn swap_axes(positions: &[Position]) -> Option<Vec<(f64, f64)>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        })
        .collect()
}

fn from_positions(positions: &[Position]) -> Result<Polyline, ResolveError> {
    swap_axes(positions)
        .filter(|points| all_in_range(points))
        .map(Polyline::new)
        .ok_or(ResolveError::UnreadableGeometry)
}
