//! Transport DTOs for directions provider responses.
//!
//! Providers answer in one of three shapes: a GeoJSON FeatureCollection, a
//! `routes` array whose geometry is a coordinate object, or a `routes` array
//! whose geometry is an encoded polyline string. Only `features[0]` and
//! `routes[0]` are read, each decoded on its own into these DTOs and then
//! classified into a [`ResponseShape`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A GeoJSON position: `[longitude, latitude]`, optionally followed by elevation.
pub type Position = Vec<f64>;

const LINE_STRING: &str = "LineString";

#[derive(Debug, Default, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<Value>,
    #[serde(default)]
    pub routes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureDto {
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<FeatureGeometryDto>,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<FeaturePropertiesDto>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureGeometryDto {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturePropertiesDto {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<SummaryDto>,
}

#[derive(Debug, Deserialize)]
pub struct LineStringDto {
    pub coordinates: Vec<Position>,
}

#[derive(Debug, Deserialize)]
pub struct RouteDto {
    #[serde(default)]
    pub geometry: Option<RouteGeometryDto>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<SummaryDto>,
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<f64>,
}

/// Geometry attached to an element of the `routes` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RouteGeometryDto {
    Encoded(String),
    LineString(LineStringDto),
    Unrecognized(Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryDto {
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<f64>,
}

/// Reads an optional field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Summary metrics reported by the provider, passed through untouched.
///
/// Missing or unreadable values are reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds / 3600.0
    }
}

impl From<&SummaryDto> for RouteSummary {
    fn from(dto: &SummaryDto) -> Self {
        Self {
            distance_meters: dto.distance.unwrap_or_default(),
            duration_seconds: dto.duration.unwrap_or_default(),
        }
    }
}

/// Which known geometry encoding a response carries.
///
/// Classification follows a fixed priority: features first, then a
/// structured route geometry, then an encoded route geometry.
#[derive(Debug)]
pub enum ResponseShape {
    FeatureCollection {
        coordinates: Vec<Position>,
        summary: RouteSummary,
    },
    StructuredRoute {
        coordinates: Vec<Position>,
        summary: RouteSummary,
    },
    EncodedRoute {
        encoded: String,
        summary: RouteSummary,
    },
    /// A path is present but its geometry is not a readable coordinate list or string.
    UnrecognizedGeometry,
    /// Nothing that looks like a path: no features, no routes, or empty containers.
    Empty,
}

impl DirectionsResponse {
    /// Reads a response body, `None` when its top level matches no known layout.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn shape(&self) -> ResponseShape {
        let feature_shape = self
            .features
            .first()
            .and_then(|feature| FeatureDto::deserialize(feature).ok())
            .and_then(FeatureDto::into_shape);
        if let Some(shape) = feature_shape {
            return shape;
        }

        match self.routes.first().map(RouteDto::deserialize) {
            Some(Ok(route)) => route.into_shape(),
            Some(Err(_)) | None => ResponseShape::Empty,
        }
    }
}

impl FeatureDto {
    /// `None` when the feature carries no LineString, so the routes are tried next.
    fn into_shape(self) -> Option<ResponseShape> {
        let geometry = self.geometry?;
        if geometry.kind.as_deref().is_some_and(|kind| kind != LINE_STRING) {
            return None;
        }
        let coordinates = geometry.coordinates?;
        if coordinates.as_array().is_some_and(Vec::is_empty) {
            return None;
        }

        let summary = self
            .properties
            .as_ref()
            .and_then(|props| props.summary.as_ref())
            .map(RouteSummary::from)
            .unwrap_or_default();

        Some(match Vec::<Position>::deserialize(coordinates) {
            Ok(coordinates) => ResponseShape::FeatureCollection {
                coordinates,
                summary,
            },
            Err(_) => ResponseShape::UnrecognizedGeometry,
        })
    }
}

impl RouteDto {
    fn summary(&self) -> RouteSummary {
        match &self.summary {
            Some(summary) => RouteSummary::from(summary),
            None => RouteSummary {
                distance_meters: self.distance.unwrap_or_default(),
                duration_seconds: self.duration.unwrap_or_default(),
            },
        }
    }

    fn into_shape(self) -> ResponseShape {
        let summary = self.summary();
        match self.geometry {
            Some(RouteGeometryDto::LineString(line)) if !line.coordinates.is_empty() => {
                ResponseShape::StructuredRoute {
                    coordinates: line.coordinates,
                    summary,
                }
            }
            Some(RouteGeometryDto::Encoded(encoded)) => ResponseShape::EncodedRoute { encoded, summary },
            Some(RouteGeometryDto::Unrecognized(_)) => ResponseShape::UnrecognizedGeometry,
            Some(RouteGeometryDto::LineString(_)) | None => ResponseShape::Empty,
        }
    }
}
