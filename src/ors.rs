//! openrouteservice HTTP adapter for directions and geocoding.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ClientError;
use crate::traits::{DirectionsProvider, Geocoder, PlaceCandidate};

/// Autocomplete queries shorter than this are not sent.
pub const MIN_AUTOCOMPLETE_CHARS: usize = 3;

const UNLABELED: &str = "(unlabeled)";

/// Response encoding requested from the directions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionsFormat {
    /// `routes` array with an encoded polyline geometry.
    #[default]
    Json,
    /// GeoJSON FeatureCollection.
    GeoJson,
}

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub api_key: String,
    pub profile: String,
    pub format: DirectionsFormat,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            api_key: String::new(),
            profile: "driving-car".to_string(),
            format: DirectionsFormat::Json,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OrsConfig {
        &self.config
    }

    fn directions_url(&self) -> String {
        let url = format!(
            "{}/v2/directions/{}",
            self.config.base_url, self.config.profile
        );
        match self.config.format {
            DirectionsFormat::Json => url,
            DirectionsFormat::GeoJson => format!("{}/geojson", url),
        }
    }

    fn search(&self, endpoint: &str, text: &str, size: usize) -> Result<Vec<PlaceCandidate>, ClientError> {
        let url = format!("{}/geocode/{}", self.config.base_url, endpoint);
        tracing::debug!(endpoint, text, size, "geocode request");

        let size = size.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("text", text),
                ("size", size.as_str()),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            tracing::warn!(%status, endpoint, "geocode request rejected");
            return Err(ClientError::from_response(status.as_u16(), body));
        }

        let collection: PlaceCollection = serde_json::from_str(&body)?;
        Ok(collection
            .features
            .into_iter()
            .filter_map(PlaceFeature::into_candidate)
            .collect())
    }
}

impl DirectionsProvider for OrsClient {
    fn directions(&self, start: (f64, f64), end: (f64, f64)) -> Result<Value, ClientError> {
        let url = self.directions_url();
        // openrouteservice expects [lon, lat]
        let body = json!({
            "coordinates": [[start.1, start.0], [end.1, end.0]]
        });
        tracing::debug!(?start, ?end, %url, "directions request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            tracing::error!(%status, body = %text, "directions request failed");
            return Err(ClientError::from_response(status.as_u16(), text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl Geocoder for OrsClient {
    fn autocomplete(&self, text: &str, size: usize) -> Result<Vec<PlaceCandidate>, ClientError> {
        let text = text.trim();
        if text.chars().count() < MIN_AUTOCOMPLETE_CHARS {
            return Ok(Vec::new());
        }
        self.search("autocomplete", text, size)
    }

    fn geocode(&self, text: &str) -> Result<Option<PlaceCandidate>, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(self.search("search", text, 1)?.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct PlaceCollection {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    geometry: PointGeometry,
    #[serde(default)]
    properties: PlaceProperties,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceProperties {
    label: Option<String>,
    name: Option<String>,
}

impl PlaceFeature {
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let (lon, lat) = match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return None,
        };
        let label = self
            .properties
            .label
            .filter(|label| !label.is_empty())
            .or(self.properties.name.filter(|name| !name.is_empty()))
            .unwrap_or_else(|| UNLABELED.to_string());

        Some(PlaceCandidate {
            label,
            position: (lat, lon),
        })
    }
}
