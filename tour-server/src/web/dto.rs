//! Data transfer objects for web requests and responses.
//!
//! Request fields are optional where the handler reports a missing value
//! itself, so that a missing field yields a 400 with a useful message
//! rather than a JSON rejection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Station, Tour, Waypoint};

/// Request to create a station.
#[derive(Debug, Deserialize)]
pub struct SaveStationRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Optional reference link
    #[serde(default)]
    pub url: Option<String>,

    /// GeoJSON object, or a string containing one
    #[serde(default)]
    pub geojson: Value,
}

/// Response for a created station.
#[derive(Debug, Serialize)]
pub struct SaveStationResponse {
    pub message: String,

    /// Row id of the new station
    pub id: i64,
}

/// Request naming a single station or tour.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to edit a station's metadata.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditStationRequest {
    #[serde(default)]
    pub old_name: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// A station in list results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub geojson: Value,
}

/// Request to create a tour.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTourRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Waypoints in travel order
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,

    #[serde(default)]
    pub route_geojson: Option<Value>,
}

/// Request to edit a tour.
///
/// Clients send the tour's waypoints and route along with the new name;
/// those are ignored because stored geometry never changes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTourRequest {
    #[serde(default)]
    pub old_name: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A tour in list results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourResult {
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub route_geojson: Value,
}

/// Request for a bicycle route.
#[derive(Debug, Deserialize)]
pub struct RouteBikeRequest {
    /// `[lon, lat]` pairs
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,

    #[serde(default)]
    pub elevation: bool,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Success flag used by the tour endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<Station> for StationResult {
    fn from(station: Station) -> Self {
        Self {
            name: station.name,
            description: station.description,
            url: station.url,
            geojson: station.geojson,
        }
    }
}

impl From<Tour> for TourResult {
    fn from(tour: Tour) -> Self {
        Self {
            name: tour.name,
            description: tour.description,
            waypoints: tour.waypoints,
            route_geojson: tour.route_geojson,
        }
    }
}
