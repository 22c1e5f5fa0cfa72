//! Tour types.
//!
//! A tour is an ordered list of waypoints plus the route geometry computed
//! for them at creation time. The geometry is a LineString feature whose
//! `properties.segmentData` splits the line into one segment per pair of
//! consecutive waypoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;

/// One stop in a tour.
///
/// `station_name` is a soft reference: it is never checked against the
/// stations collection and may dangle after a station is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub station_name: Option<String>,
}

/// Distance and duration of the route between two consecutive waypoints.
///
/// `start_idx` and `end_idx` index into the route's coordinate array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentData {
    pub start_idx: usize,
    pub end_idx: usize,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

/// A stored tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub name: String,
    pub description: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub route_geojson: Value,
    pub created: DateTime<Utc>,
}

impl Tour {
    /// Per-segment data from the stored route.
    pub fn segments(&self) -> Vec<SegmentData> {
        segment_data(&self.route_geojson)
    }
}

/// Read `properties.segmentData` from a route feature.
///
/// Missing or malformed data yields no segments; individual malformed
/// entries are skipped.
pub fn segment_data(route_geojson: &Value) -> Vec<SegmentData> {
    route_geojson
        .pointer("/properties/segmentData")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Whether each segment ends where the next one starts.
pub fn segments_are_contiguous(segments: &[SegmentData]) -> bool {
    segments.windows(2).all(|w| w[0].end_idx == w[1].start_idx)
}

/// A validated tour ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTour {
    name: String,
    description: Option<String>,
    waypoints: Vec<Waypoint>,
    route_geojson: Value,
}

impl NewTour {
    /// Validate a tour create request.
    ///
    /// Requires a non-blank name, at least one waypoint and a LineString
    /// route feature. Segment data is not checked.
    pub fn new(
        name: &str,
        description: Option<String>,
        waypoints: Vec<Waypoint>,
        route_geojson: Option<Value>,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if waypoints.is_empty() {
            return Err(ValidationError::NoWaypoints);
        }

        let route_geojson = route_geojson
            .filter(|r| !r.is_null())
            .ok_or(ValidationError::MissingField("routeGeojson"))?;

        let is_line_feature = route_geojson.get("type").and_then(Value::as_str) == Some("Feature")
            && route_geojson.pointer("/geometry/type").and_then(Value::as_str)
                == Some("LineString");
        if !is_line_feature {
            return Err(ValidationError::InvalidRoute);
        }

        Ok(Self {
            name: name.to_string(),
            description: normalize_description(description.as_deref()),
            waypoints,
            route_geojson,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn route_geojson(&self) -> &Value {
        &self.route_geojson
    }
}

/// Trimmed description, with a blank one stored as absent.
fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// A validated metadata edit for an existing tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourEdit {
    name: String,
    description: Option<String>,
}

impl TourEdit {
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        Ok(Self {
            name: name.to_string(),
            description: normalize_description(description),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
