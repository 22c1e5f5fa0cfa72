//! Routing request and response types.
//!
//! Responses follow the OpenRouteService directions JSON format: each route
//! has an encoded polyline `geometry`, a `summary` with totals, one entry in
//! `segments` per pair of consecutive input waypoints, and `way_points`
//! giving each input waypoint's index into the decoded line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{SegmentData, Waypoint};

use super::error::RoutingError;

/// A validated routing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    /// `[lon, lat]` pairs in travel order
    coordinates: Vec<[f64; 2]>,
    elevation: bool,
}

impl RouteRequest {
    /// Build a request from raw `[lon, lat]` arrays.
    pub fn new(coordinates: &[Vec<f64>], elevation: bool) -> Result<Self, RoutingError> {
        if coordinates.len() < 2 {
            return Err(RoutingError::TooFewCoordinates);
        }

        let coordinates = coordinates
            .iter()
            .map(|c| match c.as_slice() {
                [lon, lat] if lon.is_finite() && lat.is_finite() => Ok([*lon, *lat]),
                _ => Err(RoutingError::InvalidCoordinates),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            coordinates,
            elevation,
        })
    }

    /// Build a request visiting waypoints in order.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Result<Self, RoutingError> {
        let coordinates: Vec<Vec<f64>> = waypoints.iter().map(|w| vec![w.lng, w.lat]).collect();
        Self::new(&coordinates, false)
    }

    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    pub fn elevation(&self) -> bool {
        self.elevation
    }
}

/// Directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct Directions {
    pub routes: Vec<Route>,
}

/// One route in a directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Encoded polyline
    pub geometry: String,

    #[serde(default)]
    pub summary: RouteSummary,

    #[serde(default)]
    pub segments: Vec<RouteSegment>,

    /// Index of each input waypoint in the decoded line
    #[serde(default)]
    pub way_points: Vec<Option<usize>>,
}

/// Route totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RouteSummary {
    /// Meters
    #[serde(default)]
    pub distance: f64,

    /// Seconds
    #[serde(default)]
    pub duration: f64,
}

/// Distance and duration between two consecutive waypoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RouteSegment {
    #[serde(default)]
    pub distance: Option<f64>,

    #[serde(default)]
    pub duration: Option<f64>,
}

impl Route {
    /// Pair each segment with the waypoint indices it runs between.
    ///
    /// Segments with a missing index, distance or duration are dropped.
    pub fn segment_data(&self) -> Vec<SegmentData> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, seg)| {
                let start_idx = (*self.way_points.get(i)?)?;
                let end_idx = (*self.way_points.get(i + 1)?)?;
                let distance = seg.distance.filter(|d| d.is_finite())?;
                let duration = seg.duration.filter(|d| d.is_finite())?;
                Some(SegmentData {
                    start_idx,
                    end_idx,
                    distance,
                    duration,
                })
            })
            .collect()
    }
}

/// A route reduced to what a tour stores.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Encoded polyline
    pub geometry: String,
    pub summary: RouteSummary,
    pub segments: Vec<SegmentData>,
}

/// Extract the first route from a raw directions response.
///
/// Used by interactive clients through `RouteSession`; `/route-bike` passes
/// the response through untouched.
pub fn parse_directions(value: &Value) -> Result<PlannedRoute, RoutingError> {
    let directions: Directions = serde_json::from_value(value.clone())
        .map_err(|e| RoutingError::UnexpectedFormat(e.to_string()))?;

    let route = directions
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::UnexpectedFormat("response has no routes".to_string()))?;

    let segments = route.segment_data();
    Ok(PlannedRoute {
        geometry: route.geometry,
        summary: route.summary,
        segments,
    })
}
