//! GeoJSON handling for station payloads.
//!
//! Stations carry either a single `Feature` or a `FeatureCollection` holding
//! exactly one feature, and the geometry must be a `Point` or a `Polygon`.
//! Payloads stay as `serde_json::Value` so that whatever the client sent is
//! stored and returned unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Geometry types accepted for stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationGeometryKind {
    Point,
    Polygon,
}

/// Accept a geojson payload sent either as a JSON value or as a
/// JSON-encoded string.
pub fn parse_geojson(raw: &Value) -> Result<Value, ValidationError> {
    match raw {
        Value::Null => Err(ValidationError::MissingField("geojson")),
        Value::String(s) if s.trim().is_empty() => Err(ValidationError::MissingField("geojson")),
        Value::String(s) => {
            serde_json::from_str(s).map_err(|e| ValidationError::MalformedGeoJson(e.to_string()))
        }
        other => Ok(other.clone()),
    }
}

/// Return the only feature of a `Feature` or one-element `FeatureCollection`.
pub fn single_feature(geojson: &Value) -> Result<&Value, ValidationError> {
    match geojson.get("type").and_then(Value::as_str) {
        Some("Feature") => Ok(geojson),
        Some("FeatureCollection") => {
            let features = geojson
                .get("features")
                .and_then(Value::as_array)
                .ok_or(ValidationError::InvalidGeoJson(
                    "FeatureCollection has no features array",
                ))?;
            match features.as_slice() {
                [feature] => Ok(feature),
                _ => Err(ValidationError::FeatureCount(features.len())),
            }
        }
        _ => Err(ValidationError::InvalidGeoJson(
            "expected a Feature or FeatureCollection",
        )),
    }
}

/// Check that a payload is a valid station geometry.
pub fn validate_station_geojson(geojson: &Value) -> Result<StationGeometryKind, ValidationError> {
    let feature = single_feature(geojson)?;
    let geometry = feature
        .get("geometry")
        .filter(|g| !g.is_null())
        .ok_or(ValidationError::InvalidGeoJson("feature has no geometry"))?;

    let kind = match geometry.get("type").and_then(Value::as_str) {
        Some("Point") => StationGeometryKind::Point,
        Some("Polygon") => StationGeometryKind::Polygon,
        Some(other) => return Err(ValidationError::UnsupportedGeometry(other.to_string())),
        None => return Err(ValidationError::InvalidGeoJson("geometry has no type")),
    };

    let coordinates = geometry
        .get("coordinates")
        .ok_or(ValidationError::InvalidGeoJson("geometry has no coordinates"))?;

    let well_formed = match kind {
        StationGeometryKind::Point => is_position(coordinates),
        StationGeometryKind::Polygon => is_polygon(coordinates),
    };
    if !well_formed {
        return Err(ValidationError::InvalidGeoJson(match kind {
            StationGeometryKind::Point => "Point coordinates must be one numeric position",
            StationGeometryKind::Polygon => {
                "Polygon coordinates must be rings of numeric positions"
            }
        }));
    }

    Ok(kind)
}

/// `[lng, lat]` with an optional altitude, all numbers.
fn is_position(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| (2..=3).contains(&items.len()) && items.iter().all(Value::is_number))
}

/// A non-empty array of non-empty rings, every vertex a position.
fn is_polygon(value: &Value) -> bool {
    let Some(rings) = value.as_array().filter(|r| !r.is_empty()) else {
        return false;
    };
    rings.iter().all(|ring| {
        ring.as_array()
            .is_some_and(|vertices| !vertices.is_empty() && vertices.iter().all(is_position))
    })
}

/// Centre of the axis-aligned bounding box over every position of a geometry.
///
/// Returns `None` if the geometry has no positions.
pub fn bbox_center(geometry: &Value) -> Option<LngLat> {
    let mut positions = Vec::new();
    collect_positions(geometry.get("coordinates")?, &mut positions);

    let mut iter = positions.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(min, max), p| {
        (
            LngLat {
                lng: min.lng.min(p.lng),
                lat: min.lat.min(p.lat),
            },
            LngLat {
                lng: max.lng.max(p.lng),
                lat: max.lat.max(p.lat),
            },
        )
    });

    Some(LngLat {
        lng: (min.lng + max.lng) / 2.0,
        lat: (min.lat + max.lat) / 2.0,
    })
}

/// Walk nested coordinate arrays. A position is an array whose first two
/// entries are numbers; anything deeper is recursed into.
fn collect_positions(value: &Value, out: &mut Vec<LngLat>) {
    let Some(items) = value.as_array() else {
        return;
    };

    match (
        items.first().and_then(Value::as_f64),
        items.get(1).and_then(Value::as_f64),
    ) {
        (Some(lng), Some(lat)) => out.push(LngLat { lng, lat }),
        _ => {
            for item in items {
                collect_positions(item, out);
            }
        }
    }
}
