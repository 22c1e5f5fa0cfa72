//! Station types.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::error::ValidationError;
use super::geometry::{LngLat, bbox_center, parse_geojson, single_feature, validate_station_geojson};

/// A stored station.
///
/// `name` is the natural key. `geojson` and `created` never change after
/// insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub geojson: Value,
    pub created: DateTime<Utc>,
}

impl Station {
    /// Bounding-box centre of the station's geometry, used as its waypoint.
    ///
    /// Library API for clients turning a selection into waypoints.
    pub fn center(&self) -> Option<LngLat> {
        let feature = single_feature(&self.geojson).ok()?;
        bbox_center(feature.get("geometry")?)
    }
}

/// A validated station ready to be inserted.
///
/// Any `NewStation` value has a non-blank name and description and a
/// geometry holding exactly one Point or Polygon feature.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    name: String,
    description: String,
    url: Option<String>,
    geojson: Value,
}

impl NewStation {
    /// Validate a station create request.
    ///
    /// `geojson` may be a JSON object or a JSON-encoded string. Name,
    /// description and url are kept exactly as given.
    pub fn new(
        name: &str,
        description: &str,
        url: Option<String>,
        geojson: &Value,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let geojson = parse_geojson(geojson)?;
        validate_station_geojson(&geojson)?;

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            url,
            geojson,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn geojson(&self) -> &Value {
        &self.geojson
    }
}

/// A validated metadata edit for an existing station.
///
/// Inputs are trimmed; an empty url becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationEdit {
    name: String,
    description: String,
    url: Option<String>,
}

impl StationEdit {
    pub fn new(name: &str, description: &str, url: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.trim();
        let description = description.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let url = url.map(str::trim).filter(|u| !u.is_empty()).map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            url,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
