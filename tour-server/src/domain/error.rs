//! Domain error types.
//!
//! These errors represent validation failures on incoming stations and
//! tours. They are detected before anything touches the store.

/// Validation failures for station and tour payloads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The geojson payload was a string that is not valid JSON
    #[error("geojson is not valid JSON: {0}")]
    MalformedGeoJson(String),

    /// The geojson payload has the wrong shape
    #[error("invalid geojson: {0}")]
    InvalidGeoJson(&'static str),

    /// A station must carry exactly one feature
    #[error("expected exactly one feature, found {0}")]
    FeatureCount(usize),

    /// Stations are points or polygons only
    #[error("unsupported geometry type {0}, expected Point or Polygon")]
    UnsupportedGeometry(String),

    /// Tour routes must be a single LineString feature
    #[error("route geometry must be a LineString feature")]
    InvalidRoute,

    /// Tours need a non-empty ordered waypoint list
    #[error("tour needs at least one waypoint")]
    NoWaypoints,
}
