//! Domain types for stations and tours.
//!
//! Incoming data is validated when these types are constructed, so the
//! store and web layers can trust any `NewStation` or `NewTour` they hold.

mod error;
mod geometry;
mod selection;
mod station;
mod tour;

pub use error::ValidationError;
pub use geometry::{
    LngLat, StationGeometryKind, bbox_center, parse_geojson, single_feature,
    validate_station_geojson,
};
pub use selection::SelectionOrder;
pub use station::{NewStation, Station, StationEdit};
pub use tour::{
    NewTour, SegmentData, Tour, TourEdit, Waypoint, segment_data, segments_are_contiguous,
};
