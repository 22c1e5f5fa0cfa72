//! Station selection order for building a tour.
//!
//! Library API for interactive clients that assemble a tour from picked
//! stations; the HTTP handlers receive finished waypoint lists instead.

use std::collections::HashMap;

use super::station::Station;
use super::tour::Waypoint;

/// The order in which stations were picked for a tour.
///
/// Selecting a station appends it; selecting it again moves it to the end;
/// deselecting removes it. Names are never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOrder {
    names: Vec<String>,
}

impl SelectionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a checkbox change for `name`.
    pub fn toggle(&mut self, name: &str, selected: bool) {
        self.names.retain(|n| n != name);
        if selected {
            self.names.push(name.to_string());
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Turn the selection into waypoints at each station's bounding-box centre.
    ///
    /// Names that no longer resolve to a station, or whose geometry has no
    /// centre, are skipped.
    pub fn waypoints(&self, stations: &[Station]) -> Vec<Waypoint> {
        let by_name: HashMap<&str, &Station> =
            stations.iter().map(|s| (s.name.as_str(), s)).collect();

        self.names
            .iter()
            .filter_map(|name| {
                let center = by_name.get(name.as_str())?.center()?;
                Some(Waypoint {
                    lat: center.lat,
                    lng: center.lng,
                    station_name: Some(name.clone()),
                })
            })
            .collect()
    }
}
