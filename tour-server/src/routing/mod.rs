//! Routing gateway.
//!
//! Converts an ordered list of coordinates into a bicycle route using an
//! external provider (OpenRouteService). Calls are single-shot: failures are
//! surfaced to the caller and never retried.

mod client;
mod error;
mod gateway;
mod session;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, OrsClient, OrsConfig};
pub use error::RoutingError;
pub use gateway::RoutingGateway;
pub use session::RouteSession;
pub use types::{
    Directions, PlannedRoute, Route, RouteRequest, RouteSegment, RouteSummary, parse_directions,
};
