//! Application state for the web layer.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::routing::RoutingGateway;
use crate::store::{StationRepository, TourRepository};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stations collection
    pub stations: StationRepository,

    /// Tours collection
    pub tours: TourRepository,

    /// Routing provider for `/route-bike`
    pub routing: Arc<dyn RoutingGateway>,
}

impl AppState {
    /// Create a new app state over one database pool.
    pub fn new(pool: SqlitePool, routing: impl RoutingGateway + 'static) -> Self {
        Self {
            stations: StationRepository::new(pool.clone()),
            tours: TourRepository::new(pool),
            routing: Arc::new(routing),
        }
    }
}
