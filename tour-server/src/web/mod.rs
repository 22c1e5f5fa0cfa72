//! Web layer for the station and tour server.
//!
//! Provides the JSON endpoints for stations, tours and bicycle routing, and
//! serves the static pages.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
