//! Station and tour planning server.
//!
//! Stores named points of interest ("stations") and named multi-stop
//! bicycle tours, and proxies route requests to OpenRouteService.

pub mod config;
pub mod domain;
pub mod routing;
pub mod store;
pub mod web;
