//! Routing gateway trait.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RoutingError;
use super::types::RouteRequest;

/// Something that turns an ordered coordinate list into a route.
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait RoutingGateway: Send + Sync {
    /// Request a route, returning the provider's JSON response unchanged.
    async fn route(&self, request: &RouteRequest) -> Result<Value, RoutingError>;
}
