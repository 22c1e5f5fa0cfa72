//! Interactive routing session.
//!
//! Library API for interactive clients. `/route-bike` itself is a plain
//! single-request proxy and does not use a session.
//!
//! While a user edits a tour, every change of the selection triggers a new
//! route request. Only the most recent request's result counts: a response
//! that arrives after a newer request was started is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Waypoint;

use super::error::RoutingError;
use super::gateway::RoutingGateway;
use super::types::{PlannedRoute, RouteRequest, parse_directions};

/// A sequence of route requests where newer requests supersede older ones.
#[derive(Clone)]
pub struct RouteSession {
    gateway: Arc<dyn RoutingGateway>,
    latest: Arc<AtomicU64>,
}

impl RouteSession {
    pub fn new(gateway: Arc<dyn RoutingGateway>) -> Self {
        Self {
            gateway,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Route through `waypoints` in order.
    ///
    /// Returns `Ok(None)` if another request was started on this session
    /// before this one finished; errors of superseded requests are dropped
    /// as well.
    pub async fn plan(&self, waypoints: &[Waypoint]) -> Result<Option<PlannedRoute>, RoutingError> {
        let request = RouteRequest::from_waypoints(waypoints)?;
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.gateway.route(&request).await;

        if self.latest.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding superseded route");
            return Ok(None);
        }

        parse_directions(&result?).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn directions() -> Value {
        json!({
            "routes": [{
                "geometry": "abc",
                "summary": { "distance": 1000.0, "duration": 120.0 },
                "segments": [{ "distance": 1000.0, "duration": 120.0 }],
                "way_points": [0, 7]
            }]
        })
    }

    fn waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint {
                lat: 50.0,
                lng: 10.0,
                station_name: Some("A".into()),
            },
            Waypoint {
                lat: 51.0,
                lng: 11.0,
                station_name: None,
            },
        ]
    }

    /// Holds the first request until released; later requests answer at once.
    #[derive(Default)]
    struct GatedGateway {
        calls: AtomicUsize,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl RoutingGateway for GatedGateway {
        async fn route(&self, _request: &RouteRequest) -> Result<Value, RoutingError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.started.notify_one();
                self.release.notified().await;
            }
            Ok(directions())
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl RoutingGateway for FailingGateway {
        async fn route(&self, _request: &RouteRequest) -> Result<Value, RoutingError> {
            Err(RoutingError::Upstream {
                status: 500,
                message: "boom".into(),
            })
        }
    }

    #[tokio::test]
    async fn single_request_returns_route() {
        let session = RouteSession::new(Arc::new(GatedGateway {
            calls: AtomicUsize::new(1),
            ..Default::default()
        }));

        let route = session.plan(&waypoints()).await.unwrap().unwrap();
        assert_eq!(route.geometry, "abc");
        assert_eq!(route.segments.len(), 1);
        assert_eq!(route.segments[0].end_idx, 7);
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let gateway = Arc::new(GatedGateway::default());
        let session = RouteSession::new(gateway.clone());

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.plan(&waypoints()).await }
        });
        gateway.started.notified().await;

        let second = session.plan(&waypoints()).await.unwrap();
        assert!(second.is_some());

        gateway.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(first.is_none());
    }

    #[tokio::test]
    async fn errors_surface_for_latest_request() {
        let session = RouteSession::new(Arc::new(FailingGateway));
        let err = session.plan(&waypoints()).await.unwrap_err();
        assert!(matches!(err, RoutingError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn too_few_waypoints_fail_fast() {
        let session = RouteSession::new(Arc::new(FailingGateway));
        let err = session.plan(&waypoints()[..1]).await.unwrap_err();
        assert!(matches!(err, RoutingError::TooFewCoordinates));
    }
}
