//! OpenRouteService HTTP client.
//!
//! Requests bicycle routes from the ORS directions API. The API key is sent
//! in the `Authorization` header of every request.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use super::error::RoutingError;
use super::gateway::RoutingGateway;
use super::types::RouteRequest;

/// Default base URL for the ORS API.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "cycling-regular";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the ORS client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrsConfig {
    /// API key for the Authorization header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile, e.g. `cycling-regular`
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Directions endpoint for the configured profile.
    pub fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.base_url.trim_end_matches('/'),
            self.profile
        )
    }
}

/// ORS directions client.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    directions_url: String,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, RoutingError> {
        let mut headers = HeaderMap::new();

        if !config.api_key.is_empty() {
            let api_key = HeaderValue::from_str(&config.api_key)
                .map_err(|_| RoutingError::Configuration("invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RoutingError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            directions_url: config.directions_url(),
        })
    }
}

#[async_trait]
impl RoutingGateway for OrsClient {
    async fn route(&self, request: &RouteRequest) -> Result<Value, RoutingError> {
        let response = self
            .http
            .post(&self.directions_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "routing provider error");
            return Err(RoutingError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "routing provider returned invalid JSON");
            RoutingError::UnexpectedFormat(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OrsConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "cycling-regular");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(
            config.directions_url(),
            "https://api.openrouteservice.org/v2/directions/cycling-regular"
        );
    }

    #[test]
    fn config_builders() {
        let config = OrsConfig::new("key")
            .with_base_url("http://localhost:8080/")
            .with_profile("cycling-road")
            .with_timeout(5);
        assert_eq!(
            config.directions_url(),
            "http://localhost:8080/v2/directions/cycling-road"
        );
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_unprintable_api_key() {
        let err = OrsClient::new(OrsConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, RoutingError::Configuration(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        // Nothing listens on the discard port
        let config = OrsConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = OrsClient::new(config).unwrap();
        let request = RouteRequest::new(&[vec![10.0, 50.0], vec![11.0, 51.0]], false).unwrap();

        let err = client.route(&request).await.unwrap_err();
        assert!(matches!(err, RoutingError::GatewayUnavailable(_)));
    }

    /// Serve a fake directions endpoint on an ephemeral port.
    async fn fake_provider(status: axum::http::StatusCode, body: &'static str) -> OrsClient {
        use axum::{Router, routing::post};

        let app = Router::new().route(
            "/v2/directions/cycling-regular",
            post(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = OrsConfig::new("key").with_base_url(format!("http://{addr}"));
        OrsClient::new(config).unwrap()
    }

    fn request() -> RouteRequest {
        RouteRequest::new(&[vec![10.0, 50.0], vec![11.0, 51.0]], false).unwrap()
    }

    #[tokio::test]
    async fn passes_through_success_body() {
        let client = fake_provider(
            axum::http::StatusCode::OK,
            r#"{"routes":[{"geometry":"abc","way_points":[0,1]}]}"#,
        )
        .await;

        let value = client.route(&request()).await.unwrap();
        assert_eq!(value["routes"][0]["geometry"], "abc");
    }

    #[tokio::test]
    async fn upstream_status_is_propagated() {
        let client = fake_provider(axum::http::StatusCode::FORBIDDEN, "quota exceeded").await;

        let err = client.route(&request()).await.unwrap_err();
        match err {
            RoutingError::Upstream { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_unexpected_format() {
        let client = fake_provider(axum::http::StatusCode::OK, "<html>maintenance</html>").await;

        let err = client.route(&request()).await.unwrap_err();
        assert!(matches!(err, RoutingError::UnexpectedFormat(_)));
    }
}
