//! Routing gateway error types.

/// Errors from a routing request.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Fewer than two coordinates were given
    #[error("at least two coordinates are required")]
    TooFewCoordinates,

    /// A coordinate is not a finite `[lon, lat]` pair
    #[error("coordinates must be [[lon, lat], ...] with finite values")]
    InvalidCoordinates,

    /// The provider answered with an error status
    #[error("routing provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The provider's response did not have the expected shape
    #[error("unexpected routing response format: {0}")]
    UnexpectedFormat(String),

    /// Network failure or timeout talking to the provider
    #[error("routing provider unavailable: {0}")]
    GatewayUnavailable(#[from] reqwest::Error),

    /// The client could not be built from its configuration
    #[error("invalid routing configuration: {0}")]
    Configuration(String),
}
