//! HTTP route handlers.

use std::path::Path;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::domain::{NewStation, NewTour, StationEdit, TourEdit, ValidationError};
use crate::routing::{RouteRequest, RoutingError};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Largest accepted request body. Station and tour geometry can be large.
const BODY_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// Static pages served under friendly paths.
const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/touren", "tour_administration.html"),
    ("/stationen", "station_administration.html"),
    ("/impressum", "impressum.html"),
    ("/datenschutz", "datenschutz.html"),
];

/// Create the application router.
///
/// `public_dir` is the directory holding the static pages and assets.
pub fn create_router(state: AppState, public_dir: &Path) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/save-station", post(save_station))
        .route("/get-stations", get(get_stations))
        .route("/delete-station", post(delete_station))
        .route("/edit-station", post(edit_station))
        .route("/save-tour", post(save_tour))
        .route("/get-tours", get(get_tours))
        .route("/delete-tour", post(delete_tour))
        .route("/edit-tour", post(edit_tour))
        .route("/route-bike", post(route_bike));

    for (path, file) in PAGES {
        router = router.route_service(path, ServeFile::new(public_dir.join(file)));
    }

    router
        .fallback_service(ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, reporting failures as 400.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Extract a required, non-blank name field.
fn required_name(name: Option<String>, what: &str) -> Result<String, AppError> {
    name.filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("No {what} given."),
        })
}

/// Create a station.
async fn save_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let req: SaveStationRequest = parse_body(&body)?;

    let station = NewStation::new(
        req.name.as_deref().unwrap_or_default(),
        req.description.as_deref().unwrap_or_default(),
        req.url,
        &req.geojson,
    )?;

    let id = state.stations.create(&station).await?;
    tracing::info!(name = station.name(), id, "station saved");

    Ok((
        StatusCode::CREATED,
        Json(SaveStationResponse {
            message: "Station saved".to_string(),
            id,
        }),
    ))
}

/// List all stations.
async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<StationResult>>, AppError> {
    let stations = state.stations.list().await?;
    Ok(Json(stations.into_iter().map(StationResult::from).collect()))
}

/// Delete a station by name.
async fn delete_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let req: NameRequest = parse_body(&body)?;
    let name = required_name(req.name, "station")?;

    state.stations.delete(&name).await?;
    tracing::info!(name = %name, "station deleted");

    Ok(Json(MessageResponse {
        message: "Station deleted".to_string(),
    }))
}

/// Edit a station's name, description and url.
async fn edit_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let req: EditStationRequest = parse_body(&body)?;
    let old_name = required_name(req.old_name, "station")?;

    let edit = StationEdit::new(
        req.name.as_deref().unwrap_or_default(),
        req.description.as_deref().unwrap_or_default(),
        req.url.as_deref(),
    )?;

    state.stations.edit(&old_name, &edit).await?;
    tracing::info!(old_name = %old_name, new_name = edit.name(), "station edited");

    Ok(Json(MessageResponse {
        message: "Station updated".to_string(),
    }))
}

/// Create a tour.
async fn save_tour(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: SaveTourRequest = parse_body(&body)?;

    let tour = NewTour::new(
        req.name.as_deref().unwrap_or_default(),
        req.description,
        req.waypoints,
        req.route_geojson,
    )?;

    state.tours.create(&tour).await?;
    tracing::info!(name = tour.name(), waypoints = tour.waypoints().len(), "tour saved");

    Ok(Json(SuccessResponse::ok()))
}

/// List all tours with their geometry.
async fn get_tours(State(state): State<AppState>) -> Result<Json<Vec<TourResult>>, AppError> {
    let tours = state.tours.list().await?;
    Ok(Json(tours.into_iter().map(TourResult::from).collect()))
}

/// Delete a tour by name. Deleting a missing tour still succeeds.
async fn delete_tour(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: NameRequest = parse_body(&body)?;
    let name = required_name(req.name, "tour")?;

    let removed = state.tours.delete(&name).await?;
    tracing::info!(name = %name, removed, "tour delete");

    Ok(Json(SuccessResponse::ok()))
}

/// Edit a tour's name and description.
async fn edit_tour(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: EditTourRequest = parse_body(&body)?;
    let old_name = required_name(req.old_name, "tour")?;

    let edit = TourEdit::new(
        req.name.as_deref().unwrap_or_default(),
        req.description.as_deref(),
    )?;

    state.tours.edit(&old_name, &edit).await?;
    tracing::info!(old_name = %old_name, new_name = edit.name(), "tour edited");

    Ok(Json(SuccessResponse::ok()))
}

/// Proxy a bicycle route request to the routing provider.
async fn route_bike(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    let req: RouteBikeRequest = parse_body(&body)?;
    let request = RouteRequest::new(&req.coordinates, req.elevation)?;

    let response = state.routing.route(&request).await?;
    Ok(Json(response))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    /// Error status passed through from the routing provider
    Upstream { status: StatusCode, message: String },
    BadGateway { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            StoreError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::Corrupt { .. } | StoreError::Database(_) => {
                // Keep internals out of the response
                tracing::error!(error = %e, "store failure");
                AppError::Internal {
                    message: "Storage error".to_string(),
                }
            }
        }
    }
}

impl From<RoutingError> for AppError {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::TooFewCoordinates | RoutingError::InvalidCoordinates => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            RoutingError::Upstream { status, .. } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: "Routing request failed".to_string(),
            },
            RoutingError::UnexpectedFormat(_) => {
                tracing::error!(error = %e, "routing failure");
                AppError::BadGateway {
                    message: "Unexpected response from routing provider".to_string(),
                }
            }
            RoutingError::GatewayUnavailable(_) => {
                tracing::error!(error = %e, "routing failure");
                AppError::Unavailable {
                    message: "Routing provider unavailable".to_string(),
                }
            }
            RoutingError::Configuration(_) => {
                tracing::error!(error = %e, "routing failure");
                AppError::Internal {
                    message: "Internal server error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Upstream { status, message } => (status, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        // Server errors were logged with their cause on conversion
        if !status.is_server_error() {
            tracing::warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
