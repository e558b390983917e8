use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::domain::model::{GuestRecord, RsvpSubmission};
use crate::domain::services::RsvpService;
use crate::utils::error::{Result, RsvpError};

/// Query string of `GET /`. A repeated `guest` parameter resolves to its
/// first occurrence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuestQuery {
    pub guest: Option<String>,
}

impl GuestQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let guest = pairs
            .into_iter()
            .find(|(key, _)| key == "guest")
            .map(|(_, value)| value);
        Self { guest }
    }
}

/// JSON envelope used by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            guest: None,
            error: None,
        }
    }

    pub fn with_guest(guest: GuestRecord) -> Self {
        Self {
            guest: Some(guest),
            ..Self::ok()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            guest: None,
            error: Some(message.into()),
        }
    }
}

fn status_code(error: &RsvpError) -> StatusCode {
    match error {
        RsvpError::MissingGuestId
        | RsvpError::ValidationError { .. }
        | RsvpError::SerializationError(_) => StatusCode::BAD_REQUEST,
        RsvpError::GuestNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RsvpError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if self.is_client_error() {
            debug!(code = %status.as_u16(), "request rejected: {}", self);
        } else {
            warn!(code = %status.as_u16(), "request failed: {}", self);
        }
        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

async fn guest_handler(
    State(service): State<RsvpService>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ApiResponse>> {
    let Query(pairs) = params.map_err(|rejection| RsvpError::ValidationError {
        message: rejection.body_text(),
    })?;
    let query = GuestQuery::from_pairs(pairs);

    let guest = service.get_guest(query.guest.as_deref()).await?;
    Ok(Json(ApiResponse::with_guest(guest)))
}

async fn submit_handler(
    State(service): State<RsvpService>,
    payload: std::result::Result<Json<RsvpSubmission>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(submission) = payload.map_err(|rejection| RsvpError::ValidationError {
        message: rejection.body_text(),
    })?;

    let receipt = service.submit(&submission).await?;
    info!(
        guest = submission.guest_id().unwrap_or("-"),
        partner = receipt.partner.is_some(),
        "RSVP stored"
    );
    Ok(Json(ApiResponse::ok()))
}

pub fn router(service: RsvpService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(guest_handler).post(submit_handler))
        .layer(cors)
        .with_state(service)
}

/// Serves the RSVP endpoint on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, service: RsvpService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!("🚀 RSVP endpoint listening on {}", address);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
