use super::request::parse_plan_request;
use crate::application::{PlanPathUseCase, SERVICE_NAME, SERVICE_VERSION};
use crate::common::ApplicationError;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<dyn PlanPathUseCase>,
    pub favicon_url: String,
}

impl AppState {
    pub fn new(planner: Arc<dyn PlanPathUseCase>, favicon_url: impl Into<String>) -> Self {
        Self {
            planner,
            favicon_url: favicon_url.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/plan-path", post(plan_path))
        .route("/favicon.ico", get(favicon))
        .with_state(state)
}

/// Resolves when `signal` fires. A signal listener that fails to install is
/// logged and the server then keeps running until killed.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for the shutdown signal, graceful shutdown disabled: {}", e);
        std::future::pending::<()>().await;
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PlanResponse {
    Success { length: f64, path: geojson::Geometry },
    Error { message: String },
}

#[derive(Debug, Serialize)]
struct Endpoints {
    root: &'static str,
    plan_path: &'static str,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    status: &'static str,
    endpoints: Endpoints,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        // Validation problems are reported in-band, like a successful call.
        let status = match self {
            ApplicationError::Request(_) => StatusCode::OK,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = PlanResponse::Error {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        version: SERVICE_VERSION,
        status: "success",
        endpoints: Endpoints {
            root: "/",
            plan_path: "/plan-path",
        },
    })
}

async fn favicon(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.favicon_url)
}

async fn plan_path(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<PlanResponse>, ApplicationError> {
    let request_id = Uuid::new_v4();
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!(%request_id, %client, "plan-path request received");

    let request = parse_plan_request(&body).map_err(|e| {
        warn!(%request_id, error = %e, "plan-path request rejected");
        ApplicationError::from(e)
    })?;

    match state.planner.plan_path(request).await {
        Ok(planned) => {
            info!(%request_id, waypoints = planned.path.size(), length = planned.length, "plan-path succeeded");
            Ok(Json(PlanResponse::Success {
                length: planned.length,
                path: planned.path.to_line_string(),
            }))
        }
        Err(e) => {
            warn!(%request_id, error = %e, "plan-path failed");
            Err(e)
        }
    }
}
