//! Route table and handlers
//!
//! Builds the axum router over the shared application state and wires the
//! middleware pipeline around it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use crate::auth::{AuthClient, Credentials};
use crate::database::Database;
use crate::identity::IdentityService;
use crate::models::{AuthRequest, AuthResponse, EventsResponse, IdentityResponse};
use crate::server::middleware::{
    auth_gate_middleware, logging_middleware, recovery_middleware, request_id_middleware,
    GateState, RequestId,
};

/// Shared application state
pub struct AppState<D: Database> {
    /// Auth client facade used by the gate and the token-bound handlers
    pub auth_client: Arc<AuthClient>,

    /// Credentials the authorization gate accepts
    pub gate_credentials: Credentials,

    /// Identity business logic
    pub identity: Arc<IdentityService<D>>,

    /// Database capability for the event listing
    pub database: Arc<D>,
}

impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            auth_client: Arc::clone(&self.auth_client),
            gate_credentials: self.gate_credentials.clone(),
            identity: Arc::clone(&self.identity),
            database: Arc::clone(&self.database),
        }
    }
}

/// Build the application router with the full middleware pipeline
///
/// Layer order matters: the last layer added is the outermost. Recovery sits
/// directly around the handlers, then the authorization gate, then logging,
/// with request-id assignment outermost so every stage sees the id.
pub fn build_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let gate = GateState::new(
        Arc::clone(&state.auth_client),
        state.gate_credentials.clone(),
    );

    Router::new()
        .route("/", get(list_events::<D>))
        .route("/identity/:id", get(fetch_identity::<D>))
        .route("/identity", post(create_identity::<D>))
        .route("/auth", post(authenticate::<D>))
        .layer(middleware::from_fn(recovery_middleware))
        .layer(middleware::from_fn_with_state(gate, auth_gate_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// JSON error response for handler failures
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Log the underlying failure and answer with an opaque 500
    fn internal(request_id: &RequestId, context: &str, err: impl std::fmt::Display) -> Self {
        error!(request_id = %request_id, context = context, error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal error".to_string(),
        }
    }

    fn bad_request(request_id: &RequestId, message: &str) -> Self {
        info!(request_id = %request_id, reason = message, "request rejected");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn unauthorized(request_id: &RequestId, message: &str) -> Self {
        info!(request_id = %request_id, reason = message, "request rejected");
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }

    fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// GET / : list all recorded events
async fn list_events<D: Database>(
    State(state): State<AppState<D>>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<EventsResponse>, ApiError> {
    let list = state
        .database
        .list_events()
        .await
        .map_err(|e| ApiError::internal(&request_id, "event listing", e))?;

    Ok(Json(EventsResponse { code: 200, list }))
}

/// GET /identity/:id : fetch one identity row
async fn fetch_identity<D: Database>(
    State(state): State<AppState<D>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<IdentityResponse>, ApiError> {
    let identity = state
        .identity
        .fetch(&id)
        .await
        .map_err(|e| ApiError::internal(&request_id, "identity fetch", e))?
        .ok_or_else(|| ApiError::not_found("identity not found"))?;

    Ok(Json(IdentityResponse {
        status: 200,
        identity,
    }))
}

/// POST /identity : create a new identity row
///
/// Requires a valid token in the `token` header on top of the basic-auth
/// gate the whole router sits behind.
async fn create_identity<D: Database>(
    State(state): State<AppState<D>>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<IdentityResponse>, ApiError> {
    match state.auth_client.validate_token_header(&headers) {
        Ok(true) => {}
        Ok(false) => {
            return Err(ApiError::unauthorized(
                &request_id,
                "missing or expired token",
            ))
        }
        Err(err) => {
            info!(request_id = %request_id, error = %err, "token rejected");
            return Err(ApiError::unauthorized(&request_id, "invalid token"));
        }
    }

    let identity = state
        .identity
        .create()
        .await
        .map_err(|e| ApiError::internal(&request_id, "identity create", e))?;

    Ok(Json(IdentityResponse {
        status: 200,
        identity,
    }))
}

/// POST /auth : exchange an id and password for a signed token
async fn authenticate<D: Database>(
    State(state): State<AppState<D>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.id.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request(
            &request_id,
            "id and password are required",
        ));
    }

    let mut claims = std::collections::HashMap::new();
    claims.insert("email".to_string(), json!(request.id));

    let token = state
        .auth_client
        .generate_token(&claims)
        .map_err(|e| ApiError::internal(&request_id, "token generation", e))?;

    Ok(Json(AuthResponse {
        status: 200,
        id: request.id,
        token,
    }))
}
