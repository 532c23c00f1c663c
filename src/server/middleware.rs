//! HTTP middleware for identity-gateway
//!
//! This module provides the ordered request pipeline:
//! - Request-ID assignment (correlation id in request extensions)
//! - Access logging (incoming event plus completion summary)
//! - Authorization gate (basic-auth check against the configured pair)
//! - Panic recovery (downstream faults become opaque 500s)

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use futures::FutureExt;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::{AuthClient, Credentials};
use crate::error::AuthError;

/// Per-request correlation id carried in request extensions
///
/// Assigned once by the request-id stage and read-only thereafter.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a fresh correlation id: UUID plus a nanosecond timestamp
    pub fn generate() -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self(format!("{}-{}", Uuid::new_v4(), nanos))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-ID middleware
///
/// Stamps a fresh correlation id into the request extensions and always
/// forwards. Must run before the logging and auth stages, which read it.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(RequestId::generate());
    next.run(request).await
}

/// Access-logging middleware
///
/// Records an incoming event before forwarding and a completion summary
/// with status, byte count, and elapsed duration afterwards. Recovered
/// panics reach this stage as ordinary 500 responses.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(RequestId::generate);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "incoming request"
    );

    let response = next.run(request).await;

    let size_bytes = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    info!(
        request_id = %request_id,
        status = %response.status().as_u16(),
        size_bytes = %size_bytes,
        duration_ms = %start.elapsed().as_millis(),
        "request completed"
    );

    response
}

/// State for the authorization gate
#[derive(Clone)]
pub struct GateState {
    /// The process-wide auth client facade
    pub client: Arc<AuthClient>,

    /// Credentials every request must present
    pub expected: Credentials,
}

impl GateState {
    /// Create gate state from the auth client and the configured pair
    pub fn new(client: Arc<AuthClient>, expected: Credentials) -> Self {
        Self { client, expected }
    }
}

/// Authorization gate middleware
///
/// Forwards only when the request carries the configured basic-auth pair;
/// otherwise short-circuits with a 401 challenge. Downstream stages and the
/// route handler never execute on rejection.
pub async fn auth_gate_middleware(
    State(gate): State<GateState>,
    request: Request,
    next: Next,
) -> Result<Response, GateResponse> {
    match check_credentials(&gate, request.headers()) {
        Ok(()) => Ok(next.run(request).await),
        Err(err) => {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.clone())
                .unwrap_or_default();
            info!(request_id = %request_id, error = %err, "authorization denied");
            Err(GateResponse::unauthorized())
        }
    }
}

fn check_credentials(gate: &GateState, headers: &HeaderMap) -> Result<(), AuthError> {
    let credentials = gate
        .client
        .authorize(headers)
        .ok_or(AuthError::MissingCredentials)?;
    if credentials == gate.expected {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

/// Gate rejection response: 401 with a basic-auth challenge
pub struct GateResponse {
    status: StatusCode,
}

impl GateResponse {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for GateResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::WWW_AUTHENTICATE, "Basic realm=Restricted")],
            "Unauthorized",
        )
            .into_response()
    }
}

/// Panic-recovery middleware
///
/// Wraps the downstream call in a recovery boundary: a panic anywhere below
/// (including the route handler) is logged once, with the correlation id and
/// a captured backtrace, and converted to an opaque 500. This stage sits
/// directly around the handler; the other stages wrap it.
pub async fn recovery_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let backtrace = std::backtrace::Backtrace::force_capture();
            error!(
                request_id = %request_id,
                panic = %panic_detail(&panic),
                stack = %backtrace,
                "recovered from panic"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn panic_detail(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
