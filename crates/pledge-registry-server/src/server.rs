// crates/pledge-registry-server/src/server.rs
// ============================================================================
// Module: Pledge HTTP Server
// Description: axum routes for pledge submission, count, and admin listing.
// Purpose: Map the submission service onto JSON HTTP endpoints.
// Dependencies: pledge-registry-core, pledge-registry-config, axum, tokio
// ============================================================================

//! ## Overview
//! Every endpoint answers with the same envelope:
//! `{"success": bool, "message": string, "data": object}`. Status codes
//! mirror the failure taxonomy so clients may key off either the code or
//! `success`.
//!
//! Store work is synchronous, so handlers run it on the blocking pool. The
//! method is checked before the body is read, and the rate-limit ledger is
//! only consulted after the body passes the size limit.
//! Proxy headers are ignored unless `server.trust_proxy_headers` is set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::any;
use pledge_registry_config::PledgeRegistryConfig;
use pledge_registry_config::RateLimitBackend;
use pledge_registry_core::INVALID_METHOD_MESSAGE;
use pledge_registry_core::InMemoryRateLimitStore;
use pledge_registry_core::Pledge;
use pledge_registry_core::PledgeStats;
use pledge_registry_core::PledgeStore;
use pledge_registry_core::RateLimiter;
use pledge_registry_core::SharedClock;
use pledge_registry_core::SharedPledgeStore;
use pledge_registry_core::SharedRateLimitStore;
use pledge_registry_core::SubmissionError;
use pledge_registry_core::SubmissionForm;
use pledge_registry_core::SubmissionReceipt;
use pledge_registry_core::SubmissionRequest;
use pledge_registry_core::SubmissionResult;
use pledge_registry_core::SubmissionService;
use pledge_registry_core::SystemClock;
use pledge_registry_core::count_pledges;
use pledge_registry_store_sqlite::FileRateLimitStore;
use pledge_registry_store_sqlite::SqlitePledgeStore;
use serde::Serialize;
use serde_json::Map;

use crate::audit::AdminAccessEvent;
use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::InternalErrorEvent;
use crate::audit::LifecycleEvent;
use crate::audit::NoopAuditSink;
use crate::audit::PledgeRequestEvent;
use crate::audit::PledgeRequestEventParams;
use crate::audit::RequestOutcome;
use crate::audit::StderrAuditSink;
use crate::auth::AdminCredentials;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Submission route.
pub const SUBMIT_PATH: &str = "/api/pledges";
/// Legacy submission route.
pub const LEGACY_SUBMIT_PATH: &str = "/process_pledge";
/// Count route.
pub const COUNT_PATH: &str = "/api/pledges/count";
/// Legacy count route.
pub const LEGACY_COUNT_PATH: &str = "/get_pledge_count";
/// Admin dashboard route.
pub const ADMIN_PATH: &str = "/admin/pledges";
/// Message for oversized request bodies.
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";
/// Message when the count handler itself fails.
pub const COUNT_FAILED_MESSAGE: &str = "An error occurred while retrieving pledge count";
/// Message when the admin dashboard is disabled.
const ADMIN_DISABLED_MESSAGE: &str = "Not found";
/// Message for admin authentication failures.
const ADMIN_UNAUTHORIZED_MESSAGE: &str = "Authentication required";
/// Client address used when none can be resolved.
const UNKNOWN_CLIENT: &str = "unknown";
/// Allowed headers announced to browsers.
const CORS_ALLOW_HEADERS: &str = "Content-Type";
/// Proxy header carrying the original client chain.
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
/// Proxy header carrying the original client address.
const REAL_IP_HEADER: &str = "x-real-ip";

// ============================================================================
// SECTION: Pledge Server
// ============================================================================

/// Pledge HTTP server instance.
pub struct PledgeServer {
    /// Validated configuration.
    config: PledgeRegistryConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl PledgeServer {
    /// Builds a server from configuration with `SQLite` and ledger backends.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration or initialization fails.
    pub fn from_config(config: PledgeRegistryConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let pledges = SqlitePledgeStore::new(config.store.sqlite_config())
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let audit = build_audit_sink(&config)?;
        let limiter = build_rate_limiter(&config, &audit)?;
        let clock: SharedClock = Arc::new(SystemClock);
        let service =
            SubmissionService::new(SharedPledgeStore::from_store(pledges), limiter, clock);
        Self::with_service(config, service, audit)
    }

    /// Builds a server around an existing submission service.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid.
    pub fn with_service(
        config: PledgeRegistryConfig,
        service: SubmissionService,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let cors_allow_origin = HeaderValue::from_str(config.server.cors_allow_origin.trim())
            .map_err(|_| ServerError::Config("invalid server.cors_allow_origin".to_string()))?;
        emit_posture_warnings(&config, audit.as_ref());
        let state = Arc::new(ServerState {
            service,
            admin: config.admin.as_ref().map(AdminCredentials::from_config),
            audit,
            max_body_bytes: config.server.max_body_bytes,
            cors_allow_origin,
            trust_proxy_headers: config.server.trust_proxy_headers,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the configured axum router.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        self.serve_listener(listener, shutdown_signal()).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when serving fails or the stores fail to close.
    pub async fn serve_listener<F>(
        self,
        listener: tokio::net::TcpListener,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|err| ServerError::Transport(format!("http listener failed: {err}")))?;
        let started = LifecycleEvent::new("started", Some(format!("listening on {local}")));
        self.state.audit.record_lifecycle(&started);
        let app = self.router();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))?;
        self.state.audit.record_lifecycle(&LifecycleEvent::new("stopped", None));
        self.state.service.close().map_err(|err| ServerError::Init(err.to_string()))
    }
}

/// Builds the rate limiter from configuration.
///
/// File ledger resets are recorded as internal errors on `audit`.
fn build_rate_limiter(
    config: &PledgeRegistryConfig,
    audit: &Arc<dyn AuditSink>,
) -> Result<RateLimiter, ServerError> {
    let policy = config.rate_limit.policy().map_err(|err| ServerError::Config(err.to_string()))?;
    let store = match config.rate_limit.backend {
        RateLimitBackend::Memory => SharedRateLimitStore::from_store(InMemoryRateLimitStore::new()),
        RateLimitBackend::File => {
            let path = config.rate_limit.ledger_path().ok_or_else(|| {
                ServerError::Config("file rate_limit backend requires path".to_string())
            })?;
            let audit = Arc::clone(audit);
            let store = FileRateLimitStore::new(path)
                .map_err(|err| ServerError::Init(err.to_string()))?
                .with_reset_hook(Arc::new(move |reason: &str| {
                    let event = InternalErrorEvent::new("submit", "ledger_reset", reason);
                    audit.record_internal_error(&event);
                }));
            SharedRateLimitStore::from_store(store)
        }
    };
    Ok(RateLimiter::new(policy, store))
}

/// Builds the audit sink from configuration.
fn build_audit_sink(config: &PledgeRegistryConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    let audit = &config.server.audit;
    if !audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(std::path::Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Records warnings for risky but valid deployments.
fn emit_posture_warnings(config: &PledgeRegistryConfig, audit: &dyn AuditSink) {
    if config.server.trust_proxy_headers {
        audit.record_lifecycle(&LifecycleEvent::new(
            "warning",
            Some(
                "trusting X-Forwarded-For/X-Real-IP; clients can spoof addresses unless a proxy \
                 overwrites them"
                    .to_string(),
            ),
        ));
    }
    if config.rate_limit.backend == RateLimitBackend::Memory {
        audit.record_lifecycle(&LifecycleEvent::new(
            "warning",
            Some("memory rate_limit backend resets on restart".to_string()),
        ));
    }
    let loopback = config.server.bind_addr().is_ok_and(|addr| addr.ip().is_loopback());
    if config.admin.is_some() && !loopback {
        audit.record_lifecycle(&LifecycleEvent::new(
            "warning",
            Some(
                "admin dashboard uses basic auth; terminate TLS in front of this server"
                    .to_string(),
            ),
        ));
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Shared server state for HTTP handlers.
pub(crate) struct ServerState {
    /// Submission pipeline and its stores.
    service: SubmissionService,
    /// Admin credentials; `None` disables the dashboard.
    admin: Option<AdminCredentials>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
    /// Maximum accepted body size.
    max_body_bytes: usize,
    /// `Access-Control-Allow-Origin` value.
    cors_allow_origin: HeaderValue,
    /// Honor proxy address headers.
    trust_proxy_headers: bool,
}

/// Builds the router for the given state.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(SUBMIT_PATH, any(handle_submit))
        .route(LEGACY_SUBMIT_PATH, any(handle_submit))
        .route(COUNT_PATH, any(handle_count))
        .route(LEGACY_COUNT_PATH, any(handle_count))
        .route(ADMIN_PATH, any(handle_admin))
        .with_state(state)
}

/// JSON response envelope.
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded.
    success: bool,
    /// Client-safe message.
    message: String,
    /// Endpoint payload.
    data: T,
}

/// Count endpoint payload.
#[derive(Debug, Serialize)]
struct CountData {
    /// Stored pledge count.
    count: u64,
}

/// Admin dashboard payload.
#[derive(Debug, Serialize)]
struct AdminDashboard {
    /// Aggregate counts.
    stats: PledgeStats,
    /// Pledges, newest first.
    pledges: Vec<AdminPledgeView>,
}

/// Pledge row as shown on the admin dashboard.
#[derive(Debug, Serialize)]
struct AdminPledgeView {
    /// Row identifier.
    id: i64,
    /// Escaped company name.
    company_name: String,
    /// Escaped contact name.
    contact_name: String,
    /// Normalized email.
    email: String,
    /// Escaped title.
    title: String,
    /// Website URL.
    website: String,
    /// Submitting client address.
    ip_address: String,
    /// Creation time (RFC 3339, UTC).
    created_at: String,
}

impl From<Pledge> for AdminPledgeView {
    fn from(pledge: Pledge) -> Self {
        Self {
            id: pledge.id.get(),
            created_at: pledge.created_at.to_rfc3339(),
            company_name: pledge.company_name,
            contact_name: pledge.contact_name,
            email: pledge.email,
            title: pledge.title,
            website: pledge.website,
            ip_address: pledge.ip_address,
        }
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles pledge submissions.
async fn handle_submit(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let client = resolve_client_address(
        &parts.headers,
        peer_address(&parts.extensions),
        state.trust_proxy_headers,
    );
    let methods = "POST";
    if parts.method == Method::OPTIONS {
        record_request(&state, "submit", &parts.method, client, StatusCode::NO_CONTENT, None);
        return preflight_response(&state, methods);
    }
    if parts.method != Method::POST {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        record_request(&state, "submit", &parts.method, client, status, Some("invalid_method"));
        return api_response(&state, methods, status, false, INVALID_METHOD_MESSAGE, Map::new());
    }
    let Ok(bytes) = axum::body::to_bytes(body, state.max_body_bytes).await else {
        let status = StatusCode::PAYLOAD_TOO_LARGE;
        record_request(&state, "submit", &parts.method, client, status, Some("body_too_large"));
        return api_response(&state, methods, status, false, BODY_TOO_LARGE_MESSAGE, Map::new());
    };
    let form = SubmissionForm::from_urlencoded(&bytes);
    let method = parts.method.as_str().to_string();
    let address = client.clone();
    let outcome = run_blocking(&state, move |state| {
        state.service.submit(&SubmissionRequest {
            method: &method,
            form: &form,
            client_address: &address,
        })
    })
    .await
    .unwrap_or_else(|err| Err(SubmissionError::InternalError(err.to_string())));
    let status = submission_status(&outcome);
    let error_kind = outcome.as_ref().err().map(SubmissionError::kind);
    if let Err(err) = &outcome
        && err.is_internal()
    {
        let event = InternalErrorEvent::new("submit", err.kind(), err.to_string());
        state.audit.record_internal_error(&event);
    }
    record_request(&state, "submit", &parts.method, client, status, error_kind);
    let result = SubmissionResult::from_outcome(&outcome);
    api_response(&state, methods, status, result.success, &result.message, Map::new())
}

/// Handles the public pledge count.
async fn handle_count(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let client = resolve_client_address(
        &parts.headers,
        peer_address(&parts.extensions),
        state.trust_proxy_headers,
    );
    let methods = "GET";
    if parts.method == Method::OPTIONS {
        record_request(&state, "count", &parts.method, client, StatusCode::NO_CONTENT, None);
        return preflight_response(&state, methods);
    }
    if parts.method != Method::GET {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        record_request(&state, "count", &parts.method, client, status, Some("invalid_method"));
        return api_response(&state, methods, status, false, INVALID_METHOD_MESSAGE, Map::new());
    }
    let counted = run_blocking(&state, |state| {
        count_pledges(state.service.pledges(), |err| {
            let event = InternalErrorEvent::new("count", "store", err.to_string());
            state.audit.record_internal_error(&event);
        })
    })
    .await;
    match counted {
        Ok(count) => {
            record_request(&state, "count", &parts.method, client, StatusCode::OK, None);
            api_response(&state, methods, StatusCode::OK, true, "", CountData {
                count,
            })
        }
        Err(err) => {
            let event = InternalErrorEvent::new("count", "internal", err.to_string());
            state.audit.record_internal_error(&event);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            record_request(&state, "count", &parts.method, client, status, Some("internal_error"));
            api_response(&state, methods, status, false, COUNT_FAILED_MESSAGE, Map::new())
        }
    }
}

/// Handles the admin dashboard listing.
async fn handle_admin(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let client = resolve_client_address(
        &parts.headers,
        peer_address(&parts.extensions),
        state.trust_proxy_headers,
    );
    let Some(admin) = &state.admin else {
        let status = StatusCode::NOT_FOUND;
        record_request(&state, "admin", &parts.method, client, status, Some("admin_disabled"));
        return admin_response(status, false, ADMIN_DISABLED_MESSAGE, Map::new());
    };
    let authorization =
        parts.headers.get(header::AUTHORIZATION).and_then(|value| value.to_str().ok());
    let username = match admin.authorize(authorization) {
        Ok(username) => username,
        Err(err) => {
            state.audit.record_admin(&AdminAccessEvent::denied(
                client.clone(),
                err.attempted_username().map(str::to_string),
                err.to_string(),
            ));
            let status = StatusCode::UNAUTHORIZED;
            record_request(&state, "admin", &parts.method, client, status, Some("unauthorized"));
            let mut response =
                admin_response(status, false, ADMIN_UNAUTHORIZED_MESSAGE, Map::new());
            if let Ok(challenge) = HeaderValue::from_str(&admin.challenge()) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, challenge);
            }
            return response;
        }
    };
    state.audit.record_admin(&AdminAccessEvent::allowed(client.clone(), username));
    if parts.method != Method::GET {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        record_request(&state, "admin", &parts.method, client, status, Some("invalid_method"));
        return admin_response(status, false, INVALID_METHOD_MESSAGE, Map::new());
    }
    let listed = run_blocking(&state, |state| {
        let now = state.service.clock().now();
        state.service.pledges().list_newest_first().map(|pledges| (pledges, now))
    })
    .await;
    let failure = match listed {
        Ok(Ok((pledges, now))) => {
            let dashboard = AdminDashboard {
                stats: PledgeStats::from_pledges(&pledges, now),
                pledges: pledges.into_iter().map(AdminPledgeView::from).collect(),
            };
            record_request(&state, "admin", &parts.method, client, StatusCode::OK, None);
            return admin_response(StatusCode::OK, true, "", dashboard);
        }
        Ok(Err(err)) => err.to_string(),
        Err(err) => err.to_string(),
    };
    state.audit.record_internal_error(&InternalErrorEvent::new("admin", "store", failure));
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    record_request(&state, "admin", &parts.method, client, status, Some("internal_error"));
    let message = SubmissionError::InternalError(String::new()).public_message();
    admin_response(status, false, &message, Map::new())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs synchronous store work on the blocking pool.
async fn run_blocking<T, F>(state: &Arc<ServerState>, work: F) -> Result<T, ServerError>
where
    F: FnOnce(&ServerState) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state))
        .await
        .map_err(|err| ServerError::Internal(format!("blocking task failed: {err}")))
}

/// Maps a submission outcome onto an HTTP status.
const fn submission_status(outcome: &Result<SubmissionReceipt, SubmissionError>) -> StatusCode {
    match outcome {
        Ok(_) => StatusCode::OK,
        Err(SubmissionError::InvalidMethod(_)) => StatusCode::METHOD_NOT_ALLOWED,
        Err(SubmissionError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
        Err(SubmissionError::ValidationFailed(_)) => StatusCode::BAD_REQUEST,
        Err(SubmissionError::DuplicatePledge) => StatusCode::CONFLICT,
        Err(SubmissionError::PersistenceFailed(_) | SubmissionError::InternalError(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Returns the TCP peer recorded by the connect-info layer.
fn peer_address(extensions: &axum::http::Extensions) -> Option<SocketAddr> {
    extensions.get::<ConnectInfo<SocketAddr>>().map(|ConnectInfo(addr)| *addr)
}

/// Resolves the client address from proxy headers or the TCP peer.
pub(crate) fn resolve_client_address(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy_headers: bool,
) -> String {
    if trust_proxy_headers {
        let forwarded = header_text(headers, FORWARDED_FOR_HEADER)
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(address) = forwarded {
            return address.to_string();
        }
        let real_ip =
            header_text(headers, REAL_IP_HEADER).map(str::trim).filter(|value| !value.is_empty());
        if let Some(address) = real_ip {
            return address.to_string();
        }
    }
    peer.map_or_else(|| UNKNOWN_CLIENT.to_string(), |addr| addr.ip().to_string())
}

/// Returns a header value as text when it is valid visible ASCII.
fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Records one request audit event.
fn record_request(
    state: &ServerState,
    route: &'static str,
    method: &Method,
    client_address: String,
    status: StatusCode,
    error_kind: Option<&'static str>,
) {
    let outcome = if status == StatusCode::NO_CONTENT {
        RequestOutcome::Preflight
    } else if status.is_success() {
        RequestOutcome::Success
    } else if status.is_server_error() {
        RequestOutcome::Error
    } else {
        RequestOutcome::Rejected
    };
    state.audit.record(&PledgeRequestEvent::new(PledgeRequestEventParams {
        route,
        method: method.as_str().to_string(),
        client_address,
        outcome,
        error_kind,
        status: status.as_u16(),
    }));
}

/// Builds an enveloped API response with CORS headers.
fn api_response<T: Serialize>(
    state: &ServerState,
    methods: &'static str,
    status: StatusCode,
    success: bool,
    message: &str,
    data: T,
) -> Response {
    let mut response = (status, Json(ApiResponse {
        success,
        message: message.to_string(),
        data,
    }))
        .into_response();
    apply_cors_headers(response.headers_mut(), state, methods);
    response
}

/// Builds the empty preflight response.
fn preflight_response(state: &ServerState, methods: &'static str) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors_headers(response.headers_mut(), state, methods);
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Builds an enveloped admin response that is never cached.
fn admin_response<T: Serialize>(
    status: StatusCode,
    success: bool,
    message: &str,
    data: T,
) -> Response {
    let mut response = (status, Json(ApiResponse {
        success,
        message: message.to_string(),
        data,
    }))
        .into_response();
    response.headers_mut().insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Applies the CORS headers shared by public endpoints.
fn apply_cors_headers(headers: &mut HeaderMap, state: &ServerState, methods: &'static str) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, state.cors_allow_origin.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
    headers
        .insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOW_HEADERS));
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pledge server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
    /// Internal task errors.
    #[error("internal error: {0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
