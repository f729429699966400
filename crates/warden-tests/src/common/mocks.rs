// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! An in-process mock of the console API, served by axum on an ephemeral
//! port.
//!
//! ## Design Principles
//!
//! - Seeded from [`fixtures`](super::fixtures) so tests share credentials
//! - Every request is recorded for verification
//! - Tokens can be revoked to simulate expiry

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use super::fixtures::{Account, AccountFixtures, RoleFixtures, RoleRow, SCANNER_ID, SEEDED_SCANS};

type ApiResponse = (StatusCode, Json<Value>);

// =============================================================================
// Recorded Requests
// =============================================================================

/// A request as the mock API saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Path without the query.
    pub path: String,
    /// Raw query string.
    pub query: Option<String>,
    /// `Authorization` header.
    pub authorization: Option<String>,
    /// `X-Request-ID` header.
    pub request_id: Option<String>,
}

// =============================================================================
// Mock State
// =============================================================================

/// A scan row.
#[derive(Debug, Clone)]
pub struct ScanRow {
    /// Row ID.
    pub id: i64,
    /// Owner.
    pub user_id: i64,
    /// `success` or `failed`.
    pub status: &'static str,
}

/// Shared state of the mock API.
#[derive(Debug)]
pub struct MockState {
    accounts: Mutex<Vec<Account>>,
    roles: Mutex<Vec<RoleRow>>,
    scans: Mutex<Vec<ScanRow>>,
    tokens: Mutex<HashMap<String, i64>>,
    requests: Mutex<Vec<RecordedRequest>>,
    bare_errors: AtomicBool,
    token_counter: AtomicU64,
}

impl MockState {
    fn seeded() -> Self {
        let scans = (1..=SEEDED_SCANS as i64)
            .map(|id| ScanRow {
                id,
                user_id: SCANNER_ID,
                status: if id % 3 == 0 { "failed" } else { "success" },
            })
            .collect();

        Self {
            accounts: Mutex::new(AccountFixtures::seed()),
            roles: Mutex::new(RoleFixtures::seed()),
            scans: Mutex::new(scans),
            tokens: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            bare_errors: AtomicBool::new(false),
            token_counter: AtomicU64::new(0),
        }
    }

    fn error(&self, status: StatusCode, message: &str) -> ApiResponse {
        if self.bare_errors.load(Ordering::SeqCst) {
            return (status, Json(json!({})));
        }
        (status, Json(json!({ "success": false, "message": message })))
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<Account, ApiResponse> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let user_id = token.and_then(|t| self.tokens.lock().get(t).copied());
        user_id
            .and_then(|id| self.accounts.lock().iter().find(|a| a.id == id).cloned())
            .ok_or_else(|| self.error(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }

    fn issue_token(&self, account: &Account) -> String {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst);
        let token = format!("token-{}-{}", account.id, n);
        self.tokens.lock().insert(token.clone(), account.id);
        token
    }
}

fn profile_json(account: &Account) -> Value {
    json!({
        "id": account.id,
        "firstName": account.first_name,
        "lastName": account.last_name,
        "email": account.email,
        "role": account.role,
    })
}

fn scan_json(scan: &ScanRow) -> Value {
    json!({
        "id": scan.id,
        "deliveryNo": format!("D-{:05}", scan.id),
        "documentType": "invoice",
        "status": scan.status,
        "sapMessage": if scan.status == "failed" { json!("Document rejected") } else { Value::Null },
        "createdAt": "2025-03-01T10:00:00Z",
    })
}

fn str_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

// =============================================================================
// Handlers
// =============================================================================

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> ApiResponse {
    let email = str_field(&body, "email").unwrap_or_default();
    let password = str_field(&body, "password").unwrap_or_default();

    let account = state
        .accounts
        .lock()
        .iter()
        .find(|a| a.email == email && a.password == password)
        .cloned();
    let Some(account) = account else {
        return state.error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    };

    let token = state.issue_token(&account);
    let permissions: Vec<Value> = account
        .permissions
        .iter()
        .map(|key| {
            let (main, sub) = key.split_once('.').unwrap_or((key.as_str(), ""));
            json!({ "key": key, "mainTag": main, "subTag": sub })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "status": 200,
            "message": "Login successful",
            "token": token,
            "user": { "id": account.id, "email": account.email, "role": account.role },
            "permissions": permissions,
        })),
    )
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let email = str_field(&body, "email").unwrap_or_default().to_string();
    let role_id = body.get("roleId").and_then(Value::as_i64);
    let role = role_id.and_then(|id| state.roles.lock().iter().find(|r| r.id == id).cloned());
    let Some(role) = role else {
        return state.error(StatusCode::BAD_REQUEST, "Invalid role");
    };

    let mut accounts = state.accounts.lock();
    if accounts.iter().any(|a| a.email == email) {
        return state.error(StatusCode::CONFLICT, "Email already exists");
    }
    let id = accounts.iter().map(|a| a.id).max().unwrap_or_default() + 1;
    accounts.push(Account {
        id,
        first_name: str_field(&body, "firstName").unwrap_or_default().to_string(),
        last_name: str_field(&body, "lastName").unwrap_or_default().to_string(),
        email,
        password: str_field(&body, "password").unwrap_or_default().to_string(),
        role: role.key.unwrap_or(role.name),
        role_id: role.id,
        permissions: Vec::new(),
    });

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "User registered successfully" })),
    )
}

async fn update_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    let caller = match state.authorize(&headers) {
        Ok(account) => account,
        Err(e) => return e,
    };

    let mut accounts = state.accounts.lock();
    let Some(account) = accounts.iter_mut().find(|a| a.id == caller.id) else {
        return state.error(StatusCode::NOT_FOUND, "User not found");
    };
    if let Some(v) = str_field(&body, "firstName") {
        account.first_name = v.to_string();
    }
    if let Some(v) = str_field(&body, "lastName") {
        account.last_name = v.to_string();
    }
    if let Some(v) = str_field(&body, "email") {
        account.email = v.to_string();
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Profile updated", "user": profile_json(account) })),
    )
}

async fn admin_update_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let user_id = body.get("userId").and_then(Value::as_i64);
    let mut accounts = state.accounts.lock();
    let Some(account) = accounts.iter_mut().find(|a| Some(a.id) == user_id) else {
        return state.error(StatusCode::NOT_FOUND, "User not found");
    };
    account.first_name = str_field(&body, "firstName").unwrap_or_default().to_string();
    account.last_name = str_field(&body, "lastName").unwrap_or_default().to_string();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "User updated", "user": profile_json(account) })),
    )
}

async fn admin_reset_password(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let user_id = body.get("userId").and_then(Value::as_i64);
    let Some(password) = str_field(&body, "newPassword").filter(|p| p.len() >= 6) else {
        return state.error(StatusCode::BAD_REQUEST, "Password must be at least 6 characters");
    };
    let mut accounts = state.accounts.lock();
    let Some(account) = accounts.iter_mut().find(|a| Some(a.id) == user_id) else {
        return state.error(StatusCode::NOT_FOUND, "User not found");
    };
    account.password = password.to_string();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Password reset successfully" })),
    )
}

async fn roles(State(state): State<Arc<MockState>>, headers: HeaderMap) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }
    let roles: Vec<Value> = state
        .roles
        .lock()
        .iter()
        .map(|r| json!({ "id": r.id, "name": r.name, "key": r.key }))
        .collect();
    (StatusCode::OK, Json(json!({ "roles": roles })))
}

async fn logs(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let entries = [
        ("l1", "User admin@example.com logged in", "info"),
        ("l2", "Document D-00003 rejected", "error"),
        ("l3", "User viewer@example.com logged in", "info"),
    ];
    let search = query.get("search").map(|s| s.to_lowercase());
    let logs: Vec<Value> = entries
        .iter()
        .filter(|(_, message, _)| {
            search
                .as_deref()
                .map_or(true, |s| message.to_lowercase().contains(s))
        })
        .map(|(id, message, level)| {
            json!({
                "id": id,
                "message": message,
                "timestamp": "2025-03-01T10:00:00Z",
                "level": level,
                "source": "api",
            })
        })
        .collect();
    let total = logs.len();
    (StatusCode::OK, Json(json!({ "logs": logs, "total": total })))
}

async fn users_with_scans(State(state): State<Arc<MockState>>, headers: HeaderMap) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let scans = state.scans.lock();
    let users: Vec<Value> = state
        .accounts
        .lock()
        .iter()
        .map(|a| {
            let own: Vec<_> = scans.iter().filter(|s| s.user_id == a.id).collect();
            let success = own.iter().filter(|s| s.status == "success").count();
            json!({
                "id": a.id,
                "firstName": a.first_name,
                "lastName": a.last_name,
                "email": a.email,
                "totalDocuments": own.len(),
                "successCount": success,
                "failedCount": own.len() - success,
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "success": true, "users": users })))
}

async fn scans(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }

    let param = |name: &str| query.get(name).and_then(|v| v.parse::<i64>().ok());
    let Some(user_id) = param("userId") else {
        return state.error(StatusCode::BAD_REQUEST, "userId is required");
    };
    let limit = param("limit").unwrap_or(20).max(1) as usize;
    let offset = param("offset").unwrap_or(0).max(0) as usize;
    let status = query.get("status").cloned();

    let matching: Vec<ScanRow> = state
        .scans
        .lock()
        .iter()
        .filter(|s| s.user_id == user_id)
        .filter(|s| status.as_deref().map_or(true, |st| s.status == st))
        .cloned()
        .collect();
    let logs: Vec<Value> = matching.iter().skip(offset).take(limit).map(scan_json).collect();

    (
        StatusCode::OK,
        Json(json!({
            "logs": logs,
            "pagination": { "total": matching.len(), "limit": limit, "offset": offset },
        })),
    )
}

async fn dashboard_stats(State(state): State<Arc<MockState>>, headers: HeaderMap) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }
    (
        StatusCode::OK,
        Json(json!({
            "totalUsers": state.accounts.lock().len(),
            "totalLogs": 3,
            "recentActivity": [
                { "id": "a1", "message": "Document D-00001 submitted", "timestamp": "2025-03-01T10:00:00Z" }
            ],
        })),
    )
}

async fn kpi_users(State(state): State<Arc<MockState>>, headers: HeaderMap) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }
    let count = state.accounts.lock().len();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "status": 200, "message": "ok", "count": count })),
    )
}

async fn kpi_successful_documents(State(state): State<Arc<MockState>>, headers: HeaderMap) -> ApiResponse {
    if let Err(e) = state.authorize(&headers) {
        return e;
    }
    let count = state.scans.lock().iter().filter(|s| s.status == "success").count();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "status": 200, "message": "ok", "count": count })),
    )
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let recorded = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header(AUTHORIZATION.as_str()),
            request_id: header("x-request-id"),
        }
    };
    state.requests.lock().push(recorded);
    next.run(request).await.into_response()
}

// =============================================================================
// Mock API Server
// =============================================================================

/// The mock console API, served until dropped.
#[derive(Debug)]
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockApi {
    /// Starts the mock API on an ephemeral local port.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::seeded());

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/update-profile", put(update_profile))
            .route("/auth/admin/update-profile", put(admin_update_profile))
            .route("/auth/admin/reset-password", post(admin_reset_password))
            .route("/roles", get(roles))
            .route("/logs", get(logs))
            .route("/logs/users-with-scans", get(users_with_scans))
            .route("/logs/scans", get(scans))
            .route("/dashboard/stats", get(dashboard_stats))
            .route("/kpi/users", get(kpi_users))
            .route("/kpi/successful-documents", get(kpi_successful_documents));
        let app = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no local address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, handle }
    }

    /// Returns the base URL to configure clients with.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Returns the requests received for `path` (relative to `/api`).
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{}", path);
        self.requests().into_iter().filter(|r| r.path == full).collect()
    }

    /// Invalidates every issued token, as if they had expired.
    pub fn revoke_all_tokens(&self) {
        self.state.tokens.lock().clear();
    }

    /// Returns `true` if `token` is currently accepted.
    pub fn is_token_live(&self, token: &str) -> bool {
        self.state.tokens.lock().contains_key(token)
    }

    /// Makes every error response an empty `{}` body.
    pub fn use_bare_errors(&self, enabled: bool) {
        self.state.bare_errors.store(enabled, Ordering::SeqCst);
    }

    /// Replaces the role list.
    pub fn set_roles(&self, roles: Vec<RoleRow>) {
        *self.state.roles.lock() = roles;
    }

    /// Returns the account registered under `email`.
    pub fn account(&self, email: &str) -> Option<Account> {
        self.state.accounts.lock().iter().find(|a| a.email == email).cloned()
    }

    /// Returns the emails of all accounts.
    pub fn emails(&self) -> HashSet<String> {
        self.state.accounts.lock().iter().map(|a| a.email.clone()).collect()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
