// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request and response bodies of the console API.
//!
//! All bodies use camelCase on the wire.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{Credential, Identity, Permission, PermissionSet, UserId};

/// Scan-log page size used by the console.
pub const SCAN_PAGE_SIZE: u32 = 20;

// =============================================================================
// Auth
// =============================================================================

/// `POST /auth/login` body.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `POST /auth/login` success body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Success flag.
    #[serde(default)]
    pub success: bool,
    /// Echoed status.
    #[serde(default)]
    pub status: u16,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Bearer credential.
    pub token: Credential,
    /// Authenticated identity.
    pub user: Identity,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

impl AuthResponse {
    /// Returns the permission set, empty when the server sent none.
    pub fn permission_set(&self) -> PermissionSet {
        self.permissions.clone().map(PermissionSet::from).unwrap_or_default()
    }
}

/// `POST /auth/register` body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Assigned role.
    pub role_id: i64,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// A response that carries a message and nothing the console reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// Success flag, when sent.
    #[serde(default)]
    pub success: Option<bool>,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}

/// `PUT /auth/update-profile` body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// `PUT /auth/admin/update-profile` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateProfileRequest {
    /// Target user.
    pub user_id: UserId,
    /// New first name.
    pub first_name: String,
    /// New last name.
    pub last_name: String,
}

/// `POST /auth/admin/reset-password` body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResetPasswordRequest {
    /// Target user.
    pub user_id: UserId,
    /// New password.
    pub new_password: String,
}

impl fmt::Debug for AdminResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminResetPasswordRequest")
            .field("user_id", &self.user_id)
            .field("new_password", &"***")
            .finish()
    }
}

/// Profile as returned by the profile endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    /// User ID.
    #[serde(default)]
    pub id: Option<UserId>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email.
    #[serde(default)]
    pub email: Option<String>,
    /// Role label.
    #[serde(default)]
    pub role: Option<String>,
}

/// Response of the profile endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// Success flag.
    #[serde(default)]
    pub success: bool,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Updated profile.
    #[serde(default)]
    pub user: Option<ProfileUser>,
}

// =============================================================================
// Roles
// =============================================================================

/// A role as listed by `GET /roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Stable key.
    #[serde(default)]
    pub key: Option<String>,
}

impl Role {
    /// Returns `true` for the super-administrator role.
    ///
    /// The key is compared when present, the name otherwise.
    pub fn is_super_admin(&self) -> bool {
        let label = self.key.as_deref().unwrap_or(&self.name).to_lowercase();
        label == "superadmin" || label == "super_admin"
    }
}

/// `GET /roles` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolesResponse {
    /// All roles.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl RolesResponse {
    /// Returns the roles an operator may assign at registration.
    pub fn assignable(&self) -> Vec<Role> {
        self.roles.iter().filter(|r| !r.is_super_admin()).cloned().collect()
    }
}

// =============================================================================
// Logs
// =============================================================================

/// `GET /logs` query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogsQuery {
    /// 1-based page.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Free-text search.
    pub search: Option<String>,
}

impl LogsQuery {
    /// Returns the query as URL parameters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

/// A generic log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry ID.
    pub id: serde_json::Value,
    /// Log message.
    #[serde(default)]
    pub message: String,
    /// Timestamp as sent by the server.
    #[serde(default)]
    pub timestamp: String,
    /// Severity.
    #[serde(default)]
    pub level: Option<String>,
    /// Any other fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// `GET /logs` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsResponse {
    /// Entries on this page.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Total entries.
    #[serde(default)]
    pub total: u64,
}

/// A user with scan totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithScans {
    /// User ID.
    pub id: UserId,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Documents submitted.
    #[serde(default)]
    pub total_documents: u64,
    /// Successful submissions.
    #[serde(default)]
    pub success_count: u64,
    /// Failed submissions.
    #[serde(default)]
    pub failed_count: u64,
}

impl UserWithScans {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// `GET /logs/users-with-scans` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersWithScansResponse {
    /// Success flag.
    #[serde(default)]
    pub success: bool,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Users.
    #[serde(default)]
    pub users: Vec<UserWithScans>,
}

/// Outcome of a document scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Accepted downstream.
    Success,
    /// Rejected downstream.
    Failed,
}

impl ScanStatus {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Success => "success",
            ScanStatus::Failed => "failed",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "success" => Some(ScanStatus::Success),
            "failed" => Some(ScanStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /logs/scans` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScansQuery {
    /// Whose scans.
    pub user_id: UserId,
    /// Status filter.
    pub status: Option<ScanStatus>,
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl ScansQuery {
    /// Creates the first-page query for `user_id`.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            status: None,
            limit: SCAN_PAGE_SIZE,
            offset: 0,
        }
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: Option<ScanStatus>) -> Self {
        self.status = status;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the query as URL parameters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("userId", self.user_id.to_string())];
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

/// A single scan-log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLog {
    /// Row ID.
    pub id: i64,
    /// Delivery number.
    #[serde(default)]
    pub delivery_no: Option<String>,
    /// Document type.
    #[serde(default)]
    pub document_type: Option<String>,
    /// Outcome.
    pub status: ScanStatus,
    /// Downstream message.
    #[serde(default)]
    pub sap_message: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Pagination block of `GET /logs/scans`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total rows.
    pub total: u64,
    /// Page size.
    pub limit: u32,
    /// Rows skipped.
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            limit: SCAN_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// `GET /logs/scans` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanLogsResponse {
    /// Rows on this page.
    #[serde(default)]
    pub logs: Vec<ScanLog>,
    /// Pagination, when sent.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One page of scan logs with navigation arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage {
    /// Rows on this page.
    pub logs: Vec<ScanLog>,
    /// Total rows.
    pub total: u64,
    /// Rows skipped.
    pub offset: u32,
}

impl ScanPage {
    /// Builds a page from a response requested at `offset`.
    pub fn from_response(response: ScanLogsResponse, offset: u32) -> Self {
        let pagination = response.pagination.unwrap_or_default();
        Self {
            logs: response.logs,
            total: pagination.total,
            offset,
        }
    }

    /// Returns `ceil(total / page size)`.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(SCAN_PAGE_SIZE))
    }

    /// Returns the 1-based page number.
    pub fn current_page(&self) -> u32 {
        self.offset / SCAN_PAGE_SIZE + 1
    }

    /// Returns the offset of the previous page, if any.
    pub fn prev_offset(&self) -> Option<u32> {
        (self.offset > 0).then(|| self.offset.saturating_sub(SCAN_PAGE_SIZE))
    }

    /// Returns the offset of the next page, if any.
    pub fn next_offset(&self) -> Option<u32> {
        let next = self.offset.checked_add(SCAN_PAGE_SIZE)?;
        (u64::from(next) < self.total).then_some(next)
    }

    /// Returns `true` if the result spans more than one page.
    pub fn is_paginated(&self) -> bool {
        self.total > u64::from(SCAN_PAGE_SIZE)
    }

    /// Returns the 1-based row range shown, e.g. `(21, 40)`.
    pub fn showing(&self) -> (u64, u64) {
        let offset = u64::from(self.offset);
        let first = offset + 1;
        let last = offset.saturating_add(u64::from(SCAN_PAGE_SIZE)).min(self.total);
        (first, last)
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// A recent activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Entry ID.
    pub id: String,
    /// Description.
    pub message: String,
    /// Timestamp as sent by the server.
    pub timestamp: String,
}

/// `GET /dashboard/stats` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Registered users.
    #[serde(default)]
    pub total_users: Option<u64>,
    /// Stored log entries.
    #[serde(default)]
    pub total_logs: Option<u64>,
    /// Latest activity.
    #[serde(default)]
    pub recent_activity: Vec<Activity>,
}

/// Body of the KPI counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiResponse {
    /// Success flag.
    #[serde(default)]
    pub success: bool,
    /// Echoed status.
    #[serde(default)]
    pub status: u16,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// The counter.
    #[serde(default)]
    pub count: u64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_decode() {
        let raw = r#"{
            "success": true,
            "status": 200,
            "message": "Login successful",
            "token": "abc.def",
            "user": {"id": 3, "email": "a@b.com", "role": "admin"},
            "permissions": [{"key": "log.scan_log", "mainTag": "log", "subTag": "scan"}]
        }"#;
        let response: AuthResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.token.as_str(), "abc.def");
        assert_eq!(response.user.role, "admin");
        assert!(response.permission_set().contains("log.scan_log"));
    }

    #[test]
    fn test_auth_response_without_permissions() {
        let raw = r#"{"token":"t","user":{"id":1,"email":"a@b.com","role":"user"}}"#;
        let response: AuthResponse = serde_json::from_str(raw).unwrap();
        assert!(response.permission_set().is_empty());
    }

    #[test]
    fn test_auth_response_rejects_empty_token() {
        let raw = r#"{"token":"","user":{"id":1,"email":"a@b.com","role":"user"}}"#;
        assert!(serde_json::from_str::<AuthResponse>(raw).is_err());
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            role_id: 2,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["roleId"], 2);
        assert!(!format!("{request:?}").contains("secret"));
    }

    #[test]
    fn test_update_profile_skips_absent_fields() {
        let request = UpdateProfileRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"email":"new@example.com"}"#
        );
        assert!(UpdateProfileRequest::default().is_empty());
    }

    #[test]
    fn test_super_admin_roles() {
        let role = |name: &str, key: Option<&str>| Role {
            id: 1,
            name: name.to_string(),
            key: key.map(str::to_string),
        };
        assert!(role("SuperAdmin", None).is_super_admin());
        assert!(role("Anything", Some("SUPER_ADMIN")).is_super_admin());
        assert!(!role("superadmin", Some("admin")).is_super_admin());
        assert!(!role("Admin", None).is_super_admin());

        let roles = RolesResponse {
            roles: vec![role("superAdmin", None), role("Admin", Some("admin"))],
        };
        let assignable = roles.assignable();
        assert_eq!(assignable.len(), 1);
        assert_eq!(assignable[0].name, "Admin");
    }

    #[test]
    fn test_scans_query_params() {
        let params = ScansQuery::new(5)
            .with_status(Some(ScanStatus::Failed))
            .with_offset(40)
            .to_params();
        assert_eq!(
            params,
            vec![
                ("userId", "5".to_string()),
                ("status", "failed".to_string()),
                ("limit", "20".to_string()),
                ("offset", "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_logs_query_params() {
        assert!(LogsQuery::default().to_params().is_empty());
        let query = LogsQuery {
            page: Some(2),
            limit: None,
            search: Some("error".to_string()),
        };
        assert_eq!(
            query.to_params(),
            vec![("page", "2".to_string()), ("search", "error".to_string())]
        );
    }

    #[test]
    fn test_scan_page_arithmetic() {
        let page = ScanPage {
            logs: Vec::new(),
            total: 45,
            offset: 20,
        };
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.prev_offset(), Some(0));
        assert_eq!(page.next_offset(), Some(40));
        assert_eq!(page.showing(), (21, 40));
        assert!(page.is_paginated());

        let last = ScanPage { offset: 40, ..page };
        assert_eq!(last.next_offset(), None);
        assert_eq!(last.showing(), (41, 45));
    }

    #[test]
    fn test_scan_page_near_offset_limit() {
        let page = ScanPage {
            logs: Vec::new(),
            total: u64::from(u32::MAX) + 100,
            offset: u32::MAX - 5,
        };
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), Some(u32::MAX - 25));
        assert_eq!(page.current_page(), (u32::MAX - 5) / SCAN_PAGE_SIZE + 1);
        let first = u64::from(u32::MAX - 5) + 1;
        assert_eq!(page.showing(), (first, first + 19));

        let short = ScanPage { total: 5, ..page };
        assert_eq!(short.next_offset(), None);
    }

    #[test]
    fn test_scan_page_defaults_without_pagination() {
        let page = ScanPage::from_response(ScanLogsResponse::default(), 0);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.prev_offset(), None);
        assert!(!page.is_paginated());
    }

    #[test]
    fn test_scan_log_decode() {
        let raw = r#"{"id":9,"deliveryNo":"D-1","documentType":"invoice","status":"success","sapMessage":null,"createdAt":"2025-03-01T10:00:00Z"}"#;
        let log: ScanLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.status, ScanStatus::Success);
        assert!(log.created_at.is_some());
        assert_eq!(ScanStatus::parse("FAILED"), Some(ScanStatus::Failed));
    }

    #[test]
    fn test_log_entry_keeps_extra_fields() {
        let raw = r#"{"id":"l1","message":"m","timestamp":"t","source":"scanner"}"#;
        let entry: LogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.extra["source"], "scanner");
        assert_eq!(entry.level, None);
    }
}
