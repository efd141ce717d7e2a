//! Error handling for the access-control services.
//!
//! This module provides:
//! - A single error type carrying a stable machine-readable code
//! - HTTP status code mapping for API responses
//! - User-facing messages kept apart from internal detail
//! - Error logging with tracing integration
//!
//! # Usage
//!
//! ```rust
//! use mailvault_core::error::{ErrorCode, MailvaultError};
//!
//! let err = MailvaultError::forbidden("Required role: admin").with_context("user_role", "dealer");
//! assert_eq!(err.code(), ErrorCode::Forbidden);
//! assert_eq!(err.http_status().as_u16(), 403);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::rbac::{PolicyError, RbacError};
use crate::telemetry::metrics::ERRORS_TOTAL;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

pub type Result<T> = std::result::Result<T, MailvaultError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes for API responses.
///
/// These codes are stable and can be used by clients for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication/Authorization (4000-4099)
    Unauthorized,
    Forbidden,
    MissingRbacContext,

    // Validation Errors (4100-4199)
    ValidationError,
    UnknownRole,
    UnknownOrganizationType,
    InvalidPermission,

    // Serialization Errors (2200-2299)
    SerializationError,

    // Configuration Errors (5000-5099)
    ConfigurationError,

    // Internal Errors (9000-9099)
    InternalError,
}

impl ErrorCode {
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::Unauthorized => 4000,
            Self::Forbidden => 4001,
            Self::MissingRbacContext => 4002,

            Self::ValidationError => 4100,
            Self::UnknownRole => 4101,
            Self::UnknownOrganizationType => 4102,
            Self::InvalidPermission => 4103,

            Self::SerializationError => 2200,

            Self::ConfigurationError => 5000,

            Self::InternalError => 9000,
        }
    }

    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ValidationError
            | Self::UnknownRole
            | Self::UnknownOrganizationType
            | Self::InvalidPermission => StatusCode::BAD_REQUEST,
            // A handler asked for context the router never provided.
            Self::MissingRbacContext
            | Self::SerializationError
            | Self::ConfigurationError
            | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire form, e.g. `MISSING_RBAC_CONTEXT`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::MissingRbacContext => "MISSING_RBAC_CONTEXT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UnknownRole => "UNKNOWN_ROLE",
            Self::UnknownOrganizationType => "UNKNOWN_ORGANIZATION_TYPE",
            Self::InvalidPermission => "INVALID_PERMISSION",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub const fn category(&self) -> &'static str {
        match self.numeric_code() {
            2200..=2299 => "serialization",
            4000..=4099 => "authorization",
            4100..=4199 => "validation",
            5000..=5099 => "configuration",
            9000..=9099 => "internal",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Severity
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity level for errors (affects logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Caller errors (bad input, denied access)
    Low,
    /// Misconfigured deployment
    High,
    /// Broken invariants inside the service
    Critical,
}

impl ErrorSeverity {
    pub const fn from_code(code: &ErrorCode) -> Self {
        match code {
            ErrorCode::Unauthorized
            | ErrorCode::Forbidden
            | ErrorCode::ValidationError
            | ErrorCode::UnknownRole
            | ErrorCode::UnknownOrganizationType
            | ErrorCode::InvalidPermission => Self::Low,

            ErrorCode::ConfigurationError
            | ErrorCode::SerializationError
            | ErrorCode::MissingRbacContext => Self::High,

            ErrorCode::InternalError => Self::Critical,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The error type returned across the crate's public surfaces.
#[derive(Error, Debug)]
pub struct MailvaultError {
    code: ErrorCode,
    /// Safe to expose to clients
    user_message: Cow<'static, str>,
    /// For logging only
    internal_message: Option<String>,
    context: HashMap<String, serde_json::Value>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl fmt::Display for MailvaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.user_message)?;
        if let Some(ref internal) = self.internal_message {
            write!(f, " (internal: {})", internal)?;
        }
        Ok(())
    }
}

impl MailvaultError {
    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn new(code: ErrorCode, user_message: impl Into<Cow<'static, str>>) -> Self {
        let error = Self {
            code,
            user_message: user_message.into(),
            internal_message: None,
            context: HashMap::new(),
            source: None,
        };
        error.record_metrics();
        error
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, "An internal error occurred")
            .with_internal_message(message)
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn missing_context() -> Self {
        Self::new(
            ErrorCode::MissingRbacContext,
            "Authorization context not available. Ensure the access layer is applied.",
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────────────────────────────

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }

    /// Attach a structured detail that is returned to the client.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn internal_message(&self) -> Option<&str> {
        self.internal_message.as_deref()
    }

    pub fn context(&self) -> &HashMap<String, serde_json::Value> {
        &self.context
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::from_code(&self.code)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error with appropriate severity.
    pub fn log(&self) {
        let code = self.code.as_str();
        let category = self.code.category();
        let status = self.http_status().as_u16();

        match self.severity() {
            ErrorSeverity::Critical => {
                error!(
                    error_code = code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    source = ?self.source,
                    "CRITICAL ERROR"
                );
            }
            ErrorSeverity::High => {
                warn!(
                    error_code = code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    "Service misconfiguration"
                );
            }
            ErrorSeverity::Low => {
                info!(
                    error_code = code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    "Request rejected"
                );
            }
        }
    }

    fn record_metrics(&self) {
        counter!(
            ERRORS_TOTAL,
            "code" => self.code.as_str(),
            "category" => self.code.category(),
        )
        .increment(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// API Response
// ═══════════════════════════════════════════════════════════════════════════════

/// Error response body for API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false for errors
    pub success: bool,
    pub error: ErrorInfo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: ErrorCode,
    pub numeric_code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, serde_json::Value>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<&MailvaultError> for ErrorResponse {
    fn from(error: &MailvaultError) -> Self {
        Self {
            success: false,
            error: ErrorInfo {
                code: error.code,
                numeric_code: error.code.numeric_code(),
                message: error.user_message.to_string(),
                details: error.context.clone(),
                timestamp: chrono::Utc::now(),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Axum Integration
// ═══════════════════════════════════════════════════════════════════════════════

impl IntoResponse for MailvaultError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.http_status();
        let response = ErrorResponse::from(&self);
        (status, Json(response)).into_response()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════════════════

impl From<RbacError> for MailvaultError {
    fn from(error: RbacError) -> Self {
        let code = match &error {
            RbacError::UnknownRole(_) => ErrorCode::UnknownRole,
            RbacError::UnknownOrganizationType(_) => ErrorCode::UnknownOrganizationType,
            RbacError::InvalidPermission(_) => ErrorCode::InvalidPermission,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<PolicyError> for MailvaultError {
    fn from(error: PolicyError) -> Self {
        match error {
            PolicyError::PermissionDenied(ref reason) => {
                Self::forbidden(reason.clone()).with_source(error)
            }
            PolicyError::Unauthenticated => Self::unauthorized(error.to_string()),
        }
    }
}

impl From<config::ConfigError> for MailvaultError {
    fn from(error: config::ConfigError) -> Self {
        Self::new(ErrorCode::ConfigurationError, "Invalid configuration")
            .with_internal_message(error.to_string())
            .with_source(error)
    }
}

impl From<serde_json::Error> for MailvaultError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, "Failed to process JSON data")
            .with_internal_message(error.to_string())
            .with_source(error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
