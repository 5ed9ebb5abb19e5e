// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// This type is used to simplify error handling in HTTP handlers and unify
/// logging of API errors.
///
/// The typical usage pattern is:
///
/// ```ignore
/// async fn handler() -> Result<(), ApiError> {
///     match operation().await {
///         Ok(_) => Ok(()),
///         Err(OperationError::NotFound(e)) => Err(ApiError::not_found(codes::NOT_FOUND, e)),
///         Err(OperationError::Internal(e)) => Err(e.api_err()),
///     }
/// }
/// ```
///
/// We on purpose avoid [From] and [Into] conversions from domain errors: the
/// same domain error can mean different things to different handlers, so each
/// handler spells out its mapping. Only [`InternalError`] converts implicitly,
/// as it always means `500 Internal Server Error`.
///
/// Every error carries a stable machine-readable `code` that clients can
/// match on, and is rendered as `{"code": ..., "message": ...}`.
#[derive(Debug, Error)]
#[error("api error {status_code:?} ({code})")]
pub struct ApiError {
    pub status_code: http::StatusCode,
    pub code: &'static str,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
        status_code: http::StatusCode,
        code: &'static str,
    ) -> Self {
        Self {
            status_code,
            code,
            source: source.into(),
        }
    }

    pub fn bad_request(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(source, http::StatusCode::BAD_REQUEST, code)
    }

    /// Authentication failures never disclose the underlying reason, the
    /// source is only logged
    pub fn unauthorized(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(source, http::StatusCode::UNAUTHORIZED, code)
    }

    pub fn new_unauthorized() -> Self {
        Self::unauthorized(codes::UNAUTHORIZED, "Missing or malformed credentials")
    }

    pub fn forbidden(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(source, http::StatusCode::FORBIDDEN, code)
    }

    pub fn not_found(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(source, http::StatusCode::NOT_FOUND, code)
    }

    pub fn not_found_without_reason() -> Self {
        Self::not_found(codes::NOT_FOUND, "Not Found")
    }

    pub fn conflict(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(source, http::StatusCode::CONFLICT, code)
    }

    /// Message that is safe to show to the client
    pub fn public_message(&self) -> String {
        if self.status_code == http::StatusCode::UNAUTHORIZED {
            "Authentication failed".to_string()
        } else if self.status_code.is_server_error() {
            "Internal error".to_string()
        } else {
            self.source.to_string()
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> Self {
        e.api_err()
    }
}

// Extractor rejections are rendered in the same JSON shape as handler errors

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::bad_request(codes::INVALID_REQUEST, rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        Self::bad_request(codes::INVALID_REQUEST, rejection.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        Self::bad_request(codes::INVALID_REQUEST, rejection.body_text())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const INVALID_ADDRESS: &str = "invalid_address";
    pub const INVALID_SIGNATURE: &str = "invalid_signature";
    pub const CHALLENGE_EXPIRED: &str = "challenge_expired";
    pub const EXPIRED: &str = "expired";
    pub const REVOKED: &str = "revoked";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const WALLET_NOT_FOUND: &str = "wallet_not_found";
    pub const ALREADY_LINKED: &str = "already_linked";
    pub const DUPLICATE_HASH: &str = "duplicate_hash";
    pub const INVALID_TRANSITION: &str = "invalid_transition";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // TODO: Logging as a side effect of conversion is not great - we should move
        // this into a middleware
        if self.status_code.is_server_error() {
            tracing::error!(
                error = ?self.source,
                error_msg = %self.source,
                status_code = %self.status_code,
                "Internal API error",
            );
        } else {
            tracing::warn!(
                error = ?self.source,
                error_msg = %self.source,
                status_code = %self.status_code,
                code = self.code,
                "API error",
            );
        }

        let response_body = axum::response::Json(ApiErrorResponse {
            code: self.code.to_string(),
            message: self.public_message(),
        });

        (self.status_code, response_body).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Provides explicit conversion into [`ApiError`].
pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

/// Allows using `.api_err()` method on [Result] types.
pub trait ResultIntoApiError<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError>;
}

impl<K, E> ResultIntoApiError<K, E> for Result<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError> {
        self.map_err(IntoApiError::api_err)
    }
}

impl IntoApiError for InternalError {
    fn api_err(self) -> ApiError {
        ApiError::new(
            self,
            http::StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_ERROR,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
