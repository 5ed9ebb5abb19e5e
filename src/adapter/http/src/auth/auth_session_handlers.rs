// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use dill::Catalog;
use erp_auth_web3::{SessionClaims, SessionIssuer};
use http::StatusCode;
use http_common::{ApiError, ApiErrorResponse};
use serde::{Deserialize, Serialize};

use crate::AuthenticatedSession;
use crate::axum_utils::from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionInfoResponse {
    pub session_id: String,
    pub subject: String,
    pub wallet_address: String,
    pub chain_id: u64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionClaims> for SessionInfoResponse {
    fn from(value: SessionClaims) -> Self {
        Self {
            session_id: value.session_id.to_string(),
            subject: value.subject.to_string(),
            wallet_address: value.wallet.address.to_string(),
            chain_id: value.wallet.chain_id.as_u64(),
            issued_at: value.issued_at,
            expires_at: value.expires_at,
        }
    }
}

/// Describes the session of the presented access token
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = OK, body = SessionInfoResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
    ),
    tag = "auth",
    security(
        ("bearer" = []),
    )
)]
pub async fn auth_session_handler(
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<Json<SessionInfoResponse>, ApiError> {
    Ok(Json(session.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Revokes the session of the presented access token
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = NO_CONTENT),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
    ),
    tag = "auth",
    security(
        ("bearer" = []),
    )
)]
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_logout_handler(
    Extension(catalog): Extension<Catalog>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<StatusCode, ApiError> {
    let session_issuer = from_catalog_n!(catalog, dyn SessionIssuer);

    session_issuer.revoke_session(&session.session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
