// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::{Extension, Json};
use dill::Catalog;
use erp_auth_web3::SessionIssuer;
use http_common::{ApiError, ApiErrorResponse};
use serde::{Deserialize, Serialize};

use crate::axum_utils::{ApiJson, from_catalog_n};
use crate::{SessionResponse, session_token_api_err};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Issues a new token pair within the session of the refresh token. Safe to
/// retry: the presented refresh token stays valid until the session ends.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = OK, body = SessionResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
    ),
    tag = "auth",
)]
#[tracing::instrument(level = "debug", skip_all)]
pub async fn auth_refresh_handler(
    Extension(catalog): Extension<Catalog>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_issuer = from_catalog_n!(catalog, dyn SessionIssuer);

    let session = session_issuer
        .refresh(&request.refresh_token)
        .await
        .map_err(session_token_api_err)?;

    Ok(Json(session.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
