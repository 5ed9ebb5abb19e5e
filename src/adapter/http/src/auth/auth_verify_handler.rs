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
use erp_auth_web3::*;
use http_common::{ApiError, ApiErrorResponse, IntoApiError, codes};
use serde::{Deserialize, Serialize};

use crate::SessionResponse;
use crate::axum_utils::{ApiJson, from_catalog_n, parse_wallet_key};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyRequest {
    pub wallet_address: String,
    pub chain_id: u64,
    pub nonce: String,
    /// 65-byte `r || s || v` signature, hex encoded
    pub signature: String,
}

/// Exchanges a signed challenge for a session
#[utoipa::path(
    post,
    path = "/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = OK, body = SessionResponse),
        (status = BAD_REQUEST, body = ApiErrorResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
        (status = CONFLICT, body = ApiErrorResponse),
    ),
    tag = "auth",
)]
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_verify_handler(
    Extension(catalog): Extension<Catalog>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let wallet = parse_wallet_key(&request.wallet_address, request.chain_id)?;
    let nonce = ChallengeNonce::try_new(request.nonce)
        .map_err(|e| ApiError::bad_request(codes::INVALID_REQUEST, e))?;

    let (identity_provider, wallet_registry, session_issuer) = from_catalog_n!(
        catalog,
        dyn IdentityProvider,
        dyn WalletRegistry,
        dyn SessionIssuer
    );

    let identity = identity_provider.resolve_identity(&wallet).await?;

    let verified_wallet = wallet_registry
        .link_and_verify(&wallet, &nonce, &request.signature, &identity)
        .await
        .map_err(|e| match e {
            LinkAndVerifyError::InvalidSignature => {
                ApiError::unauthorized(codes::INVALID_SIGNATURE, e)
            }
            LinkAndVerifyError::ChallengeNotFound | LinkAndVerifyError::ChallengeExpired => {
                ApiError::unauthorized(codes::CHALLENGE_EXPIRED, e)
            }
            LinkAndVerifyError::AlreadyLinked(e) => ApiError::conflict(codes::ALREADY_LINKED, e),
            LinkAndVerifyError::Internal(e) => e.api_err(),
        })?;

    let session = session_issuer
        .issue_session(&verified_wallet)
        .await
        .map_err(|e| match e {
            // The wallet was unlinked concurrently
            IssueSessionError::WalletNotVerified { .. } => {
                ApiError::unauthorized(codes::UNAUTHORIZED, e)
            }
            IssueSessionError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(session.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
