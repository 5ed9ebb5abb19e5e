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
use erp_auth_web3::{IssueChallengeError, NonceService, SignatureVerifier};
use http_common::{ApiError, ApiErrorResponse, IntoApiError};
use serde::{Deserialize, Serialize};

use crate::axum_utils::{ApiJson, from_catalog_n, parse_wallet_key};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChallengeRequest {
    #[schema(example = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]
    pub wallet_address: String,
    #[schema(example = 1)]
    pub chain_id: u64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChallengeResponse {
    /// Canonical form of the requested address
    pub wallet_address: String,
    pub chain_id: u64,
    pub nonce: String,
    /// Exact text to be signed with `personal_sign`
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues a one-time login challenge, replacing any outstanding one for the
/// same wallet
#[utoipa::path(
    post,
    path = "/auth/challenge",
    request_body = ChallengeRequest,
    responses(
        (status = OK, body = ChallengeResponse),
        (status = BAD_REQUEST, body = ApiErrorResponse),
    ),
    tag = "auth",
)]
#[tracing::instrument(level = "info", skip_all)]
pub async fn auth_challenge_handler(
    Extension(catalog): Extension<Catalog>,
    ApiJson(request): ApiJson<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let wallet = parse_wallet_key(&request.wallet_address, request.chain_id)?;

    let (nonce_service, signature_verifier) =
        from_catalog_n!(catalog, dyn NonceService, dyn SignatureVerifier);

    let challenge = nonce_service
        .issue_challenge(&wallet)
        .await
        .map_err(|e| match e {
            IssueChallengeError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(ChallengeResponse {
        wallet_address: wallet.address.to_string(),
        chain_id: wallet.chain_id.as_u64(),
        message: signature_verifier.signing_message(&wallet, &challenge.nonce),
        nonce: challenge.nonce.to_string(),
        issued_at: challenge.issued_at,
        expires_at: challenge.expires_at,
    }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
