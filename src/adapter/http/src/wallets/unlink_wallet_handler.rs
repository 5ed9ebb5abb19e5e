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
use erp_auth_web3::{UnlinkError, WalletRegistry};
use http_common::{ApiError, ApiErrorResponse, IntoApiError, codes};

use super::ensure_session_of_wallet;
use crate::axum_utils::{ApiPath, ApiQuery, from_catalog_n, parse_wallet_key};
use crate::{AuthenticatedSession, ChainIdQuery, WalletResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unlinks the wallet from its owner. All sessions of the wallet, including
/// the current one, are revoked.
#[utoipa::path(
    delete,
    path = "/wallets/{address}",
    params(
        ("address" = String, Path, description = "Wallet address"),
        ChainIdQuery,
    ),
    responses(
        (status = OK, body = WalletResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
        (status = FORBIDDEN, body = ApiErrorResponse),
        (status = NOT_FOUND, body = ApiErrorResponse),
    ),
    tag = "wallets",
    security(
        ("bearer" = []),
    )
)]
#[tracing::instrument(level = "info", skip_all, fields(%address))]
pub async fn unlink_wallet_handler(
    Extension(catalog): Extension<Catalog>,
    AuthenticatedSession(session): AuthenticatedSession,
    ApiPath(address): ApiPath<String>,
    ApiQuery(query): ApiQuery<ChainIdQuery>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = parse_wallet_key(&address, query.chain_id)?;
    ensure_session_of_wallet(&session, &wallet)?;

    let wallet_registry = from_catalog_n!(catalog, dyn WalletRegistry);

    let unlinked = wallet_registry
        .unlink(&wallet, &session.subject)
        .await
        .map_err(|e| match e {
            UnlinkError::NotFound(e) => ApiError::not_found(codes::WALLET_NOT_FOUND, e),
            UnlinkError::NotOwner(e) => ApiError::forbidden(codes::FORBIDDEN, e),
            UnlinkError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(unlinked.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
