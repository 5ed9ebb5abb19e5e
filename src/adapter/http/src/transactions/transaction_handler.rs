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
use erp_auth_web3::{GetTransactionError, TransactionLedger};
use http_common::{ApiError, ApiErrorResponse, IntoApiError};

use crate::axum_utils::{ApiPath, from_catalog_n, parse_tx_hash};
use crate::{AuthenticatedSession, TransactionResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fetches a transaction of the session's wallet
#[utoipa::path(
    get,
    path = "/transactions/{tx_hash}",
    params(
        ("tx_hash" = String, Path, description = "Transaction hash"),
    ),
    responses(
        (status = OK, body = TransactionResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
        (status = NOT_FOUND, body = ApiErrorResponse),
    ),
    tag = "transactions",
    security(
        ("bearer" = []),
    )
)]
pub async fn transaction_handler(
    Extension(catalog): Extension<Catalog>,
    AuthenticatedSession(session): AuthenticatedSession,
    ApiPath(tx_hash): ApiPath<String>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let tx_hash = parse_tx_hash(&tx_hash)?;

    let transaction_ledger = from_catalog_n!(catalog, dyn TransactionLedger);

    let transaction = match transaction_ledger.get_transaction(&tx_hash).await {
        Ok(transaction) => transaction,
        Err(GetTransactionError::NotFound(_)) => return Err(ApiError::not_found_without_reason()),
        Err(GetTransactionError::Internal(e)) => return Err(e.api_err()),
    };

    // Transactions of other wallets are indistinguishable from missing ones
    if transaction.wallet() != session.wallet {
        return Err(ApiError::not_found_without_reason());
    }

    Ok(Json(transaction.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
