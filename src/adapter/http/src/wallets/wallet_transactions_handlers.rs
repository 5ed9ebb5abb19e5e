// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use dill::Catalog;
use erp_auth_web3::*;
use http::StatusCode;
use http_common::{ApiError, ApiErrorResponse, IntoApiError, codes};
use serde::{Deserialize, Serialize};

use super::ensure_session_of_wallet;
use crate::axum_utils::{
    ApiJson,
    ApiPath,
    ApiQuery,
    from_catalog_n,
    parse_tx_hash,
    parse_wallet_key,
};
use crate::{AuthenticatedSession, ChainIdQuery, TransactionResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmitTransactionRequest {
    pub chain_id: u64,
    #[schema(example = "0xdeadbeef00000000000000000000000000000000000000000000000000000000")]
    pub tx_hash: String,
    #[schema(value_type = String, example = "outbound")]
    pub direction: TransactionDirection,
    /// Decimal amount in the smallest unit of the chain currency
    #[schema(example = "1000000000000000000")]
    pub amount: String,
}

/// Records a transaction submitted by the wallet as pending.
///
/// Resubmitting an identical transaction returns the stored record with
/// `200 OK` instead of `201 Created`.
#[utoipa::path(
    post,
    path = "/wallets/{address}/transactions",
    params(
        ("address" = String, Path, description = "Wallet address"),
    ),
    request_body = SubmitTransactionRequest,
    responses(
        (status = CREATED, body = TransactionResponse),
        (status = OK, body = TransactionResponse),
        (status = BAD_REQUEST, body = ApiErrorResponse),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
        (status = FORBIDDEN, body = ApiErrorResponse),
        (status = CONFLICT, body = ApiErrorResponse),
    ),
    tag = "transactions",
    security(
        ("bearer" = []),
    )
)]
#[tracing::instrument(level = "info", skip_all, fields(%address))]
pub async fn submit_wallet_transaction_handler(
    Extension(catalog): Extension<Catalog>,
    AuthenticatedSession(session): AuthenticatedSession,
    ApiPath(address): ApiPath<String>,
    ApiJson(request): ApiJson<SubmitTransactionRequest>,
) -> Result<Response, ApiError> {
    let wallet = parse_wallet_key(&address, request.chain_id)?;
    ensure_session_of_wallet(&session, &wallet)?;

    let submission = TransactionSubmission {
        wallet,
        tx_hash: parse_tx_hash(&request.tx_hash)?,
        direction: request.direction,
        amount: TransactionAmount::parse_decimal(&request.amount)
            .map_err(|e| ApiError::bad_request(codes::INVALID_REQUEST, e))?,
    };

    let transaction_ledger = from_catalog_n!(catalog, dyn TransactionLedger);

    let recorded = transaction_ledger
        .record_submission(submission)
        .await
        .map_err(|e| match e {
            RecordSubmissionError::WalletNotVerified { .. } => {
                ApiError::forbidden(codes::FORBIDDEN, e)
            }
            RecordSubmissionError::DuplicateHash { .. } => {
                ApiError::conflict(codes::DUPLICATE_HASH, e)
            }
            RecordSubmissionError::Internal(e) => e.api_err(),
        })?;

    let status_code = if recorded.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status_code,
        Json(TransactionResponse::from(recorded.transaction)),
    )
        .into_response())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Lists transactions of the wallet, oldest first
#[utoipa::path(
    get,
    path = "/wallets/{address}/transactions",
    params(
        ("address" = String, Path, description = "Wallet address"),
        ChainIdQuery,
    ),
    responses(
        (status = OK, body = Vec<TransactionResponse>),
        (status = UNAUTHORIZED, body = ApiErrorResponse),
        (status = FORBIDDEN, body = ApiErrorResponse),
    ),
    tag = "transactions",
    security(
        ("bearer" = []),
    )
)]
pub async fn list_wallet_transactions_handler(
    Extension(catalog): Extension<Catalog>,
    AuthenticatedSession(session): AuthenticatedSession,
    ApiPath(address): ApiPath<String>,
    ApiQuery(query): ApiQuery<ChainIdQuery>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let wallet = parse_wallet_key(&address, query.chain_id)?;
    ensure_session_of_wallet(&session, &wallet)?;

    let transaction_ledger = from_catalog_n!(catalog, dyn TransactionLedger);

    let transactions = transaction_ledger.list_wallet_transactions(&wallet).await?;

    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
