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
use erp_auth_web3::{
    TransactionLedger,
    TransactionStatus,
    TransactionStatusUpdate,
    UpdateStatusError,
};
use http_common::{ApiError, ApiErrorResponse, IntoApiError, codes};
use serde::{Deserialize, Serialize};

use crate::axum_utils::{ApiJson, ApiPath, from_catalog_n, parse_tx_hash};
use crate::{ObserverAuthorized, TransactionResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateTransactionStatusRequest {
    #[schema(value_type = String, example = "confirmed")]
    pub status: TransactionStatus,
    /// Required for `confirmed`, not allowed for `pending`
    pub block_number: Option<u64>,
}

/// Status report of the chain observer.
///
/// Only `pending -> confirmed` and `pending -> failed` are accepted. Repeating
/// the current terminal status with the same block is a no-op.
#[utoipa::path(
    patch,
    path = "/transactions/{tx_hash}/status",
    params(
        ("tx_hash" = String, Path, description = "Transaction hash"),
    ),
    request_body = UpdateTransactionStatusRequest,
    responses(
        (status = OK, body = TransactionResponse),
        (status = BAD_REQUEST, body = ApiErrorResponse),
        (status = NOT_FOUND, body = ApiErrorResponse),
        (status = CONFLICT, body = ApiErrorResponse),
    ),
    tag = "transactions",
    security(
        ("observer_api_key" = []),
    )
)]
#[tracing::instrument(level = "info", skip_all, fields(%tx_hash))]
pub async fn transaction_status_handler(
    Extension(catalog): Extension<Catalog>,
    _: ObserverAuthorized,
    ApiPath(tx_hash): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateTransactionStatusRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let tx_hash = parse_tx_hash(&tx_hash)?;
    let update = TransactionStatusUpdate::new(request.status, request.block_number)
        .map_err(|e| ApiError::bad_request(codes::INVALID_REQUEST, e))?;

    let transaction_ledger = from_catalog_n!(catalog, dyn TransactionLedger);

    let transaction = transaction_ledger
        .update_status(&tx_hash, update)
        .await
        .map_err(|e| match e {
            UpdateStatusError::NotFound(e) => ApiError::not_found(codes::NOT_FOUND, e),
            UpdateStatusError::InvalidTransition(e) => {
                ApiError::conflict(codes::INVALID_TRANSITION, e)
            }
            UpdateStatusError::Internal(e) => e.api_err(),
        })?;

    Ok(Json(transaction.into()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
