// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::{FromRequest, FromRequestParts};
use erp_auth_web3::{AddressCodec, ChainId, TxHash, WalletKey};
use http_common::{ApiError, codes};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolves several components from the request catalog at once:
///
/// ```ignore
/// let (nonce_service, signature_verifier) =
///     from_catalog_n!(catalog, dyn NonceService, dyn SignatureVerifier);
/// ```
macro_rules! from_catalog_n {
    ($catalog:ident, $($type:ty),+ $(,)?) => {
        (
            $(
                internal_error::ResultIntoInternal::int_err($catalog.get_one::<$type>())?
            ),+
        )
    };
}

pub(crate) use from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// [`axum::Json`] with rejections rendered as [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub(crate) struct ApiJson<T>(pub T);

/// [`axum::extract::Query`] with rejections rendered as [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub(crate) struct ApiQuery<T>(pub T);

/// [`axum::extract::Path`] with rejections rendered as [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub(crate) struct ApiPath<T>(pub T);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn parse_wallet_key(
    raw_address: &str,
    raw_chain_id: u64,
) -> Result<WalletKey, ApiError> {
    let chain_id =
        ChainId::new(raw_chain_id).map_err(|e| ApiError::bad_request(codes::INVALID_REQUEST, e))?;

    AddressCodec::normalize(raw_address, chain_id)
        .map(|address| WalletKey::new(address, chain_id))
        .map_err(|e| ApiError::bad_request(codes::INVALID_ADDRESS, e))
}

pub(crate) fn parse_tx_hash(raw: &str) -> Result<TxHash, ApiError> {
    TxHash::parse(raw).map_err(|e| ApiError::bad_request(codes::INVALID_REQUEST, e))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
