// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::FromRequestParts;
use dill::Catalog;
use erp_auth_web3::{
    SessionClaims,
    SessionIssuer,
    SessionTokenError,
    TransactionObserverConfig,
};
use headers::authorization::Bearer;
use headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use http_common::{ApiError, codes};
use internal_error::{InternalError, ResultIntoInternal};
use subtle::ConstantTimeEq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Extracts and validates the bearer access token of the request.
///
/// Requires the [`Catalog`] to be attached as a request extension.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub SessionClaims);

impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let catalog = request_catalog(parts)?;

        let Some(token) = bearer_token(parts) else {
            return Err(ApiError::new_unauthorized());
        };

        let session_issuer = catalog.get_one::<dyn SessionIssuer>().int_err()?;

        session_issuer
            .authenticate(&token)
            .await
            .map(Self)
            .map_err(session_token_api_err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Grants access to the chain observer callbacks. When no observer key is
/// configured the callbacks are open.
#[derive(Debug, Clone, Copy)]
pub struct ObserverAuthorized;

impl<S> FromRequestParts<S> for ObserverAuthorized
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let catalog = request_catalog(parts)?;
        let config = catalog.get_one::<TransactionObserverConfig>().int_err()?;

        let Some(expected_key) = &config.api_key else {
            return Ok(Self);
        };

        match bearer_token(parts) {
            Some(key) if bool::from(key.as_bytes().ct_eq(expected_key.as_bytes())) => Ok(Self),
            Some(_) => Err(ApiError::forbidden(codes::FORBIDDEN, "Observer key mismatch")),
            None => Err(ApiError::new_unauthorized()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn session_token_api_err(e: SessionTokenError) -> ApiError {
    match e {
        SessionTokenError::Invalid(_) => ApiError::unauthorized(codes::INVALID_TOKEN, e),
        SessionTokenError::Expired => ApiError::unauthorized(codes::EXPIRED, e),
        SessionTokenError::Revoked => ApiError::unauthorized(codes::REVOKED, e),
        SessionTokenError::Internal(e) => e.into(),
    }
}

fn request_catalog(parts: &Parts) -> Result<Catalog, InternalError> {
    parts
        .extensions
        .get::<Catalog>()
        .cloned()
        .ok_or_else(|| InternalError::new("Catalog is not attached to the request"))
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
