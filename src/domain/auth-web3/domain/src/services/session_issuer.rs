// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::{BoxedError, InternalError};
use thiserror::Error;

use crate::{Session, SessionClaims, SessionId, Wallet, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Mints an access/refresh token pair for a verified wallet
    async fn issue_session(&self, wallet: &Wallet) -> Result<Session, IssueSessionError>;

    /// Mints a new token pair within the same session. The presented refresh
    /// token stays valid, so retries are safe.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionTokenError>;

    /// Validates an access token, including the revocation check
    async fn authenticate(&self, access_token: &str) -> Result<SessionClaims, SessionTokenError>;

    async fn revoke_session(&self, session_id: &SessionId) -> Result<(), InternalError>;

    async fn revoke_wallet_sessions(&self, wallet: &WalletKey) -> Result<usize, InternalError>;

    async fn cleanup_expired_sessions(&self) -> Result<usize, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IssueSessionError {
    #[error("Wallet {wallet} is not verified")]
    WalletNotVerified { wallet: WalletKey },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SessionTokenError {
    #[error("Invalid token")]
    Invalid(#[source] BoxedError),

    #[error("Expired token")]
    Expired,

    #[error("Revoked token")]
    Revoked,

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
