// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    ChallengeNonce,
    GetWalletError,
    IdentityId,
    Wallet,
    WalletAlreadyLinkedError,
    WalletKey,
    WalletNotFoundError,
    WalletNotOwnedError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait WalletRegistry: Send + Sync {
    /// Consumes the wallet's challenge, checks the signature against it and
    /// links the wallet to `identity`. Exactly one challenge is spent per call,
    /// whether it succeeds or not.
    async fn link_and_verify(
        &self,
        wallet: &WalletKey,
        nonce: &ChallengeNonce,
        signature: &str,
        identity: &IdentityId,
    ) -> Result<Wallet, LinkAndVerifyError>;

    /// Detaches the wallet from its owner and revokes all of its sessions
    async fn unlink(
        &self,
        wallet: &WalletKey,
        identity: &IdentityId,
    ) -> Result<Wallet, UnlinkError>;

    async fn get_wallet(&self, wallet: &WalletKey) -> Result<Wallet, GetWalletError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum LinkAndVerifyError {
    #[error("Signature verification failed")]
    InvalidSignature,

    #[error("Challenge not found")]
    ChallengeNotFound,

    #[error("Challenge expired")]
    ChallengeExpired,

    #[error(transparent)]
    AlreadyLinked(#[from] WalletAlreadyLinkedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UnlinkError {
    #[error(transparent)]
    NotFound(#[from] WalletNotFoundError),

    #[error(transparent)]
    NotOwner(#[from] WalletNotOwnedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
