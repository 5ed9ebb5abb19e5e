// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{IdentityId, Wallet, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait WalletRepository: Send + Sync {
    async fn get_wallet(&self, wallet: &WalletKey) -> Result<Wallet, GetWalletError>;

    /// Conditional upsert: creates a verified wallet owned by `identity`, or
    /// re-verifies an existing one that has no owner or is already owned by
    /// `identity`. Fails if another identity owns the wallet.
    async fn link_wallet(
        &self,
        wallet: &WalletKey,
        identity: &IdentityId,
        linked_at: DateTime<Utc>,
    ) -> Result<Wallet, LinkWalletError>;

    /// Clears the owner and the verified flag, only on behalf of the owner
    async fn unlink_wallet(
        &self,
        wallet: &WalletKey,
        identity: &IdentityId,
    ) -> Result<Wallet, UnlinkWalletError>;

    async fn list_wallets_by_identity(
        &self,
        identity: &IdentityId,
    ) -> Result<Vec<Wallet>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetWalletError {
    #[error(transparent)]
    NotFound(#[from] WalletNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetWalletError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Wallet not found: {wallet}")]
pub struct WalletNotFoundError {
    pub wallet: WalletKey,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum LinkWalletError {
    #[error(transparent)]
    AlreadyLinked(#[from] WalletAlreadyLinkedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for LinkWalletError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlreadyLinked(a), Self::AlreadyLinked(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

/// The owning identity is deliberately not part of the message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Wallet {wallet} is already linked to another identity")]
pub struct WalletAlreadyLinkedError {
    pub wallet: WalletKey,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UnlinkWalletError {
    #[error(transparent)]
    NotFound(#[from] WalletNotFoundError),

    #[error(transparent)]
    NotOwner(#[from] WalletNotOwnedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for UnlinkWalletError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::NotOwner(a), Self::NotOwner(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Wallet {wallet} is not linked to the requesting identity")]
pub struct WalletNotOwnedError {
    pub wallet: WalletKey,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
