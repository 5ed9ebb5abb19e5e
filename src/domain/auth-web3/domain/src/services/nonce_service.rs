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

use crate::{Challenge, ChallengeNonce, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait NonceService: Send + Sync {
    /// Issues a fresh challenge, invalidating any outstanding one for the same
    /// wallet
    async fn issue_challenge(&self, wallet: &WalletKey) -> Result<Challenge, IssueChallengeError>;

    /// Spends the outstanding challenge of the wallet. The challenge is gone
    /// after this call whatever the outcome.
    async fn consume_challenge(
        &self,
        wallet: &WalletKey,
        nonce: &ChallengeNonce,
    ) -> Result<Challenge, ConsumeChallengeError>;

    async fn cleanup_expired_challenges(&self) -> Result<usize, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IssueChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum ConsumeChallengeError {
    #[error("No matching challenge for wallet {wallet}")]
    NotFound { wallet: WalletKey },

    #[error("Challenge for wallet {wallet} has expired")]
    Expired { wallet: WalletKey },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
