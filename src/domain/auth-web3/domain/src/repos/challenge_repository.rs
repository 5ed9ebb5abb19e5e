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

use crate::{Challenge, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ChallengeRepository: Send + Sync {
    /// Stores the challenge, replacing any outstanding one for the same wallet
    async fn save_challenge(&self, challenge: &Challenge) -> Result<(), SaveChallengeError>;

    async fn get_challenge(&self, wallet: &WalletKey) -> Result<Challenge, GetChallengeError>;

    /// Atomically removes and returns the outstanding challenge, regardless
    /// of its expiry. Of two concurrent callers at most one gets it.
    async fn take_challenge(&self, wallet: &WalletKey) -> Result<Challenge, GetChallengeError>;

    /// Returns the number of removed challenges
    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredChallengesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for SaveChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetChallengeError {
    #[error("Challenge not found for wallet: {wallet}")]
    NotFound { wallet: WalletKey },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { wallet: a }, Self::NotFound { wallet: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CleanupExpiredChallengesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
