// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use erp_auth_web3::*;
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn NonceService)]
pub struct NonceServiceImpl {
    challenge_repo: Arc<dyn ChallengeRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<Web3AuthConfig>,
}

#[async_trait::async_trait]
impl NonceService for NonceServiceImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn issue_challenge(&self, wallet: &WalletKey) -> Result<Challenge, IssueChallengeError> {
        let issued_at = self.time_source.now();

        let challenge = Challenge {
            wallet: *wallet,
            nonce: ChallengeNonce::generate(),
            issued_at,
            expires_at: issued_at + self.config.challenge_ttl,
            consumed: false,
        };

        self.challenge_repo
            .save_challenge(&challenge)
            .await
            .int_err()?;

        Ok(challenge)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%wallet))]
    async fn consume_challenge(
        &self,
        wallet: &WalletKey,
        nonce: &ChallengeNonce,
    ) -> Result<Challenge, ConsumeChallengeError> {
        let challenge = match self.challenge_repo.take_challenge(wallet).await {
            Ok(challenge) => challenge,
            Err(GetChallengeError::NotFound { .. }) => {
                return Err(ConsumeChallengeError::NotFound { wallet: *wallet });
            }
            Err(GetChallengeError::Internal(e)) => return Err(e.into()),
        };

        // The outstanding challenge is spent even when the caller presented a
        // stale nonce, so a failed guess cannot be retried
        if challenge.nonce != *nonce {
            tracing::debug!("Presented nonce does not match the outstanding challenge");
            return Err(ConsumeChallengeError::NotFound { wallet: *wallet });
        }

        if challenge.is_expired(self.time_source.now()) {
            return Err(ConsumeChallengeError::Expired { wallet: *wallet });
        }

        Ok(Challenge {
            consumed: true,
            ..challenge
        })
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn cleanup_expired_challenges(&self) -> Result<usize, InternalError> {
        let now = self.time_source.now();

        let removed = self
            .challenge_repo
            .cleanup_expired_challenges(now)
            .await
            .int_err()?;

        tracing::debug!(removed, "Expired challenges evicted");

        Ok(removed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
