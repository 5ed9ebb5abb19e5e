// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use erp_auth_web3::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Challenges sharded by wallet key. Every operation locks only the shard of
/// its own key, so different wallets never contend.
pub struct InMemoryChallengeRepository {
    challenges: DashMap<WalletKey, Challenge>,
}

#[dill::component(pub)]
#[dill::interface(dyn ChallengeRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryChallengeRepository {
    pub fn new() -> Self {
        Self {
            challenges: DashMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChallengeRepository for InMemoryChallengeRepository {
    async fn save_challenge(&self, challenge: &Challenge) -> Result<(), SaveChallengeError> {
        self.challenges.insert(challenge.wallet, challenge.clone());

        Ok(())
    }

    async fn get_challenge(&self, wallet: &WalletKey) -> Result<Challenge, GetChallengeError> {
        self.challenges
            .get(wallet)
            .map(|entry| entry.value().clone())
            .ok_or(GetChallengeError::NotFound { wallet: *wallet })
    }

    async fn take_challenge(&self, wallet: &WalletKey) -> Result<Challenge, GetChallengeError> {
        self.challenges
            .remove(wallet)
            .map(|(_, challenge)| challenge)
            .ok_or(GetChallengeError::NotFound { wallet: *wallet })
    }

    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredChallengesError> {
        let mut removed = 0;

        self.challenges.retain(|_, challenge| {
            let keep = !challenge.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
