// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use erp_auth_web3::{NonceService, SessionIssuer};
use internal_error::InternalError;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ExpiredEntriesEvictorConfig {
    pub interval: chrono::Duration,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvictionStats {
    pub challenges: usize,
    pub sessions: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Periodically purges expired login challenges and sessions
#[dill::component(pub)]
pub struct ExpiredEntriesEvictor {
    nonce_service: Arc<dyn NonceService>,
    session_issuer: Arc<dyn SessionIssuer>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<ExpiredEntriesEvictorConfig>,
}

impl ExpiredEntriesEvictor {
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn evict_once(&self) -> Result<EvictionStats, InternalError> {
        let challenges = self.nonce_service.cleanup_expired_challenges().await?;
        let sessions = self.session_issuer.cleanup_expired_sessions().await?;

        Ok(EvictionStats {
            challenges,
            sessions,
        })
    }

    /// Never returns, drop the future to stop
    pub async fn run(&self) {
        tracing::info!(interval = %self.config.interval, "Starting expired entries evictor");

        loop {
            match self.evict_once().await {
                Ok(stats) if stats != EvictionStats::default() => {
                    tracing::info!(
                        challenges = stats.challenges,
                        sessions = stats.sessions,
                        "Evicted expired entries"
                    );
                }
                Ok(_) => {}
                // A failed round is retried on the next tick
                Err(err) => {
                    tracing::error!(error = ?err, error_msg = %err, "Eviction of expired entries failed");
                }
            }

            self.time_source.sleep(self.config.interval).await;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
