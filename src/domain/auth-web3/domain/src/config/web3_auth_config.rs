// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_SIGNING_DOMAIN: &str = "erp.local";
pub const DEFAULT_CHALLENGE_TTL_MINUTES: i64 = 5;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Web3AuthConfig {
    /// Domain-separation tag embedded into every login message, so that a
    /// signature cannot be replayed against another service
    pub signing_domain: String,
    pub challenge_ttl: Duration,
}

impl Web3AuthConfig {
    pub fn new(signing_domain: impl Into<String>, challenge_ttl: Duration) -> Self {
        Self {
            signing_domain: signing_domain.into(),
            challenge_ttl,
        }
    }
}

impl Default for Web3AuthConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SIGNING_DOMAIN,
            Duration::minutes(DEFAULT_CHALLENGE_TTL_MINUTES),
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
