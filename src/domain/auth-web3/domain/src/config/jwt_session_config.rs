// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use random_strings::{AllowedSymbols, get_random_string};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ENV_VAR_ERP_JWT_SECRET: &str = "ERP_JWT_SECRET";

pub const DEFAULT_JWT_ISSUER: &str = "erp.web3";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl JwtSessionConfig {
    /// Without a secret a random one is generated, tokens then do not survive
    /// a restart
    pub fn new(maybe_jwt_secret: Option<String>) -> Self {
        Self {
            jwt_secret: maybe_jwt_secret
                .unwrap_or_else(|| get_random_string(None, 64, &AllowedSymbols::AsciiSymbols)),
            issuer: DEFAULT_JWT_ISSUER.to_string(),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(7),
        }
    }

    pub fn load_from_env() -> Self {
        Self::new(
            std::env::var(ENV_VAR_ERP_JWT_SECRET)
                .ok()
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn with_ttls(self, access_token_ttl: Duration, refresh_token_ttl: Duration) -> Self {
        Self {
            access_token_ttl,
            refresh_token_ttl,
            ..self
        }
    }
}

impl Default for JwtSessionConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
