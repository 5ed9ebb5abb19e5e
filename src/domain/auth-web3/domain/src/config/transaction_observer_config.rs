// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ENV_VAR_ERP_OBSERVER_API_KEY: &str = "ERP_OBSERVER_API_KEY";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Credentials of the external chain observer that reports transaction
/// statuses. No key means status updates are not authenticated.
#[derive(Debug, Clone, Default)]
pub struct TransactionObserverConfig {
    pub api_key: Option<String>,
}

impl TransactionObserverConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn load_from_env() -> Self {
        Self::new(
            std::env::var(ENV_VAR_ERP_OBSERVER_API_KEY)
                .ok()
                .filter(|s| !s.is_empty()),
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
