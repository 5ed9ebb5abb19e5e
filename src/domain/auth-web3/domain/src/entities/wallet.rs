// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::{ChainId, IdentityId, WalletAddress, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub address: WalletAddress,
    pub chain_id: ChainId,
    pub owner_identity: Option<IdentityId>,
    pub verified: bool,
    pub linked_at: Option<DateTime<Utc>>,
}

impl Wallet {
    pub fn key(&self) -> WalletKey {
        WalletKey::new(self.address, self.chain_id)
    }

    pub fn is_owned_by(&self, identity: &IdentityId) -> bool {
        self.owner_identity.as_ref() == Some(identity)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
