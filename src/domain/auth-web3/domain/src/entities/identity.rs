// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::WalletKey;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Opaque identifier of an application identity (account, employee, org
/// member). Issued by the identity module, this subsystem never interprets it.
#[nutype::nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 512),
    derive(
        AsRef,
        Clone,
        Debug,
        Display,
        Eq,
        PartialEq,
        Hash,
        TryFrom,
        Serialize,
        Deserialize
    )
)]
pub struct IdentityId(String);

impl IdentityId {
    /// Self-sovereign identity of a wallet that has no owner yet
    /// (`did:pkh:eip155:<chain>:<address>`)
    pub fn for_wallet(wallet: &WalletKey) -> Self {
        Self::try_new(format!("did:pkh:{wallet}")).expect("Invalid wallet identity")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
