// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{ChallengeNonce, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Pure signature check over the login message of a challenge.
///
/// Never fails: malformed or foreign signatures simply do not verify. It also
/// has no side effects, challenge consumption is the caller's business.
pub trait SignatureVerifier: Send + Sync {
    /// The exact text the wallet is expected to sign
    fn signing_message(&self, wallet: &WalletKey, nonce: &ChallengeNonce) -> String;

    fn verify(&self, claimed_wallet: &WalletKey, nonce: &ChallengeNonce, signature: &str) -> bool;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
