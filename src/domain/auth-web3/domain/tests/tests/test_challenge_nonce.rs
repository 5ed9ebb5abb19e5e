// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use erp_auth_web3::{CHALLENGE_NONCE_LENGTH, ChallengeNonce};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_generated_nonces_are_unique_and_well_formed() {
    let nonces: HashSet<String> = (0..500)
        .map(|_| ChallengeNonce::generate().into_inner())
        .collect();

    assert_eq!(nonces.len(), 500);
    for nonce in &nonces {
        assert_eq!(nonce.len(), CHALLENGE_NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[test]
fn test_client_supplied_nonce_is_validated() {
    assert!(ChallengeNonce::try_new("abcDEF0123456789xyz").is_ok());
    assert!(ChallengeNonce::try_new("  abcDEF0123456789xyz ").is_ok());
    assert!(ChallengeNonce::try_new("short").is_err());
    assert!(ChallengeNonce::try_new("abcDEF0123456789-xyz").is_err());
    assert!(ChallengeNonce::try_new("").is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
