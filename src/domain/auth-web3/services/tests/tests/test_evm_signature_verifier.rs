// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use erp_auth_web3::{ChainId, ChallengeNonce, SignatureVerifier};
use pretty_assertions::assert_eq;

use crate::tests::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn nonce(value: &str) -> ChallengeNonce {
    ChallengeNonce::try_new(value).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_signing_message_template() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    assert_eq!(
        harness
            .signature_verifier
            .signing_message(&alice.key, &nonce("abcdefghijklmnop0123456789ABCDEF")),
        format!(
            "erp.test wants you to sign in with your wallet:\n{ALICE_ADDRESS}\n\nChain ID: \
             1\nNonce: abcdefghijklmnop0123456789ABCDEF"
        )
    );
}

#[test]
fn test_valid_signature_verifies() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let n = nonce("abcdefghijklmnop0123456789ABCDEF");

    let signature = alice.sign(&harness.signature_verifier.signing_message(&alice.key, &n));

    assert!(harness.signature_verifier.verify(&alice.key, &n, &signature));

    // Prefix is optional
    let unprefixed = signature.trim_start_matches("0x");
    assert!(harness.signature_verifier.verify(&alice.key, &n, unprefixed));
}

#[test]
fn test_signature_is_bound_to_nonce() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let n = nonce("abcdefghijklmnop0123456789ABCDEF");
    let other_n = nonce("abcdefghijklmnop0123456789ABCDEG");

    let signature = alice.sign(&harness.signature_verifier.signing_message(&alice.key, &n));

    assert!(!harness.signature_verifier.verify(&alice.key, &other_n, &signature));
}

#[test]
fn test_signature_is_bound_to_signer() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();
    let n = nonce("abcdefghijklmnop0123456789ABCDEF");

    // Bob signs a message claiming to be Alice
    let forged = bob.sign(&harness.signature_verifier.signing_message(&alice.key, &n));
    assert!(!harness.signature_verifier.verify(&alice.key, &n, &forged));

    // Alice's genuine signature presented for Bob
    let genuine = alice.sign(&harness.signature_verifier.signing_message(&alice.key, &n));
    assert!(!harness.signature_verifier.verify(&bob.key, &n, &genuine));
}

#[test]
fn test_signature_is_bound_to_chain_and_domain() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let n = nonce("abcdefghijklmnop0123456789ABCDEF");

    let signature = alice.sign(&harness.signature_verifier.signing_message(&alice.key, &n));
    let on_polygon = alice.on_chain(ChainId::new(137).unwrap());
    assert!(!harness.signature_verifier.verify(&on_polygon, &n, &signature));

    let foreign_domain = format!(
        "evil.example wants you to sign in with your wallet:\n{ALICE_ADDRESS}\n\nChain ID: \
         1\nNonce: {n}"
    );
    let foreign_signature = alice.sign(&foreign_domain);
    assert!(!harness.signature_verifier.verify(&alice.key, &n, &foreign_signature));
}

#[test]
fn test_malformed_signatures_do_not_verify() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let n = nonce("abcdefghijklmnop0123456789ABCDEF");

    let valid = alice.sign(&harness.signature_verifier.signing_message(&alice.key, &n));

    for malformed in [
        String::new(),
        "0x".to_string(),
        "not a signature".to_string(),
        valid[..valid.len() - 2].to_string(),
        format!("{valid}00"),
        format!("0x{}", "zz".repeat(65)),
        format!("0x{}", "00".repeat(65)),
    ] {
        assert!(
            !harness.signature_verifier.verify(&alice.key, &n, &malformed),
            "{malformed}"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
