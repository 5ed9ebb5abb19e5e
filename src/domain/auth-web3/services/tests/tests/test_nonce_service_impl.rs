// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use erp_auth_web3::{CHALLENGE_NONCE_LENGTH, ConsumeChallengeError};
use pretty_assertions::assert_eq;
use time_source::SystemTimeSource;

use crate::tests::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_challenge() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let challenge = harness
        .nonce_service
        .issue_challenge(&alice.key)
        .await
        .unwrap();

    assert_eq!(challenge.wallet, alice.key);
    assert_eq!(challenge.issued_at, harness.time_source.now());
    assert_eq!(
        challenge.expires_at,
        challenge.issued_at + Duration::minutes(CHALLENGE_TTL_MINUTES)
    );
    assert!(!challenge.consumed);
    assert_eq!(challenge.nonce.as_ref().len(), CHALLENGE_NONCE_LENGTH);
}

#[test_log::test(tokio::test)]
async fn test_nonces_are_unique() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    let a = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();
    let b = harness.nonce_service.issue_challenge(&bob.key).await.unwrap();
    let c = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.nonce, c.nonce);
}

#[test_log::test(tokio::test)]
async fn test_consume_challenge_once() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let issued = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    let consumed = harness
        .nonce_service
        .consume_challenge(&alice.key, &issued.nonce)
        .await
        .unwrap();
    assert!(consumed.consumed);
    assert_eq!(consumed.nonce, issued.nonce);

    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &issued.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_reissue_invalidates_previous_nonce() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let first = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();
    let second = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &first.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));

    // The failed attempt spent the outstanding challenge too
    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &second.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_challenges_are_scoped_by_wallet_and_chain() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    let issued = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&bob.key, &issued.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));

    let other_chain = alice.on_chain(erp_auth_web3::ChainId::new(10).unwrap());
    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&other_chain, &issued.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));

    // Unaffected by the attempts against other keys
    harness
        .nonce_service
        .consume_challenge(&alice.key, &issued.nonce)
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_expired_challenge() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let issued = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    harness.advance_time(Duration::minutes(CHALLENGE_TTL_MINUTES));

    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &issued.nonce)
            .await,
        Err(ConsumeChallengeError::Expired { .. })
    ));
    assert!(matches!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &issued.nonce)
            .await,
        Err(ConsumeChallengeError::NotFound { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_cleanup_expired_challenges() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    harness.nonce_service.issue_challenge(&alice.key).await.unwrap();
    harness.advance_time(Duration::minutes(3));
    let bobs = harness.nonce_service.issue_challenge(&bob.key).await.unwrap();
    harness.advance_time(Duration::minutes(3));

    assert_eq!(
        harness
            .nonce_service
            .cleanup_expired_challenges()
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        harness
            .nonce_service
            .cleanup_expired_challenges()
            .await
            .unwrap(),
        0
    );

    harness
        .nonce_service
        .consume_challenge(&bob.key, &bobs.nonce)
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_concurrent_consumption_has_single_winner() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let issued = harness.nonce_service.issue_challenge(&alice.key).await.unwrap();

    let (a, b) = futures::join!(
        harness
            .nonce_service
            .consume_challenge(&alice.key, &issued.nonce),
        harness
            .nonce_service
            .consume_challenge(&alice.key, &issued.nonce),
    );

    assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
