// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::Duration;
use erp_auth_web3::*;
use pretty_assertions::assert_eq;
use time_source::SystemTimeSource;

use crate::tests::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_session() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let (wallet, session) = harness.sign_in(&alice).await;
    let now = harness.time_source.now();

    assert_eq!(Some(&session.subject), wallet.owner_identity.as_ref());
    assert_eq!(session.wallet, alice.key);
    assert_eq!(session.issued_at, now);
    assert_eq!(
        session.access_token_expires_at,
        now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)
    );
    assert_eq!(
        session.refresh_token_expires_at,
        now + Duration::hours(REFRESH_TOKEN_TTL_HOURS)
    );
    assert_ne!(session.access_token, session.refresh_token);

    let claims = harness
        .session_issuer
        .authenticate(&session.access_token)
        .await
        .unwrap();

    assert_eq!(
        claims,
        SessionClaims {
            session_id: session.session_id,
            subject: session.subject.clone(),
            wallet: alice.key,
            issued_at: now,
            expires_at: session.access_token_expires_at,
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_unverified_wallet_gets_no_session() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let unverified = Wallet {
        address: alice.key.address,
        chain_id: alice.key.chain_id,
        owner_identity: None,
        verified: false,
        linked_at: None,
    };

    assert!(matches!(
        harness.session_issuer.issue_session(&unverified).await,
        Err(IssueSessionError::WalletNotVerified { wallet }) if wallet == alice.key
    ));
}

#[test_log::test(tokio::test)]
async fn test_stale_wallet_snapshot_gets_no_session() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let (linked, session) = harness.sign_in(&alice).await;
    let owner = linked.owner_identity.clone().unwrap();

    let unlinked = harness
        .wallet_registry
        .unlink(&alice.key, &owner)
        .await
        .unwrap();
    assert!(!unlinked.verified);

    assert!(matches!(
        harness.session_issuer.issue_session(&linked).await,
        Err(IssueSessionError::WalletNotVerified { wallet }) if wallet == alice.key
    ));
    assert!(matches!(
        harness.session_issuer.authenticate(&session.access_token).await,
        Err(SessionTokenError::Revoked)
    ));

    // Re-linked to another identity: the old owner's snapshot is still stale
    let other = IdentityId::try_new("did:example:other").unwrap();
    let (challenge, signature) = harness.signed_challenge(&alice).await;
    harness
        .wallet_registry
        .link_and_verify(&alice.key, &challenge.nonce, &signature, &other)
        .await
        .unwrap();

    assert!(matches!(
        harness.session_issuer.issue_session(&linked).await,
        Err(IssueSessionError::WalletNotVerified { wallet }) if wallet == alice.key
    ));
}

#[test_log::test(tokio::test)]
async fn test_refresh_keeps_session() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let (_, session) = harness.sign_in(&alice).await;

    harness.advance_time(Duration::minutes(10));

    let refreshed = harness
        .session_issuer
        .refresh(&session.refresh_token)
        .await
        .unwrap();

    assert_eq!(refreshed.session_id, session.session_id);
    assert_eq!(refreshed.subject, session.subject);
    assert_eq!(refreshed.issued_at, harness.time_source.now());
    assert_eq!(
        refreshed.refresh_token_expires_at,
        session.refresh_token_expires_at
    );
    assert_ne!(refreshed.access_token, session.access_token);

    // Retrying with the same refresh token is safe
    harness
        .session_issuer
        .refresh(&session.refresh_token)
        .await
        .unwrap();

    harness
        .session_issuer
        .authenticate(&refreshed.access_token)
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_token_use_is_enforced() {
    let harness = Web3AuthHarness::new();
    let (_, session) = harness.sign_in(&TestWallet::alice()).await;

    assert!(matches!(
        harness.session_issuer.refresh(&session.access_token).await,
        Err(SessionTokenError::Invalid(_))
    ));
    assert!(matches!(
        harness
            .session_issuer
            .authenticate(&session.refresh_token)
            .await,
        Err(SessionTokenError::Invalid(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_malformed_tokens() {
    let harness = Web3AuthHarness::new();
    let (_, session) = harness.sign_in(&TestWallet::alice()).await;

    let truncated = &session.access_token[..session.access_token.len() - 4];

    for token in ["", "garbage", "a.b.c", truncated] {
        assert!(
            matches!(
                harness.session_issuer.authenticate(token).await,
                Err(SessionTokenError::Invalid(_))
            ),
            "{token}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_access_token_expiry() {
    let harness = Web3AuthHarness::new();
    let (_, session) = harness.sign_in(&TestWallet::alice()).await;

    harness.advance_time(Duration::minutes(ACCESS_TOKEN_TTL_MINUTES));

    assert!(matches!(
        harness
            .session_issuer
            .authenticate(&session.access_token)
            .await,
        Err(SessionTokenError::Expired)
    ));

    let refreshed = harness
        .session_issuer
        .refresh(&session.refresh_token)
        .await
        .unwrap();
    harness
        .session_issuer
        .authenticate(&refreshed.access_token)
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_access_token_never_outlives_session() {
    let harness = Web3AuthHarness::new();
    let (_, session) = harness.sign_in(&TestWallet::alice()).await;

    harness.advance_time(Duration::hours(REFRESH_TOKEN_TTL_HOURS) - Duration::minutes(5));

    let refreshed = harness
        .session_issuer
        .refresh(&session.refresh_token)
        .await
        .unwrap();

    assert_eq!(
        refreshed.access_token_expires_at,
        session.refresh_token_expires_at
    );
}

#[test_log::test(tokio::test)]
async fn test_refresh_token_expiry() {
    let harness = Web3AuthHarness::new();
    let (_, session) = harness.sign_in(&TestWallet::alice()).await;

    harness.advance_time(Duration::hours(REFRESH_TOKEN_TTL_HOURS));

    assert!(matches!(
        harness.session_issuer.refresh(&session.refresh_token).await,
        Err(SessionTokenError::Expired)
    ));

    assert_eq!(
        harness
            .session_issuer
            .cleanup_expired_sessions()
            .await
            .unwrap(),
        1
    );

    // Still expired rather than revoked once the record is evicted
    assert!(matches!(
        harness.session_issuer.refresh(&session.refresh_token).await,
        Err(SessionTokenError::Expired)
    ));
}

#[test_log::test(tokio::test)]
async fn test_revoke_session() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();

    let (wallet, first) = harness.sign_in(&alice).await;
    let second = harness.session_issuer.issue_session(&wallet).await.unwrap();

    harness
        .session_issuer
        .revoke_session(&first.session_id)
        .await
        .unwrap();

    // Revoking twice, or revoking an unknown session, is not an error
    harness
        .session_issuer
        .revoke_session(&first.session_id)
        .await
        .unwrap();
    harness
        .session_issuer
        .revoke_session(&SessionId::new_random())
        .await
        .unwrap();

    assert!(matches!(
        harness.session_issuer.authenticate(&first.access_token).await,
        Err(SessionTokenError::Revoked)
    ));
    assert!(matches!(
        harness.session_issuer.refresh(&first.refresh_token).await,
        Err(SessionTokenError::Revoked)
    ));

    harness
        .session_issuer
        .authenticate(&second.access_token)
        .await
        .unwrap();

    let record = harness
        .session_repo
        .get_session(&first.session_id)
        .await
        .unwrap();
    assert_eq!(record.revoked_at, Some(harness.time_source.now()));
}

#[test_log::test(tokio::test)]
async fn test_revoke_wallet_sessions() {
    let harness = Web3AuthHarness::new();
    let alice = TestWallet::alice();
    let bob = TestWallet::bob();

    let (alice_wallet, alice_first) = harness.sign_in(&alice).await;
    let alice_second = harness
        .session_issuer
        .issue_session(&alice_wallet)
        .await
        .unwrap();
    let (_, bob_session) = harness.sign_in(&bob).await;

    assert_eq!(
        harness
            .session_issuer
            .revoke_wallet_sessions(&alice.key)
            .await
            .unwrap(),
        2
    );

    for token in [&alice_first.access_token, &alice_second.access_token] {
        assert!(matches!(
            harness.session_issuer.authenticate(token).await,
            Err(SessionTokenError::Revoked)
        ));
    }

    harness
        .session_issuer
        .authenticate(&bob_session.access_token)
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
