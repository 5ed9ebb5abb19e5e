// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenge_canonicalizes_address() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let res = client
            .request_challenge(&ALICE_ADDRESS.to_lowercase(), 1)
            .await;
        assert_eq!(200, res.status());

        let body = res.json::<Value>().await.unwrap();
        let nonce = body["nonce"].as_str().unwrap();

        assert_eq!(body["wallet_address"], ALICE_ADDRESS);
        assert_eq!(body["chain_id"], 1);
        assert_eq!(
            body["message"],
            format!(
                "erp.test wants you to sign in with your wallet:\n{ALICE_ADDRESS}\n\nChain ID: \
                 1\nNonce: {nonce}"
            )
        );

        let issued_at: DateTime<Utc> = serde_json::from_value(body["issued_at"].clone()).unwrap();
        let expires_at: DateTime<Utc> =
            serde_json::from_value(body["expires_at"].clone()).unwrap();
        assert_eq!(
            expires_at - issued_at,
            Duration::minutes(CHALLENGE_TTL_MINUTES)
        );
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_challenge_rejects_bad_input() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        // Mixed case with a broken checksum
        let broken_checksum = ALICE_ADDRESS.replace("Fd6", "fD6");
        assert_api_error(
            client.request_challenge(&broken_checksum, 1).await,
            400,
            "invalid_address",
        )
        .await;

        assert_api_error(
            client.request_challenge("0x1234", 1).await,
            400,
            "invalid_address",
        )
        .await;

        assert_api_error(
            client.request_challenge(ALICE_ADDRESS, 0).await,
            400,
            "invalid_request",
        )
        .await;

        let res = client
            .cl
            .post(client.url("/auth/challenge"))
            .json(&json!({ "wallet": ALICE_ADDRESS }))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 400, "invalid_request").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_verify_then_replay() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let alice = TestWallet::alice();
        let body = client.signed_challenge(&alice).await;

        let res = client.verify(&body).await;
        assert_eq!(200, res.status());

        let session = res.json::<Value>().await.unwrap();
        assert_eq!(session["wallet_address"], ALICE_ADDRESS);
        assert_eq!(session["chain_id"], 1);
        assert_eq!(session["token_type"], "Bearer");
        assert_eq!(
            session["subject"],
            format!("did:pkh:eip155:1:{ALICE_ADDRESS}")
        );
        assert!(!access_token(&session).is_empty());
        assert!(!refresh_token(&session).is_empty());
        assert!(session["expires_at"].is_string());

        // Same nonce and signature once more
        let res = client.verify(&body).await;
        assert_eq!(401, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({
                "code": "challenge_expired",
                "message": "Authentication failed",
            })
        );
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_verify_wallet_linked_to_another_identity() {
    let harness = ServerSideHarness::new(ServerSideHarnessOptions {
        sequential_identities: true,
        ..Default::default()
    })
    .await;
    let client = harness.api_client();

    let client = async move {
        let alice = TestWallet::alice();

        let first = client.sign_in(&alice).await;
        assert_eq!(first["subject"], "did:example:user-1");

        // The next verification resolves to another identity
        let body = client.signed_challenge(&alice).await;
        assert_api_error(client.verify(&body).await, 409, "already_linked").await;

        // The challenge was spent by the conflicting attempt
        assert_api_error(client.verify(&body).await, 401, "challenge_expired").await;

        // The original owner keeps the wallet and the session
        let res = client
            .cl
            .get(client.url("/auth/session"))
            .bearer_auth(access_token(&first))
            .send()
            .await
            .unwrap();
        assert_eq!(200, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap()["subject"],
            "did:example:user-1"
        );
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_verify_rejects_foreign_signature() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let alice = TestWallet::alice();
        let bob = TestWallet::bob();

        let res = client.request_challenge(ALICE_ADDRESS, 1).await;
        let challenge = res.json::<Value>().await.unwrap();

        let res = client
            .verify(&json!({
                "wallet_address": ALICE_ADDRESS,
                "chain_id": 1,
                "nonce": challenge["nonce"],
                "signature": bob.sign(challenge["message"].as_str().unwrap()),
            }))
            .await;
        assert_eq!(401, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({
                "code": "invalid_signature",
                "message": "Authentication failed",
            })
        );

        // The challenge was spent by the failed attempt
        let res = client
            .verify(&json!({
                "wallet_address": ALICE_ADDRESS,
                "chain_id": 1,
                "nonce": challenge["nonce"],
                "signature": alice.sign(challenge["message"].as_str().unwrap()),
            }))
            .await;
        assert_api_error(res, 401, "challenge_expired").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_verify_rejects_stale_and_expired_challenges() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let alice = TestWallet::alice();

        let stale = client.signed_challenge(&alice).await;
        let _fresh = client.signed_challenge(&alice).await;
        assert_api_error(client.verify(&stale).await, 401, "challenge_expired").await;

        let expiring = client.signed_challenge(&alice).await;
        client.advance_time(Duration::minutes(CHALLENGE_TTL_MINUTES));
        assert_api_error(client.verify(&expiring).await, 401, "challenge_expired").await;

        let mut malformed = client.signed_challenge(&alice).await;
        malformed["signature"] = json!("0xnot-a-signature");
        assert_api_error(client.verify(&malformed).await, 401, "invalid_signature").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_refresh() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let session = client.sign_in(&TestWallet::alice()).await;

        client.advance_time(Duration::minutes(30));

        let res = client
            .cl
            .post(client.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token(&session) }))
            .send()
            .await
            .unwrap();
        assert_eq!(200, res.status());

        let refreshed = res.json::<Value>().await.unwrap();
        assert_eq!(refreshed["session_id"], session["session_id"]);
        assert_ne!(access_token(&refreshed), access_token(&session));

        let res = client
            .cl
            .get(client.url("/auth/session"))
            .bearer_auth(access_token(&refreshed))
            .send()
            .await
            .unwrap();
        assert_eq!(200, res.status());

        let info = res.json::<Value>().await.unwrap();
        assert_eq!(info["session_id"], session["session_id"]);
        assert_eq!(info["wallet_address"], ALICE_ADDRESS);
        assert_eq!(info["subject"], session["subject"]);

        let res = client
            .cl
            .post(client.url("/auth/refresh"))
            .json(&json!({ "refresh_token": "garbage" }))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "invalid_token").await;

        // Access tokens are not accepted for refresh
        let res = client
            .cl
            .post(client.url("/auth/refresh"))
            .json(&json!({ "refresh_token": access_token(&session) }))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "invalid_token").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_expired_tokens() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let session = client.sign_in(&TestWallet::alice()).await;

        client.advance_time(Duration::hours(1));

        let res = client
            .cl
            .get(client.url("/auth/session"))
            .bearer_auth(access_token(&session))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "expired").await;

        client.advance_time(Duration::days(7));

        let res = client
            .cl
            .post(client.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token(&session) }))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "expired").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_logout_revokes_session() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let session = client.sign_in(&TestWallet::alice()).await;

        let res = client
            .cl
            .post(client.url("/auth/logout"))
            .bearer_auth(access_token(&session))
            .send()
            .await
            .unwrap();
        assert_eq!(204, res.status());

        let res = client
            .cl
            .get(client.url("/auth/session"))
            .bearer_auth(access_token(&session))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "revoked").await;

        let res = client
            .cl
            .post(client.url("/auth/refresh"))
            .json(&json!({ "refresh_token": refresh_token(&session) }))
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "revoked").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

#[test_log::test(tokio::test)]
async fn test_session_requires_bearer_token() {
    let harness = ServerSideHarness::new(Default::default()).await;
    let client = harness.api_client();

    let client = async move {
        let res = client
            .cl
            .get(client.url("/auth/session"))
            .send()
            .await
            .unwrap();
        assert_eq!(401, res.status());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({
                "code": "unauthorized",
                "message": "Authentication failed",
            })
        );

        let res = client
            .cl
            .get(client.url("/auth/session"))
            .header("Authorization", "Basic YWxpY2U6c2VjcmV0")
            .send()
            .await
            .unwrap();
        assert_api_error(res, 401, "unauthorized").await;
    };

    await_client_server_flow!(harness.api_server_run(), client);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
