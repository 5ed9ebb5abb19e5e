// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::Duration;
use erp_auth_web3::*;
use pretty_assertions::assert_eq;

use crate::test_utils::{challenge, t0, wallet, wallet_on_chain};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_and_get_challenge(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn ChallengeRepository>().unwrap();

    assert_eq!(
        Err(GetChallengeError::NotFound { wallet: wallet(0) }),
        repo.get_challenge(&wallet(0)).await
    );

    let saved = challenge(wallet(0), t0());
    repo.save_challenge(&saved).await.unwrap();

    assert_eq!(Ok(saved), repo.get_challenge(&wallet(0)).await);

    // Same address on another chain is a different key
    assert_eq!(
        Err(GetChallengeError::NotFound {
            wallet: wallet_on_chain(0, 137)
        }),
        repo.get_challenge(&wallet_on_chain(0, 137)).await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_replaces_outstanding_challenge(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn ChallengeRepository>().unwrap();

    let first = challenge(wallet(0), t0());
    let second = challenge(wallet(0), t0() + Duration::seconds(10));

    repo.save_challenge(&first).await.unwrap();
    repo.save_challenge(&second).await.unwrap();

    assert_eq!(Ok(second), repo.get_challenge(&wallet(0)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_take_challenge_only_once(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn ChallengeRepository>().unwrap();

    let saved = challenge(wallet(1), t0());
    repo.save_challenge(&saved).await.unwrap();

    assert_eq!(Ok(saved), repo.take_challenge(&wallet(1)).await);
    assert_eq!(
        Err(GetChallengeError::NotFound { wallet: wallet(1) }),
        repo.take_challenge(&wallet(1)).await
    );
    assert_eq!(
        Err(GetChallengeError::NotFound { wallet: wallet(1) }),
        repo.get_challenge(&wallet(1)).await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_concurrent_take_has_single_winner(catalog: &dill::Catalog) {
    let repo: Arc<dyn ChallengeRepository> = catalog.get_one().unwrap();

    repo.save_challenge(&challenge(wallet(2), t0()))
        .await
        .unwrap();

    let key = wallet(2);
    let results =
        futures::future::join_all((0..8).map(|_| async { repo.take_challenge(&key).await })).await;

    assert_eq!(1, results.iter().filter(|r| r.is_ok()).count());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_expired_challenges(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn ChallengeRepository>().unwrap();

    let old = challenge(wallet(0), t0());
    let fresh = challenge(wallet(1), t0() + Duration::minutes(4));
    repo.save_challenge(&old).await.unwrap();
    repo.save_challenge(&fresh).await.unwrap();

    // `old` expires exactly at t0 + 5m
    assert_eq!(
        1,
        repo.cleanup_expired_challenges(t0() + Duration::minutes(5))
            .await
            .unwrap()
    );

    assert!(repo.get_challenge(&wallet(0)).await.is_err());
    assert_eq!(Ok(fresh), repo.get_challenge(&wallet(1)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
