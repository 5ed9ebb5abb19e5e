// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use erp_auth_web3::*;
use pretty_assertions::assert_eq;

use crate::test_utils::{identity, t0, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn session(wallet: WalletKey, issued_at: DateTime<Utc>) -> SessionRecord {
    SessionRecord {
        id: SessionId::new_random(),
        subject: identity("alice"),
        wallet,
        issued_at,
        expires_at: issued_at + Duration::days(7),
        revoked_at: None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_and_get_session(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let record = session(wallet(0), t0());

    assert_eq!(
        Err(GetSessionError::NotFound {
            session_id: record.id
        }),
        repo.get_session(&record.id).await
    );

    repo.save_session(&record).await.unwrap();

    assert_eq!(Ok(record.clone()), repo.get_session(&record.id).await);
    assert_eq!(
        Err(SaveSessionError::Duplicate {
            session_id: record.id
        }),
        repo.save_session(&record).await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_revoke_session_keeps_first_time(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let record = session(wallet(0), t0());
    repo.save_session(&record).await.unwrap();

    let missing = SessionId::new_random();
    assert_eq!(
        Err(RevokeSessionError::NotFound {
            session_id: missing
        }),
        repo.revoke_session(&missing, t0()).await
    );

    let first = t0() + Duration::minutes(1);
    repo.revoke_session(&record.id, first).await.unwrap();
    repo.revoke_session(&record.id, first + Duration::minutes(1))
        .await
        .unwrap();

    assert_eq!(
        Some(first),
        repo.get_session(&record.id).await.unwrap().revoked_at
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_revoke_wallet_sessions(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let a1 = session(wallet(0), t0());
    let a2 = session(wallet(0), t0() + Duration::minutes(1));
    let b1 = session(wallet(1), t0());
    for record in [&a1, &a2, &b1] {
        repo.save_session(record).await.unwrap();
    }

    let revoked_at = t0() + Duration::hours(1);
    assert_eq!(
        2,
        repo.revoke_wallet_sessions(&wallet(0), revoked_at)
            .await
            .unwrap()
    );
    // Already revoked sessions are not counted again
    assert_eq!(
        0,
        repo.revoke_wallet_sessions(&wallet(0), revoked_at)
            .await
            .unwrap()
    );

    assert!(repo.get_session(&a1.id).await.unwrap().is_revoked());
    assert!(repo.get_session(&a2.id).await.unwrap().is_revoked());
    assert!(!repo.get_session(&b1.id).await.unwrap().is_revoked());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_expired_sessions(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn SessionRepository>().unwrap();

    let old = session(wallet(0), t0());
    let fresh = session(wallet(1), t0() + Duration::days(3));
    repo.save_session(&old).await.unwrap();
    repo.save_session(&fresh).await.unwrap();

    assert_eq!(
        1,
        repo.cleanup_expired_sessions(t0() + Duration::days(7))
            .await
            .unwrap()
    );

    assert!(repo.get_session(&old.id).await.is_err());
    assert_eq!(Ok(fresh.clone()), repo.get_session(&fresh.id).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
