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

use crate::test_utils::{identity, t0, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_link_new_wallet(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn WalletRepository>().unwrap();

    assert_eq!(
        Err(GetWalletError::NotFound(WalletNotFoundError {
            wallet: wallet(0)
        })),
        repo.get_wallet(&wallet(0)).await
    );

    let linked = repo
        .link_wallet(&wallet(0), &identity("alice"), t0())
        .await
        .unwrap();

    let expected = Wallet {
        address: wallet(0).address,
        chain_id: wallet(0).chain_id,
        owner_identity: Some(identity("alice")),
        verified: true,
        linked_at: Some(t0()),
    };

    assert_eq!(expected, linked);
    assert_eq!(Ok(expected), repo.get_wallet(&wallet(0)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_relink_by_owner_keeps_link_time(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn WalletRepository>().unwrap();

    repo.link_wallet(&wallet(0), &identity("alice"), t0())
        .await
        .unwrap();

    let relinked = repo
        .link_wallet(&wallet(0), &identity("alice"), t0() + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(Some(t0()), relinked.linked_at);
    assert!(relinked.verified);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_link_to_another_identity_is_rejected(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn WalletRepository>().unwrap();

    let linked = repo
        .link_wallet(&wallet(1), &identity("alice"), t0())
        .await
        .unwrap();

    assert_eq!(
        Err(LinkWalletError::AlreadyLinked(WalletAlreadyLinkedError {
            wallet: wallet(1)
        })),
        repo.link_wallet(&wallet(1), &identity("mallory"), t0())
            .await
    );

    // Stored state is untouched
    assert_eq!(Ok(linked), repo.get_wallet(&wallet(1)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_unlink_wallet(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn WalletRepository>().unwrap();

    assert_eq!(
        Err(UnlinkWalletError::NotFound(WalletNotFoundError {
            wallet: wallet(2)
        })),
        repo.unlink_wallet(&wallet(2), &identity("alice")).await
    );

    repo.link_wallet(&wallet(2), &identity("alice"), t0())
        .await
        .unwrap();

    assert_eq!(
        Err(UnlinkWalletError::NotOwner(WalletNotOwnedError {
            wallet: wallet(2)
        })),
        repo.unlink_wallet(&wallet(2), &identity("mallory")).await
    );

    let unlinked = repo
        .unlink_wallet(&wallet(2), &identity("alice"))
        .await
        .unwrap();

    assert_eq!(None, unlinked.owner_identity);
    assert!(!unlinked.verified);

    // Once released, the wallet can be linked to anyone
    let relinked = repo
        .link_wallet(&wallet(2), &identity("bob"), t0() + Duration::days(1))
        .await
        .unwrap();

    assert_eq!(Some(identity("bob")), relinked.owner_identity);
    assert_eq!(Some(t0() + Duration::days(1)), relinked.linked_at);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_list_wallets_by_identity(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn WalletRepository>().unwrap();

    for (index, owner) in [(0, "alice"), (1, "bob"), (2, "alice")] {
        repo.link_wallet(&wallet(index), &identity(owner), t0())
            .await
            .unwrap();
    }

    let mut expected = vec![wallet(0), wallet(2)];
    expected.sort();

    assert_eq!(
        expected,
        repo.list_wallets_by_identity(&identity("alice"))
            .await
            .unwrap()
            .iter()
            .map(Wallet::key)
            .collect::<Vec<_>>()
    );
    assert!(
        repo.list_wallets_by_identity(&identity("carol"))
            .await
            .unwrap()
            .is_empty()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
