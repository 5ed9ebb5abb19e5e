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

use crate::test_utils::{pending_transaction, t0, tx_hash, wallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn confirmed_at(block_number: u64) -> TransactionStatusUpdate {
    TransactionStatusUpdate::new(TransactionStatus::Confirmed, Some(block_number)).unwrap()
}

fn failed() -> TransactionStatusUpdate {
    TransactionStatusUpdate::new(TransactionStatus::Failed, None).unwrap()
}

fn pending() -> TransactionStatusUpdate {
    TransactionStatusUpdate::new(TransactionStatus::Pending, None).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_transaction_once(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn TransactionRepository>().unwrap();

    let original = pending_transaction(tx_hash(1), wallet(0), t0());

    assert_eq!(
        Err(GetTransactionError::NotFound(TransactionNotFoundError {
            tx_hash: tx_hash(1)
        })),
        repo.get_transaction(&tx_hash(1)).await
    );

    repo.insert_transaction(&original).await.unwrap();

    // Conflicting insert from another wallet reports the stored row
    let conflicting = pending_transaction(tx_hash(1), wallet(1), t0() + Duration::seconds(5));
    assert_eq!(
        Err(InsertTransactionError::Duplicate {
            existing: Box::new(original.clone())
        }),
        repo.insert_transaction(&conflicting).await
    );

    assert_eq!(Ok(original), repo.get_transaction(&tx_hash(1)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_update_status_transitions(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn TransactionRepository>().unwrap();

    let original = pending_transaction(tx_hash(2), wallet(0), t0());
    repo.insert_transaction(&original).await.unwrap();

    let confirm_time = t0() + Duration::minutes(1);
    let confirmed = repo
        .update_transaction_status(&tx_hash(2), confirmed_at(100), confirm_time)
        .await
        .unwrap();

    assert_eq!(TransactionStatus::Confirmed, confirmed.status);
    assert_eq!(Some(100), confirmed.block_number);
    assert_eq!(Some(confirm_time), confirmed.confirmed_at);

    // Duplicate delivery of the same terminal state is accepted as is
    assert_eq!(
        Ok(confirmed.clone()),
        repo.update_transaction_status(
            &tx_hash(2),
            confirmed_at(100),
            confirm_time + Duration::minutes(1)
        )
        .await
    );

    assert_eq!(
        Err(UpdateTransactionStatusError::InvalidTransition(
            InvalidTransitionError {
                tx_hash: tx_hash(2),
                from: TransactionStatus::Confirmed,
                to: TransactionStatus::Pending,
            }
        )),
        repo.update_transaction_status(&tx_hash(2), pending(), confirm_time)
            .await
    );
    assert!(
        repo.update_transaction_status(&tx_hash(2), failed(), confirm_time)
            .await
            .is_err()
    );

    assert_eq!(Ok(confirmed), repo.get_transaction(&tx_hash(2)).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_update_status_of_unknown_transaction(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn TransactionRepository>().unwrap();

    assert_eq!(
        Err(UpdateTransactionStatusError::NotFound(
            TransactionNotFoundError {
                tx_hash: tx_hash(3)
            }
        )),
        repo.update_transaction_status(&tx_hash(3), failed(), t0())
            .await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_concurrent_updates_of_one_hash(catalog: &dill::Catalog) {
    let repo: Arc<dyn TransactionRepository> = catalog.get_one().unwrap();

    repo.insert_transaction(&pending_transaction(tx_hash(4), wallet(0), t0()))
        .await
        .unwrap();

    let hash = tx_hash(4);
    let (confirm_res, fail_res) = futures::join!(
        repo.update_transaction_status(&hash, confirmed_at(7), t0()),
        repo.update_transaction_status(&hash, failed(), t0()),
    );

    // Exactly one of two conflicting terminal states wins
    assert!(confirm_res.is_ok() ^ fail_res.is_ok());

    let stored = repo.get_transaction(&hash).await.unwrap();
    if confirm_res.is_ok() {
        assert_eq!(TransactionStatus::Confirmed, stored.status);
    } else {
        assert_eq!(TransactionStatus::Failed, stored.status);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_list_transactions_by_wallet(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn TransactionRepository>().unwrap();

    let later = pending_transaction(tx_hash(5), wallet(0), t0() + Duration::minutes(2));
    let earlier = pending_transaction(tx_hash(6), wallet(0), t0());
    let foreign = pending_transaction(tx_hash(7), wallet(1), t0());
    for tx in [&later, &earlier, &foreign] {
        repo.insert_transaction(tx).await.unwrap();
    }

    assert_eq!(
        vec![earlier, later],
        repo.list_transactions_by_wallet(&wallet(0)).await.unwrap()
    );
    assert_eq!(
        vec![foreign],
        repo.list_transactions_by_wallet(&wallet(1)).await.unwrap()
    );
    assert!(
        repo.list_transactions_by_wallet(&wallet(2))
            .await
            .unwrap()
            .is_empty()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
