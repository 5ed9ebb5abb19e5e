// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use erp_auth_web3::*;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Transactions keyed by hash. Updates of one hash are serialized by the shard
/// lock, updates of different hashes proceed in parallel.
pub struct InMemoryTransactionRepository {
    transactions: DashMap<TxHash, Transaction>,
}

#[dill::component(pub)]
#[dill::interface(dyn TransactionRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<(), InsertTransactionError> {
        match self.transactions.entry(transaction.tx_hash) {
            Entry::Occupied(entry) => Err(InsertTransactionError::Duplicate {
                existing: Box::new(entry.get().clone()),
            }),
            Entry::Vacant(entry) => {
                entry.insert(transaction.clone());
                Ok(())
            }
        }
    }

    async fn get_transaction(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Transaction, GetTransactionError> {
        self.transactions
            .get(tx_hash)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TransactionNotFoundError { tx_hash: *tx_hash }.into())
    }

    async fn update_transaction_status(
        &self,
        tx_hash: &TxHash,
        update: TransactionStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Transaction, UpdateTransactionStatusError> {
        let Some(mut stored) = self.transactions.get_mut(tx_hash) else {
            return Err(TransactionNotFoundError { tx_hash: *tx_hash }.into());
        };

        match stored.apply_status_update(update, now)? {
            StatusUpdateOutcome::Changed(updated) => {
                *stored = updated.clone();
                Ok(updated)
            }
            StatusUpdateOutcome::Unchanged => Ok(stored.clone()),
        }
    }

    async fn list_transactions_by_wallet(
        &self,
        wallet: &WalletKey,
    ) -> Result<Vec<Transaction>, InternalError> {
        let mut transactions: Vec<_> = self
            .transactions
            .iter()
            .filter(|entry| entry.wallet() == *wallet)
            .map(|entry| entry.value().clone())
            .collect();

        transactions.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.tx_hash.cmp(&b.tx_hash))
        });

        Ok(transactions)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
