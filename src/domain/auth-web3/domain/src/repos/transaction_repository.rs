// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{InvalidTransitionError, Transaction, TransactionStatusUpdate, TxHash, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert-if-absent keyed by hash. On conflict the stored row is returned
    /// untouched in the error.
    async fn insert_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<(), InsertTransactionError>;

    async fn get_transaction(&self, tx_hash: &TxHash)
    -> Result<Transaction, GetTransactionError>;

    /// Validates and applies the update while holding the row, so concurrent
    /// updates of one hash are serialized. Returns the stored row afterwards.
    async fn update_transaction_status(
        &self,
        tx_hash: &TxHash,
        update: TransactionStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<Transaction, UpdateTransactionStatusError>;

    /// Ordered by submission time, oldest first
    async fn list_transactions_by_wallet(
        &self,
        wallet: &WalletKey,
    ) -> Result<Vec<Transaction>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum InsertTransactionError {
    #[error("Transaction already exists: {}", existing.tx_hash)]
    Duplicate { existing: Box<Transaction> },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for InsertTransactionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Duplicate { existing: a }, Self::Duplicate { existing: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetTransactionError {
    #[error(transparent)]
    NotFound(#[from] TransactionNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetTransactionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transaction not found: {tx_hash}")]
pub struct TransactionNotFoundError {
    pub tx_hash: TxHash,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateTransactionStatusError {
    #[error(transparent)]
    NotFound(#[from] TransactionNotFoundError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for UpdateTransactionStatusError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
