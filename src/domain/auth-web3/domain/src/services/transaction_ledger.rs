// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    GetTransactionError,
    InvalidTransitionError,
    Transaction,
    TransactionAmount,
    TransactionDirection,
    TransactionNotFoundError,
    TransactionStatusUpdate,
    TxHash,
    WalletKey,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Records a pending transaction. Resubmitting an identical submission is
    /// a no-op that returns the stored row.
    async fn record_submission(
        &self,
        submission: TransactionSubmission,
    ) -> Result<RecordedSubmission, RecordSubmissionError>;

    async fn update_status(
        &self,
        tx_hash: &TxHash,
        update: TransactionStatusUpdate,
    ) -> Result<Transaction, UpdateStatusError>;

    async fn get_transaction(&self, tx_hash: &TxHash) -> Result<Transaction, GetTransactionError>;

    async fn list_wallet_transactions(
        &self,
        wallet: &WalletKey,
    ) -> Result<Vec<Transaction>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSubmission {
    pub wallet: WalletKey,
    pub tx_hash: TxHash,
    pub direction: TransactionDirection,
    pub amount: TransactionAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub transaction: Transaction,
    /// `false` when an identical submission was already on record
    pub created: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RecordSubmissionError {
    #[error("Wallet {wallet} is not registered or not verified")]
    WalletNotVerified { wallet: WalletKey },

    #[error("Transaction {tx_hash} is already recorded with different details")]
    DuplicateHash { tx_hash: TxHash },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateStatusError {
    #[error(transparent)]
    NotFound(#[from] TransactionNotFoundError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
