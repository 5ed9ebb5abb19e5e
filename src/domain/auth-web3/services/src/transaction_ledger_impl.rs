// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use erp_auth_web3::*;
use internal_error::InternalError;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn TransactionLedger)]
pub struct TransactionLedgerImpl {
    transaction_repo: Arc<dyn TransactionRepository>,
    wallet_registry: Arc<dyn WalletRegistry>,
    time_source: Arc<dyn SystemTimeSource>,
}

impl TransactionLedgerImpl {
    async fn ensure_wallet_verified(&self, wallet: &WalletKey) -> Result<(), RecordSubmissionError> {
        match self.wallet_registry.get_wallet(wallet).await {
            Ok(Wallet { verified: true, .. }) => Ok(()),
            Ok(_) | Err(GetWalletError::NotFound(_)) => {
                Err(RecordSubmissionError::WalletNotVerified { wallet: *wallet })
            }
            Err(GetWalletError::Internal(e)) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl TransactionLedger for TransactionLedgerImpl {
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(wallet = %submission.wallet, tx_hash = %submission.tx_hash)
    )]
    async fn record_submission(
        &self,
        submission: TransactionSubmission,
    ) -> Result<RecordedSubmission, RecordSubmissionError> {
        self.ensure_wallet_verified(&submission.wallet).await?;

        let transaction = Transaction::new_pending(
            submission.tx_hash,
            submission.wallet,
            submission.direction,
            submission.amount,
            self.time_source.now(),
        );

        match self.transaction_repo.insert_transaction(&transaction).await {
            Ok(()) => {
                tracing::info!("Transaction recorded");
                Ok(RecordedSubmission {
                    transaction,
                    created: true,
                })
            }
            Err(InsertTransactionError::Duplicate { existing })
                if existing.is_same_submission(&transaction) =>
            {
                tracing::debug!("Identical submission already on record");
                Ok(RecordedSubmission {
                    transaction: *existing,
                    created: false,
                })
            }
            Err(InsertTransactionError::Duplicate { .. }) => {
                tracing::warn!("Transaction hash is already recorded with different details");
                Err(RecordSubmissionError::DuplicateHash {
                    tx_hash: submission.tx_hash,
                })
            }
            Err(InsertTransactionError::Internal(e)) => Err(e.into()),
        }
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(%tx_hash, status = %update.status())
    )]
    async fn update_status(
        &self,
        tx_hash: &TxHash,
        update: TransactionStatusUpdate,
    ) -> Result<Transaction, UpdateStatusError> {
        self.transaction_repo
            .update_transaction_status(tx_hash, update, self.time_source.now())
            .await
            .map_err(|e| match e {
                UpdateTransactionStatusError::NotFound(e) => UpdateStatusError::NotFound(e),
                UpdateTransactionStatusError::InvalidTransition(e) => {
                    tracing::warn!(error = %e, "Status transition rejected");
                    UpdateStatusError::InvalidTransition(e)
                }
                UpdateTransactionStatusError::Internal(e) => UpdateStatusError::Internal(e),
            })
    }

    async fn get_transaction(&self, tx_hash: &TxHash) -> Result<Transaction, GetTransactionError> {
        self.transaction_repo.get_transaction(tx_hash).await
    }

    async fn list_wallet_transactions(
        &self,
        wallet: &WalletKey,
    ) -> Result<Vec<Transaction>, InternalError> {
        self.transaction_repo
            .list_transactions_by_wallet(wallet)
            .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
