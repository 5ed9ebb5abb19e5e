// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ChainId, WalletAddress, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const TX_HASH_HEX_LEN: usize = 64;

/// Transaction hash, canonical form is lowercase `0x`-prefixed hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxHash(B256);

impl TxHash {
    pub fn parse(raw: &str) -> Result<Self, InvalidTxHashError> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);

        if digits.len() != TX_HASH_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidTxHashError {
                value: raw.to_string(),
            });
        }

        let mut bytes = [0u8; 32];
        alloy_primitives::hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
            InvalidTxHashError {
                value: raw.to_string(),
            }
        })?;

        Ok(Self(B256::from(bytes)))
    }

    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&alloy_primitives::hex::encode_prefixed(self.0))
    }
}

impl std::fmt::Debug for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TxHash({self})")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid transaction hash '{value}': expected 64 hex digits")]
pub struct InvalidTxHashError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionDirection {
    Outbound,
    Inbound,
    #[serde(alias = "contract-call")]
    ContractCall,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Amount in the smallest unit of the chain's native currency (e.g. wei)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionAmount(U256);

impl TransactionAmount {
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Accepts plain decimal digits only: no sign, no exponent, no separators
    pub fn parse_decimal(raw: &str) -> Result<Self, InvalidAmountError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAmountError {
                value: raw.to_string(),
            });
        }

        U256::from_str_radix(raw, 10)
            .map(Self)
            .map_err(|_| InvalidAmountError {
                value: raw.to_string(),
            })
    }

    pub fn as_u256(&self) -> &U256 {
        &self.0
    }
}

impl std::fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid amount '{value}': expected a non-negative decimal integer below 2^256")]
pub struct InvalidAmountError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    /// `pending < confirmed` and `pending < failed`, nothing else
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Status report coming from the chain observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionStatusUpdate {
    status: TransactionStatus,
    block_number: Option<u64>,
}

impl TransactionStatusUpdate {
    pub fn new(
        status: TransactionStatus,
        block_number: Option<u64>,
    ) -> Result<Self, InvalidStatusUpdateError> {
        match (status, block_number) {
            (TransactionStatus::Confirmed, None) => {
                Err(InvalidStatusUpdateError::MissingBlockNumber)
            }
            (TransactionStatus::Pending, Some(_)) => {
                Err(InvalidStatusUpdateError::UnexpectedBlockNumber)
            }
            _ => Ok(Self {
                status,
                block_number,
            }),
        }
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStatusUpdateError {
    #[error("Confirmed status requires a block number")]
    MissingBlockNumber,

    #[error("Pending status cannot carry a block number")]
    UnexpectedBlockNumber,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub tx_hash: TxHash,
    pub wallet_address: WalletAddress,
    pub chain_id: ChainId,
    pub direction: TransactionDirection,
    pub amount: TransactionAmount,
    pub status: TransactionStatus,
    pub submitted_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub block_number: Option<u64>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new_pending(
        tx_hash: TxHash,
        wallet: WalletKey,
        direction: TransactionDirection,
        amount: TransactionAmount,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tx_hash,
            wallet_address: wallet.address,
            chain_id: wallet.chain_id,
            direction,
            amount,
            status: TransactionStatus::Pending,
            submitted_at,
            confirmed_at: None,
            block_number: None,
            updated_at: submitted_at,
        }
    }

    pub fn wallet(&self) -> WalletKey {
        WalletKey::new(self.wallet_address, self.chain_id)
    }

    /// Whether `other` describes the same submission, ignoring lifecycle
    /// fields
    pub fn is_same_submission(&self, other: &Transaction) -> bool {
        self.tx_hash == other.tx_hash
            && self.wallet_address == other.wallet_address
            && self.chain_id == other.chain_id
            && self.direction == other.direction
            && self.amount == other.amount
    }

    /// Computes the result of applying a status report.
    ///
    /// A repeated report of the current terminal state is accepted without
    /// changes, so that duplicated deliveries from the observer do not fail.
    pub fn apply_status_update(
        &self,
        update: TransactionStatusUpdate,
        now: DateTime<Utc>,
    ) -> Result<StatusUpdateOutcome, InvalidTransitionError> {
        if self.status.is_terminal()
            && self.status == update.status
            && self.block_number == update.block_number
        {
            return Ok(StatusUpdateOutcome::Unchanged);
        }

        if !self.status.can_transition_to(update.status) {
            return Err(InvalidTransitionError {
                tx_hash: self.tx_hash,
                from: self.status,
                to: update.status,
            });
        }

        let mut updated = self.clone();
        updated.status = update.status;
        updated.block_number = update.block_number;
        updated.updated_at = now;
        if update.status == TransactionStatus::Confirmed {
            updated.confirmed_at = Some(now);
        }

        Ok(StatusUpdateOutcome::Changed(updated))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdateOutcome {
    Changed(Transaction),
    Unchanged,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transaction {tx_hash} cannot move from '{from}' to '{to}'")]
pub struct InvalidTransitionError {
    pub tx_hash: TxHash,
    pub from: TransactionStatus,
    pub to: TransactionStatus,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
