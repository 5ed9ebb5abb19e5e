// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use erp_auth_web3::*;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Response bodies shared by several endpoints. Addresses are rendered in their
// canonical checksummed form, hashes in lowercase, amounts as decimal strings.
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub session_id: String,
    pub subject: String,
    pub wallet_address: String,
    pub chain_id: u64,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub access_token: String,
    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(value: Session) -> Self {
        Self {
            session_id: value.session_id.to_string(),
            subject: value.subject.to_string(),
            wallet_address: value.wallet.address.to_string(),
            chain_id: value.wallet.chain_id.as_u64(),
            token_type: "Bearer".to_string(),
            access_token: value.access_token,
            expires_at: value.access_token_expires_at,
            refresh_token: value.refresh_token,
            refresh_token_expires_at: value.refresh_token_expires_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WalletResponse {
    pub wallet_address: String,
    pub chain_id: u64,
    pub owner_identity: Option<String>,
    pub verified: bool,
    pub linked_at: Option<DateTime<Utc>>,
}

impl From<Wallet> for WalletResponse {
    fn from(value: Wallet) -> Self {
        Self {
            wallet_address: value.address.to_string(),
            chain_id: value.chain_id.as_u64(),
            owner_identity: value.owner_identity.map(|identity| identity.to_string()),
            verified: value.verified,
            linked_at: value.linked_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TransactionResponse {
    pub tx_hash: String,
    pub wallet_address: String,
    pub chain_id: u64,
    #[schema(value_type = String, example = "outbound")]
    pub direction: TransactionDirection,
    /// Decimal amount in the smallest unit of the chain currency
    #[schema(example = "1000000000000000000")]
    pub amount: String,
    #[schema(value_type = String, example = "pending")]
    pub status: TransactionStatus,
    pub block_number: Option<u64>,
    pub submitted_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(value: Transaction) -> Self {
        Self {
            tx_hash: value.tx_hash.to_string(),
            wallet_address: value.wallet_address.to_string(),
            chain_id: value.chain_id.as_u64(),
            direction: value.direction,
            amount: value.amount.to_string(),
            status: value.status,
            block_number: value.block_number,
            submitted_at: value.submitted_at,
            confirmed_at: value.confirmed_at,
            updated_at: value.updated_at,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChainIdQuery {
    pub chain_id: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
