// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, TimeZone, Utc};
use erp_auth_web3::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const WALLET_ADDRESSES: [&str; 3] = [
    "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
];

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap()
}

pub(crate) fn wallet(index: usize) -> WalletKey {
    WalletKey::parse(WALLET_ADDRESSES[index], ChainId::ETHEREUM_MAINNET).unwrap()
}

pub(crate) fn wallet_on_chain(index: usize, chain_id: u64) -> WalletKey {
    WalletKey::parse(WALLET_ADDRESSES[index], ChainId::new(chain_id).unwrap()).unwrap()
}

pub(crate) fn identity(name: &str) -> IdentityId {
    IdentityId::try_new(name).unwrap()
}

pub(crate) fn challenge(wallet: WalletKey, issued_at: DateTime<Utc>) -> Challenge {
    Challenge {
        wallet,
        nonce: ChallengeNonce::generate(),
        issued_at,
        expires_at: issued_at + Duration::minutes(5),
        consumed: false,
    }
}

pub(crate) fn tx_hash(n: u8) -> TxHash {
    TxHash::parse(&format!("0x{}{n:02x}", "ab".repeat(31))).unwrap()
}

pub(crate) fn pending_transaction(
    tx_hash: TxHash,
    wallet: WalletKey,
    submitted_at: DateTime<Utc>,
) -> Transaction {
    Transaction::new_pending(
        tx_hash,
        wallet,
        TransactionDirection::Outbound,
        TransactionAmount::parse_decimal("2500").unwrap(),
        submitted_at,
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
