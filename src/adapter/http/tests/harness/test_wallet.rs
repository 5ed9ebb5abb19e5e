// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Well-known development keys, never used outside of tests
const ALICE_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const BOB_PRIVATE_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub(crate) const ALICE_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub(crate) const BOB_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) struct TestWallet {
    signer: PrivateKeySigner,
    pub address: &'static str,
}

impl TestWallet {
    pub fn alice() -> Self {
        Self {
            signer: ALICE_PRIVATE_KEY.parse().unwrap(),
            address: ALICE_ADDRESS,
        }
    }

    pub fn bob() -> Self {
        Self {
            signer: BOB_PRIVATE_KEY.parse().unwrap(),
            address: BOB_ADDRESS,
        }
    }

    /// `personal_sign` as performed by a browser wallet
    pub fn sign(&self, message: &str) -> String {
        let signature = self.signer.sign_message_sync(message.as_bytes()).unwrap();
        alloy_primitives::hex::encode_prefixed(signature.as_bytes())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
