// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_primitives::Signature;
use erp_auth_web3::{AddressCodec, ChallengeNonce, SignatureVerifier, Web3AuthConfig, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// `r || s || v`
const SIGNATURE_LEN: usize = 65;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Verifies EIP-191 `personal_sign` signatures over the login message
#[dill::component]
#[dill::interface(dyn SignatureVerifier)]
pub struct EvmSignatureVerifier {
    config: Arc<Web3AuthConfig>,
}

impl EvmSignatureVerifier {
    fn decode_signature(signature: &str) -> Option<Signature> {
        let digits = signature.strip_prefix("0x").unwrap_or(signature);

        let mut bytes = [0u8; SIGNATURE_LEN];
        alloy_primitives::hex::decode_to_slice(digits, &mut bytes).ok()?;

        Signature::from_raw(&bytes).ok()
    }
}

impl SignatureVerifier for EvmSignatureVerifier {
    fn signing_message(&self, wallet: &WalletKey, nonce: &ChallengeNonce) -> String {
        format!(
            "{} wants you to sign in with your wallet:\n{}\n\nChain ID: {}\nNonce: {}",
            self.config.signing_domain, wallet.address, wallet.chain_id, nonce
        )
    }

    #[tracing::instrument(level = "debug", skip_all, fields(wallet = %claimed_wallet))]
    fn verify(&self, claimed_wallet: &WalletKey, nonce: &ChallengeNonce, signature: &str) -> bool {
        let Some(signature) = Self::decode_signature(signature) else {
            tracing::debug!("Malformed signature");
            return false;
        };

        let message = self.signing_message(claimed_wallet, nonce);

        match signature.recover_address_from_msg(message.as_bytes()) {
            Ok(recovered) => AddressCodec::from_recovered(recovered) == claimed_wallet.address,
            Err(e) => {
                tracing::debug!(error = %e, "Signer recovery failed");
                false
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
