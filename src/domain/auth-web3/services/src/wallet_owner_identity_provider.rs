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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps an already linked wallet with its owner, otherwise falls back to the
/// wallet's own `did:pkh` identity
#[dill::component]
#[dill::interface(dyn IdentityProvider)]
pub struct WalletOwnerIdentityProvider {
    wallet_repo: Arc<dyn WalletRepository>,
}

#[async_trait::async_trait]
impl IdentityProvider for WalletOwnerIdentityProvider {
    async fn resolve_identity(&self, wallet: &WalletKey) -> Result<IdentityId, InternalError> {
        match self.wallet_repo.get_wallet(wallet).await {
            Ok(Wallet {
                owner_identity: Some(owner),
                ..
            }) => Ok(owner),
            Ok(_) | Err(GetWalletError::NotFound(_)) => Ok(IdentityId::for_wallet(wallet)),
            Err(GetWalletError::Internal(e)) => Err(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
