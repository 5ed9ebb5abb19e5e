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
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn WalletRegistry)]
pub struct WalletRegistryImpl {
    nonce_service: Arc<dyn NonceService>,
    signature_verifier: Arc<dyn SignatureVerifier>,
    session_issuer: Arc<dyn SessionIssuer>,
    wallet_repo: Arc<dyn WalletRepository>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[async_trait::async_trait]
impl WalletRegistry for WalletRegistryImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%wallet))]
    async fn link_and_verify(
        &self,
        wallet: &WalletKey,
        nonce: &ChallengeNonce,
        signature: &str,
        identity: &IdentityId,
    ) -> Result<Wallet, LinkAndVerifyError> {
        let challenge = self
            .nonce_service
            .consume_challenge(wallet, nonce)
            .await
            .map_err(|e| match e {
                ConsumeChallengeError::NotFound { .. } => LinkAndVerifyError::ChallengeNotFound,
                ConsumeChallengeError::Expired { .. } => LinkAndVerifyError::ChallengeExpired,
                ConsumeChallengeError::Internal(e) => LinkAndVerifyError::Internal(e),
            })?;

        if !self
            .signature_verifier
            .verify(wallet, &challenge.nonce, signature)
        {
            tracing::warn!("Wallet signature rejected");
            return Err(LinkAndVerifyError::InvalidSignature);
        }

        let linked = self
            .wallet_repo
            .link_wallet(wallet, identity, self.time_source.now())
            .await
            .map_err(|e| match e {
                LinkWalletError::AlreadyLinked(e) => LinkAndVerifyError::AlreadyLinked(e),
                LinkWalletError::Internal(e) => LinkAndVerifyError::Internal(e),
            })?;

        tracing::info!("Wallet verified");

        Ok(linked)
    }

    #[tracing::instrument(level = "info", skip_all, fields(%wallet))]
    async fn unlink(&self, wallet: &WalletKey, identity: &IdentityId) -> Result<Wallet, UnlinkError> {
        let unlinked = self
            .wallet_repo
            .unlink_wallet(wallet, identity)
            .await
            .map_err(|e| match e {
                UnlinkWalletError::NotFound(e) => UnlinkError::NotFound(e),
                UnlinkWalletError::NotOwner(e) => UnlinkError::NotOwner(e),
                UnlinkWalletError::Internal(e) => UnlinkError::Internal(e),
            })?;

        let revoked = self.session_issuer.revoke_wallet_sessions(wallet).await?;

        tracing::info!(revoked_sessions = revoked, "Wallet unlinked");

        Ok(unlinked)
    }

    async fn get_wallet(&self, wallet: &WalletKey) -> Result<Wallet, GetWalletError> {
        self.wallet_repo.get_wallet(wallet).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
