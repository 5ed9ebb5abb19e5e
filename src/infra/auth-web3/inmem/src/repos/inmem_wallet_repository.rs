// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use erp_auth_web3::*;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryWalletRepository {
    wallets: DashMap<WalletKey, Wallet>,
}

#[dill::component(pub)]
#[dill::interface(dyn WalletRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self {
            wallets: DashMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl WalletRepository for InMemoryWalletRepository {
    async fn get_wallet(&self, wallet: &WalletKey) -> Result<Wallet, GetWalletError> {
        self.wallets
            .get(wallet)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| WalletNotFoundError { wallet: *wallet }.into())
    }

    async fn link_wallet(
        &self,
        wallet: &WalletKey,
        identity: &IdentityId,
        linked_at: DateTime<Utc>,
    ) -> Result<Wallet, LinkWalletError> {
        // The entry guard holds the shard lock for the whole check-and-set
        match self.wallets.entry(*wallet) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();

                match &existing.owner_identity {
                    Some(owner) if owner != identity => {
                        return Err(WalletAlreadyLinkedError { wallet: *wallet }.into());
                    }
                    Some(_) => {}
                    None => {
                        existing.owner_identity = Some(identity.clone());
                        existing.linked_at = Some(linked_at);
                    }
                }
                existing.verified = true;

                Ok(existing.clone())
            }
            Entry::Vacant(entry) => {
                let created = Wallet {
                    address: wallet.address,
                    chain_id: wallet.chain_id,
                    owner_identity: Some(identity.clone()),
                    verified: true,
                    linked_at: Some(linked_at),
                };

                entry.insert(created.clone());

                Ok(created)
            }
        }
    }

    async fn unlink_wallet(
        &self,
        wallet: &WalletKey,
        identity: &IdentityId,
    ) -> Result<Wallet, UnlinkWalletError> {
        let Some(mut existing) = self.wallets.get_mut(wallet) else {
            return Err(WalletNotFoundError { wallet: *wallet }.into());
        };

        if !existing.is_owned_by(identity) {
            return Err(WalletNotOwnedError { wallet: *wallet }.into());
        }

        existing.owner_identity = None;
        existing.verified = false;
        existing.linked_at = None;

        Ok(existing.clone())
    }

    async fn list_wallets_by_identity(
        &self,
        identity: &IdentityId,
    ) -> Result<Vec<Wallet>, InternalError> {
        let mut wallets: Vec<_> = self
            .wallets
            .iter()
            .filter(|entry| entry.is_owned_by(identity))
            .map(|entry| entry.value().clone())
            .collect();

        wallets.sort_by_key(Wallet::key);

        Ok(wallets)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
