// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, TimeZone, Utc};
use dill::CatalogBuilder;
use erp_auth_web3::{
    IdentityId,
    IdentityProvider,
    JwtSessionConfig,
    TransactionObserverConfig,
    WalletKey,
    Web3AuthConfig,
};
use erp_auth_web3_services::*;
use internal_error::InternalError;
use serde_json::{Value, json};
use time_source::{FakeSystemTimeSource, SystemTimeSource};

use super::{TestAPIServer, TestWallet};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) const CHALLENGE_TTL_MINUTES: i64 = 5;

#[derive(Default)]
pub(crate) struct ServerSideHarnessOptions {
    pub observer_api_key: Option<String>,
    /// Every verification resolves to a new identity instead of the wallet
    /// owner
    pub sequential_identities: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) struct ServerSideHarness {
    time_source: FakeSystemTimeSource,
    api_server: TestAPIServer,
}

impl ServerSideHarness {
    pub async fn new(options: ServerSideHarnessOptions) -> Self {
        let time_source =
            FakeSystemTimeSource::new_set(Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap());

        let catalog = {
            let mut b = CatalogBuilder::new();

            b.add_value(time_source.clone())
                .bind::<dyn SystemTimeSource, FakeSystemTimeSource>()
                .add_value(Web3AuthConfig::new(
                    "erp.test",
                    Duration::minutes(CHALLENGE_TTL_MINUTES),
                ))
                .add_value(JwtSessionConfig::new(Some("test-secret".to_string())))
                .add_value(TransactionObserverConfig::new(options.observer_api_key));

            erp_auth_web3_inmem::register_dependencies(&mut b);

            if options.sequential_identities {
                b.add_value(SequentialIdentityProvider::default())
                    .bind::<dyn IdentityProvider, SequentialIdentityProvider>()
                    .add::<NonceServiceImpl>()
                    .add::<EvmSignatureVerifier>()
                    .add::<WalletRegistryImpl>()
                    .add::<SessionIssuerImpl>()
                    .add::<TransactionLedgerImpl>();
            } else {
                erp_auth_web3_services::register_dependencies(&mut b);
            }

            b.build()
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let api_server = TestAPIServer::new(catalog, listener);

        Self {
            time_source,
            api_server,
        }
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient {
            cl: reqwest::Client::new(),
            root_url: format!("http://{}", self.api_server.local_addr()),
            time_source: self.time_source.clone(),
        }
    }

    pub async fn api_server_run(self) -> Result<(), std::io::Error> {
        self.api_server.run().await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Hands out `did:example:user-1`, `did:example:user-2`, ... in call order
#[derive(Default)]
pub(crate) struct SequentialIdentityProvider {
    counter: AtomicU64,
}

#[async_trait::async_trait]
impl IdentityProvider for SequentialIdentityProvider {
    async fn resolve_identity(&self, _wallet: &WalletKey) -> Result<IdentityId, InternalError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(IdentityId::try_new(format!("did:example:user-{n}")).unwrap())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Client side of a test: a thin wrapper over [`reqwest::Client`] that also
/// controls the server clock
pub(crate) struct ApiClient {
    pub cl: reqwest::Client,
    pub root_url: String,
    time_source: FakeSystemTimeSource,
}

impl ApiClient {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root_url)
    }

    pub fn advance_time(&self, time_quantum: Duration) {
        self.time_source.advance(time_quantum);
    }

    pub async fn request_challenge(&self, address: &str, chain_id: u64) -> reqwest::Response {
        self.cl
            .post(self.url("/auth/challenge"))
            .json(&json!({
                "wallet_address": address,
                "chain_id": chain_id,
            }))
            .send()
            .await
            .unwrap()
    }

    /// Requests a challenge and returns the verify request body answering it
    pub async fn signed_challenge(&self, wallet: &TestWallet) -> Value {
        let res = self.request_challenge(wallet.address, 1).await;
        assert_eq!(200, res.status());

        let challenge = res.json::<Value>().await.unwrap();
        let message = challenge["message"].as_str().unwrap();

        json!({
            "wallet_address": wallet.address,
            "chain_id": 1,
            "nonce": challenge["nonce"],
            "signature": wallet.sign(message),
        })
    }

    pub async fn verify(&self, body: &Value) -> reqwest::Response {
        self.cl
            .post(self.url("/auth/verify"))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Full login, returns the session response body
    pub async fn sign_in(&self, wallet: &TestWallet) -> Value {
        let body = self.signed_challenge(wallet).await;

        let res = self.verify(&body).await;
        assert_eq!(200, res.status());

        res.json().await.unwrap()
    }

    pub async fn submit_transaction(
        &self,
        access_token: &str,
        address: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.cl
            .post(self.url(&format!("/wallets/{address}/transactions")))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn update_status(&self, tx_hash: &str, body: &Value) -> reqwest::Response {
        self.cl
            .patch(self.url(&format!("/transactions/{tx_hash}/status")))
            .json(body)
            .send()
            .await
            .unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) async fn assert_api_error(res: reqwest::Response, status: u16, code: &str) {
    assert_eq!(status, res.status().as_u16());

    let body = res.json::<Value>().await.unwrap();
    assert_eq!(body["code"], code, "{body}");
}

pub(crate) fn access_token(session: &Value) -> &str {
    session["access_token"].as_str().unwrap()
}

pub(crate) fn refresh_token(session: &Value) -> &str {
    session["refresh_token"].as_str().unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
