// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::{Catalog, CatalogBuilder};
use erp_auth_web3::TransactionObserverConfig;
use internal_error::ResultIntoInternal;
use time_source::SystemTimeSourceDefault;

use crate::{ApiServer, ApiServerConfig, ApiServerError, Cli, ConfigError, ExpiredEntriesEvictor};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "erp-api-server";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: Cli) -> Result<(), ApiServerError> {
    let mut config = ApiServerConfig::load(args.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_guard = observability::init::configure_logging(BINARY_NAME, &config.logging);
    observability::panic_handler::set_hook_trace_panics(true);

    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        "Initializing {BINARY_NAME}"
    );
    tracing::info!(?config, "Loaded configuration");

    let catalog = build_catalog(&config)?;

    if catalog
        .get_one::<TransactionObserverConfig>()
        .int_err()?
        .api_key
        .is_none()
    {
        tracing::warn!("Observer API key is not set, transaction status updates are unauthenticated");
    }

    let listener = tokio::net::TcpListener::bind(config.server.socket_addr())
        .await
        .int_err()?;

    let server = ApiServer::new(catalog.clone(), listener, shutdown_signal())?;

    tracing::info!(address = %server.local_addr(), "HTTP API server is listening");

    let evictor = catalog.get_one::<ExpiredEntriesEvictor>().int_err()?;

    let result = tokio::select! {
        res = server.run() => res,
        () = evictor.run() => Ok(()),
    };

    match &result {
        Ok(()) => tracing::info!("Server stopped"),
        Err(err) => tracing::error!(error = ?err, error_msg = %err, "Server failed"),
    }

    // Flush all logging sinks
    drop(logging_guard);

    result.map_err(Into::into)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Catalog
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn build_catalog(config: &ApiServerConfig) -> Result<Catalog, ConfigError> {
    let mut b = CatalogBuilder::new();

    b.add::<SystemTimeSourceDefault>();

    b.add_value(config.web3_auth_config()?);
    b.add_value(config.jwt_session_config()?);
    b.add_value(TransactionObserverConfig::load_from_env());
    b.add_value(config.evictor_config()?);

    erp_auth_web3_inmem::register_dependencies(&mut b);
    erp_auth_web3_services::register_dependencies(&mut b);

    b.add::<ExpiredEntriesEvictor>();

    Ok(b.build())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        Err(err) => {
            tracing::error!(error = ?err, "Unable to listen for the shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
