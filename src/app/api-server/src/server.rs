// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use axum::{Extension, Json};
use dill::Catalog;
use internal_error::{InternalError, ResultIntoInternal};
use observability::axum::unknown_fallback_handler;
use utoipa::Modify;
use utoipa_axum::router::OpenApiRouter;

use crate::{VERSION, openapi};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const OPENAPI_SCHEMA_PATH: &str = "/openapi.json";

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub struct ApiServer {
    server_future: ServerFuture,
    local_addr: SocketAddr,
}

impl ApiServer {
    /// Serves until `shutdown_signal` resolves, then drains in-flight requests
    pub fn new(
        catalog: Catalog,
        listener: tokio::net::TcpListener,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<Self, InternalError> {
        let local_addr = listener.local_addr().int_err()?;

        let router = build_router(catalog);

        let server_future = Box::pin(
            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown_signal)
                .into_future(),
        );

        Ok(Self {
            server_future,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> &SocketAddr {
        &self.local_addr
    }

    pub async fn run(self) -> Result<(), InternalError> {
        self.server_future.await.int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn build_router(catalog: Catalog) -> axum::Router {
    let (router, mut api) = OpenApiRouter::with_openapi(openapi::spec_builder(VERSION).build())
        .merge(erp_adapter_http::root_router())
        .split_for_parts();

    openapi::SecurityAddon.modify(&mut api);

    router
        .route(
            OPENAPI_SCHEMA_PATH,
            axum::routing::get(openapi_schema_handler),
        )
        .layer(Extension(Arc::new(api)))
        .layer(Extension(catalog))
        .layer(observability::axum::http_layer())
        .fallback(unknown_fallback_handler)
}

async fn openapi_schema_handler(
    Extension(api): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(api.as_ref().clone())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
