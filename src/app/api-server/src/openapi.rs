// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{self, OpenApi};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn spec_builder(version: &str) -> openapi::OpenApiBuilder {
    openapi::OpenApiBuilder::new().info(
        openapi::InfoBuilder::new()
            .title("ERP Web3 REST API")
            .version(version)
            .description(Some(
                "Wallet sign-in by signed challenge, bearer sessions and wallet transaction \
                 tracking",
            ))
            .build(),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Declares the security schemes referenced by the handlers
pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "observer_api_key",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
