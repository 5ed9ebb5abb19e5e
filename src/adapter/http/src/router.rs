// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All REST endpoints. Handlers expect the [`dill::Catalog`] as a request
/// extension.
pub fn root_router() -> OpenApiRouter {
    use crate::{auth, transactions, wallets};

    OpenApiRouter::new()
        .routes(routes!(auth::auth_challenge_handler))
        .routes(routes!(auth::auth_verify_handler))
        .routes(routes!(auth::auth_refresh_handler))
        .routes(routes!(auth::auth_session_handler))
        .routes(routes!(auth::auth_logout_handler))
        .routes(routes!(wallets::unlink_wallet_handler))
        .routes(routes!(
            wallets::submit_wallet_transaction_handler,
            wallets::list_wallet_transactions_handler
        ))
        .routes(routes!(transactions::transaction_handler))
        .routes(routes!(transactions::transaction_status_handler))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
