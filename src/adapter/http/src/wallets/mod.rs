// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod unlink_wallet_handler;
mod wallet_transactions_handlers;

pub use unlink_wallet_handler::*;
pub use wallet_transactions_handlers::*;

use erp_auth_web3::{SessionClaims, WalletKey};
use http_common::{ApiError, codes};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wallet-scoped endpoints may only be used with a session of that wallet
fn ensure_session_of_wallet(session: &SessionClaims, wallet: &WalletKey) -> Result<(), ApiError> {
    if session.wallet == *wallet {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            codes::FORBIDDEN,
            "Session does not belong to the wallet",
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
