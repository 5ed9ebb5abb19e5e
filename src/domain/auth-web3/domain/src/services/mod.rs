// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod identity_provider;
mod nonce_service;
mod session_issuer;
mod signature_verifier;
mod transaction_ledger;
mod wallet_registry;

pub use identity_provider::*;
pub use nonce_service::*;
pub use session_issuer::*;
pub use signature_verifier::*;
pub use transaction_ledger::*;
pub use wallet_registry::*;
