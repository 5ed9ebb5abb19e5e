// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod dependencies;
mod evm_signature_verifier;
mod nonce_service_impl;
mod session_issuer_impl;
mod transaction_ledger_impl;
mod wallet_owner_identity_provider;
mod wallet_registry_impl;

pub use dependencies::*;
pub use evm_signature_verifier::*;
pub use nonce_service_impl::*;
pub use session_issuer_impl::*;
pub use transaction_ledger_impl::*;
pub use wallet_owner_identity_provider::*;
pub use wallet_registry_impl::*;
