// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers service implementations. Repositories and configs
/// ([`erp_auth_web3::Web3AuthConfig`], [`erp_auth_web3::JwtSessionConfig`])
/// are expected to be added by the caller.
pub fn register_dependencies(catalog_builder: &mut CatalogBuilder) {
    catalog_builder.add::<NonceServiceImpl>();
    catalog_builder.add::<EvmSignatureVerifier>();
    catalog_builder.add::<WalletRegistryImpl>();
    catalog_builder.add::<WalletOwnerIdentityProvider>();
    catalog_builder.add::<SessionIssuerImpl>();
    catalog_builder.add::<TransactionLedgerImpl>();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
