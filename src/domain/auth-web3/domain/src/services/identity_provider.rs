// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{IdentityId, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Seam to the external identity module: decides which identity a freshly
/// verified wallet is linked to
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_identity(&self, wallet: &WalletKey) -> Result<IdentityId, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
