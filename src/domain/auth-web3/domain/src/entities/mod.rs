// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod chain;
mod challenge;
mod identity;
mod session;
mod transaction;
mod wallet;
mod wallet_address;

pub use chain::*;
pub use challenge::*;
pub use identity::*;
pub use session::*;
pub use transaction::*;
pub use wallet::*;
pub use wallet_address::*;
