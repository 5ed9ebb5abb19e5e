// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod jwt_session_config;
mod transaction_observer_config;
mod web3_auth_config;

pub use jwt_session_config::*;
pub use transaction_observer_config::*;
pub use web3_auth_config::*;
