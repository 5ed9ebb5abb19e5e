// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod challenge_repository;
mod session_repository;
mod transaction_repository;
mod wallet_repository;

pub use challenge_repository::*;
pub use session_repository::*;
pub use transaction_repository::*;
pub use wallet_repository::*;
