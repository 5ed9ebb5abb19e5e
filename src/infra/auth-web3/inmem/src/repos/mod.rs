// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod inmem_challenge_repository;
mod inmem_session_repository;
mod inmem_transaction_repository;
mod inmem_wallet_repository;

pub use inmem_challenge_repository::*;
pub use inmem_session_repository::*;
pub use inmem_transaction_repository::*;
pub use inmem_wallet_repository::*;
