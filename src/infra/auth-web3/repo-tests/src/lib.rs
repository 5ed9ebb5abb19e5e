// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod challenge_repository;
pub mod session_repository;
pub mod transaction_repository;
pub mod wallet_repository;

mod test_utils;
