// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod auth;
mod authentication;
mod axum_utils;
mod responses;
mod router;
mod transactions;
mod wallets;

pub use authentication::*;
pub use responses::*;
pub use router::*;
