// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod auth_challenge_handler;
mod auth_refresh_handler;
mod auth_session_handlers;
mod auth_verify_handler;

pub use auth_challenge_handler::*;
pub use auth_refresh_handler::*;
pub use auth_session_handlers::*;
pub use auth_verify_handler::*;
