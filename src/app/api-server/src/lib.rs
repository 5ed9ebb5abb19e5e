// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod app;
mod cli;
mod config;
mod error;
mod evictor;
mod openapi;
mod server;

pub use app::*;
pub use cli::*;
pub use config::*;
pub use error::*;
pub use evictor::*;
pub use server::*;
