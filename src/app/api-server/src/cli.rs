// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::IpAddr;
use std::path::PathBuf;

use observability::init::LogFormat;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wallet sign-in and transaction tracking HTTP API
#[derive(Debug, Clone, clap::Parser)]
#[command(name = crate::BINARY_NAME, version)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interface to listen on, overrides `server.address`
    #[arg(long)]
    pub address: Option<IpAddr>,

    /// Port to listen on (0 picks a random free port), overrides `server.port`
    #[arg(long)]
    pub port: Option<u16>,

    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format: `text` or `json`, overrides `logging.format`
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
