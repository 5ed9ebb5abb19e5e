// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::Parser;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() {
    let args = erp_api_server::Cli::parse();

    if let Err(err) = erp_api_server::run(args).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
