// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// EIP-155 chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
    pub const ETHEREUM_MAINNET: ChainId = ChainId(1);

    pub fn new(value: u64) -> Result<Self, InvalidChainIdError> {
        if value == 0 {
            return Err(InvalidChainIdError { value });
        }
        Ok(Self(value))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Every chain served by this system speaks the EVM address and
    /// signature dialect
    pub fn family(&self) -> ChainFamily {
        ChainFamily::Evm
    }
}

impl TryFrom<u64> for ChainId {
    type Error = InvalidChainIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChainId> for u64 {
    fn from(value: ChainId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid chain id: {value}")]
pub struct InvalidChainIdError {
    pub value: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ChainFamily {
    #[strum(serialize = "eip155")]
    Evm,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
