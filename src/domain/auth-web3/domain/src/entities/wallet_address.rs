// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::Address;
use thiserror::Error;

use crate::{ChainFamily, ChainId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EVM_ADDRESS_HEX_LEN: usize = 40;

/// Canonical wallet address.
///
/// Values can only be produced by [`AddressCodec`], so holding a
/// [`WalletAddress`] means the address was validated and brought to its
/// canonical form. Equality is byte-wise, clients' casing plays no role.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalletAddress(Address);

impl WalletAddress {
    pub fn as_address(&self) -> &Address {
        &self.0
    }

    /// EIP-55 mixed-case representation with `0x` prefix
    pub fn to_checksummed(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksummed())
    }
}

impl std::fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletAddress({self})")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The natural key of every wallet-scoped record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WalletKey {
    pub address: WalletAddress,
    pub chain_id: ChainId,
}

impl WalletKey {
    pub fn new(address: WalletAddress, chain_id: ChainId) -> Self {
        Self { address, chain_id }
    }

    /// Parses and normalizes a client-supplied address for the given chain
    pub fn parse(raw_address: &str, chain_id: ChainId) -> Result<Self, InvalidAddressError> {
        let address = AddressCodec::normalize(raw_address, chain_id)?;
        Ok(Self { address, chain_id })
    }
}

/// CAIP-10 account id, e.g. `eip155:1:0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B`
impl std::fmt::Display for WalletKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.chain_id.family(),
            self.chain_id,
            self.address
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The single gate every client-supplied address passes through before it is
/// stored or compared
pub struct AddressCodec;

impl AddressCodec {
    pub fn normalize(raw: &str, chain_id: ChainId) -> Result<WalletAddress, InvalidAddressError> {
        match chain_id.family() {
            ChainFamily::Evm => Self::normalize_evm(raw),
        }
    }

    /// Wraps an address that came out of signature recovery
    pub fn from_recovered(address: Address) -> WalletAddress {
        WalletAddress(address)
    }

    fn normalize_evm(raw: &str) -> Result<WalletAddress, InvalidAddressError> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);

        if digits.len() != EVM_ADDRESS_HEX_LEN {
            return Err(InvalidAddressError::BadLength {
                value: raw.to_string(),
                actual: digits.len(),
            });
        }

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidAddressError::NotHex {
                value: raw.to_string(),
            });
        }

        let mut bytes = [0u8; 20];
        alloy_primitives::hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
            InvalidAddressError::NotHex {
                value: raw.to_string(),
            }
        })?;
        let address = Address::from(bytes);

        // Single-case input carries no checksum information, mixed case must
        // be a valid EIP-55 encoding
        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            let checksummed = address.to_checksum(None);
            if checksummed[2..] != *digits {
                return Err(InvalidAddressError::BadChecksum {
                    value: raw.to_string(),
                });
            }
        }

        Ok(WalletAddress(address))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAddressError {
    #[error("Invalid address '{value}': expected 40 hex digits, got {actual}")]
    BadLength { value: String, actual: usize },

    #[error("Invalid address '{value}': not a hex string")]
    NotHex { value: String },

    #[error("Invalid address '{value}': checksum mismatch")]
    BadChecksum { value: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
