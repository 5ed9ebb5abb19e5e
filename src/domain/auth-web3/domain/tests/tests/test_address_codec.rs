// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use erp_auth_web3::{AddressCodec, ChainId, IdentityId, InvalidAddressError, WalletKey};
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const CHECKSUMMED: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const LOWER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
const UPPER: &str = "0XF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266";

fn mainnet() -> ChainId {
    ChainId::ETHEREUM_MAINNET
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_case_variants_normalize_identically() {
    let from_checksummed = AddressCodec::normalize(CHECKSUMMED, mainnet()).unwrap();
    let from_lower = AddressCodec::normalize(LOWER, mainnet()).unwrap();
    let from_upper = AddressCodec::normalize(UPPER, mainnet()).unwrap();
    let without_prefix = AddressCodec::normalize(&LOWER[2..], mainnet()).unwrap();

    assert_eq!(from_checksummed, from_lower);
    assert_eq!(from_checksummed, from_upper);
    assert_eq!(from_checksummed, without_prefix);
    assert_eq!(from_lower.to_string(), CHECKSUMMED);
}

#[test]
fn test_normalize_is_idempotent() {
    for raw in [
        CHECKSUMMED,
        LOWER,
        UPPER,
        "0x0000000000000000000000000000000000000000",
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        "0xde709f2102306220921060314715629080e2fb77",
    ] {
        let once = AddressCodec::normalize(raw, mainnet()).unwrap();
        let twice = AddressCodec::normalize(&once.to_string(), mainnet()).unwrap();

        assert_eq!(once, twice, "{raw}");
        assert_eq!(once.to_string(), twice.to_string(), "{raw}");
    }
}

#[test]
fn test_known_checksums() {
    // Reference vectors from EIP-55
    for expected in [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ] {
        let normalized = AddressCodec::normalize(&expected.to_lowercase(), mainnet()).unwrap();
        assert_eq!(normalized.to_string(), expected);
    }
}

#[test]
fn test_bad_mixed_case_checksum_is_rejected() {
    // Flipped case of a single letter
    let tampered = "0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    assert_eq!(
        AddressCodec::normalize(tampered, mainnet()),
        Err(InvalidAddressError::BadChecksum {
            value: tampered.to_string()
        })
    );
}

#[test]
fn test_malformed_inputs_are_rejected() {
    assert!(matches!(
        AddressCodec::normalize("0x1234", mainnet()),
        Err(InvalidAddressError::BadLength { actual: 4, .. })
    ));
    assert!(matches!(
        AddressCodec::normalize("", mainnet()),
        Err(InvalidAddressError::BadLength { actual: 0, .. })
    ));
    assert!(matches!(
        AddressCodec::normalize("0xg39fd6e51aad88f6f4ce6ab8827279cfffb92266", mainnet()),
        Err(InvalidAddressError::NotHex { .. })
    ));
    assert!(matches!(
        AddressCodec::normalize(" 0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266", mainnet()),
        Err(InvalidAddressError::BadLength { .. })
    ));
}

#[test]
fn test_wallet_key_display_and_identity() {
    let key = WalletKey::parse(LOWER, ChainId::new(137).unwrap()).unwrap();

    assert_eq!(
        key.to_string(),
        "eip155:137:0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
    );
    assert_eq!(
        IdentityId::for_wallet(&key).as_ref(),
        "did:pkh:eip155:137:0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
    );
}

#[test]
fn test_chain_id_zero_is_rejected() {
    assert!(ChainId::new(0).is_err());
    assert!(serde_json::from_str::<ChainId>("0").is_err());
    assert_eq!(serde_json::from_str::<ChainId>("1").unwrap(), mainnet());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
