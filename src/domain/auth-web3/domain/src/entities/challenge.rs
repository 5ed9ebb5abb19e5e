// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use random_strings::{AllowedSymbols, get_random_string};
use regex::Regex;

use crate::WalletKey;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// 32 symbols of `[A-Za-z0-9]` give ~190 bits of entropy
pub const CHALLENGE_NONCE_LENGTH: usize = 32;

static CHALLENGE_NONCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]{16,128}$").unwrap());

#[nutype::nutype(
    sanitize(trim),
    validate(regex = CHALLENGE_NONCE_REGEX),
    derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Hash, TryFrom)
)]
pub struct ChallengeNonce(String);

impl ChallengeNonce {
    pub fn generate() -> Self {
        Self::try_new(get_random_string(
            None,
            CHALLENGE_NONCE_LENGTH,
            &AllowedSymbols::Alphanumeric,
        ))
        .expect("Invalid nonce generated")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One-time login challenge. At most one is outstanding per wallet key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub wallet: WalletKey,
    pub nonce: ChallengeNonce,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl Challenge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
