// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rand::distributions::{Alphanumeric, DistString, Uniform};
use rand::rngs::OsRng;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ASCII_SYMBOLS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&*+-=?@^_~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedSymbols {
    /// `[A-Za-z0-9]`
    Alphanumeric,
    /// Alphanumeric plus a set of punctuation that is safe in headers and
    /// environment variables
    AsciiSymbols,
}

/// Generates a random string from the OS entropy source.
///
/// Every symbol is drawn independently, so an alphanumeric string of length
/// `n` carries `n * log2(62)` bits of entropy.
pub fn get_random_string(prefix: Option<&str>, length: usize, symbols: &AllowedSymbols) -> String {
    let mut result = String::with_capacity(prefix.map_or(0, str::len) + length);

    if let Some(prefix) = prefix {
        result.push_str(prefix);
    }

    match symbols {
        AllowedSymbols::Alphanumeric => {
            Alphanumeric.append_string(&mut OsRng, &mut result, length);
        }
        AllowedSymbols::AsciiSymbols => {
            let distribution = Uniform::from(0..ASCII_SYMBOLS.len());
            result.extend(
                rand::Rng::sample_iter(OsRng, distribution)
                    .take(length)
                    .map(|i| char::from(ASCII_SYMBOLS[i])),
            );
        }
    }

    result
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
