// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use ark_ff::{BigInteger, PrimeField};
use num_bigint::{BigInt, Sign};

/// Reduces a signed integer into the field, negative values wrapping around
/// the modulus.
pub(crate) fn field_from_bigint<F>(value: &BigInt) -> F
where
    F: PrimeField,
{
    let (sign, magnitude) = value.to_bytes_le();
    let element = F::from_le_bytes_mod_order(&magnitude);
    match sign {
        Sign::Minus => -element,
        _ => element,
    }
}

/// Little-endian bits of the canonical representative of `value`.
pub(crate) fn bits_le<F>(value: &F) -> Vec<bool>
where
    F: PrimeField,
{
    value.into_repr().to_bits_le()
}
