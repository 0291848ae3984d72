// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Parameters for a compilation target

use ark_ec::PairingEngine;
use ark_ff::PrimeField;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Read, SerializationError, Write,
};
use core::fmt;

/// Identifier of the curve whose scalar field a system is specialized to.
///
/// [`CurveId::Unknown`] requests the generic, field-agnostic artifact.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CurveId {
    /// No field, coefficients stay arbitrary-precision integers.
    Unknown,
    /// BLS12-381
    Bls12_381,
    /// BLS12-377
    Bls12_377,
    /// BN254
    Bn254,
    /// BW6-761
    Bw6_761,
}

impl CurveId {
    fn to_u8(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Bls12_381 => 1,
            Self::Bls12_377 => 2,
            Self::Bn254 => 3,
            Self::Bw6_761 => 4,
        }
    }

    fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Unknown),
            1 => Some(Self::Bls12_381),
            2 => Some(Self::Bls12_377),
            3 => Some(Self::Bn254),
            4 => Some(Self::Bw6_761),
            _ => None,
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Bls12_381 => "bls12_381",
            Self::Bls12_377 => "bls12_377",
            Self::Bn254 => "bn254",
            Self::Bw6_761 => "bw6_761",
        };
        f.write_str(name)
    }
}

impl CanonicalSerialize for CurveId {
    fn serialize<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), SerializationError> {
        self.to_u8().serialize(writer)
    }

    fn serialized_size(&self) -> usize {
        1
    }
}

impl CanonicalDeserialize for CurveId {
    fn deserialize<R: Read>(reader: R) -> Result<Self, SerializationError> {
        Self::from_u8(u8::deserialize(reader)?)
            .ok_or(SerializationError::InvalidData)
    }
}

/// Binds a [`CurveId`] to the arkworks pairing engine whose scalar field the
/// constraints are written over.
pub trait CurveParameters {
    /// Curve identifier recorded in the specialized system.
    const ID: CurveId;

    /// Scalar field of the curve.
    type ScalarField: PrimeField;

    /// Pairing engine the scalar field belongs to.
    type Engine: PairingEngine<Fr = Self::ScalarField>;
}

macro_rules! curve_parameters {
    ($(#[$doc:meta])* $name:ident, $id:expr, $engine:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
        pub struct $name;

        impl CurveParameters for $name {
            const ID: CurveId = $id;
            type ScalarField = <$engine as PairingEngine>::Fr;
            type Engine = $engine;
        }
    };
}

curve_parameters!(
    /// Scalar field of BLS12-381.
    Bls12_381,
    CurveId::Bls12_381,
    ark_bls12_381::Bls12_381
);
curve_parameters!(
    /// Scalar field of BLS12-377.
    Bls12_377,
    CurveId::Bls12_377,
    ark_bls12_377::Bls12_377
);
curve_parameters!(
    /// Scalar field of BN254.
    Bn254,
    CurveId::Bn254,
    ark_bn254::Bn254
);
curve_parameters!(
    /// Scalar field of BW6-761.
    Bw6_761,
    CurveId::Bw6_761,
    ark_bw6_761::BW6_761
);
