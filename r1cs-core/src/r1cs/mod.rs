// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Rank-1 constraint systems.
//!
//! A [`ConstraintSystem`](crate::constraint_system::ConstraintSystem) is
//! lowered into an [`UntypedR1CS`], whose coefficients are signed integers
//! and which is therefore valid for any field. Specializing it for a curve
//! yields an [`R1CS`] over that curve's scalar field, ready to be solved or
//! saved.
//!
//! Both share the same wire layout: wire `0` is the public constant one
//! (named [`ONE_WIRE_NAME`]), followed by the public inputs in declaration
//! order, the secret inputs, the internal wires in creation order and
//! finally the auxiliary wires introduced by lowering.

mod lowering;
mod solver;
mod specialize;
mod term;

pub use term::{Coefficient, SolverHint, Term, R1C};

use crate::parameters::CurveId;
use ark_ff::PrimeField;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Read, SerializationError, Write,
};
use num_bigint::BigInt;

/// Index of the constant-one wire.
pub const ONE_WIRE: usize = 0;

/// Public name of the constant-one wire.
pub const ONE_WIRE_NAME: &str = "ONE_WIRE";

/// Wire counts, input names and tags of a lowered system.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct WireLayout {
    pub(crate) nb_wires: usize,
    pub(crate) nb_public_wires: usize,
    pub(crate) nb_private_wires: usize,
    pub(crate) public_names: Vec<String>,
    pub(crate) private_names: Vec<String>,
    pub(crate) tags: Vec<(String, usize)>,
}

impl WireLayout {
    /// Name of `wire` if it is an input.
    pub(crate) fn input_name(&self, wire: usize) -> Option<&str> {
        if wire < self.nb_public_wires {
            Some(&self.public_names[wire])
        } else if wire < self.nb_public_wires + self.nb_private_wires {
            Some(&self.private_names[wire - self.nb_public_wires])
        } else {
            None
        }
    }

    fn check(&self) -> Result<(), SerializationError> {
        let consistent = self.nb_public_wires >= 1
            && self.public_names.len() == self.nb_public_wires
            && self.private_names.len() == self.nb_private_wires
            && self.nb_public_wires + self.nb_private_wires <= self.nb_wires
            && self.tags.iter().all(|(_, wire)| *wire < self.nb_wires);
        match consistent {
            true => Ok(()),
            false => Err(SerializationError::InvalidData),
        }
    }
}

macro_rules! layout_accessors {
    () => {
        /// Returns the total number of wires, the one wire included.
        pub fn nb_wires(&self) -> usize {
            self.layout.nb_wires
        }

        /// Returns the number of public wires, the one wire included.
        pub fn nb_public_wires(&self) -> usize {
            self.layout.nb_public_wires
        }

        /// Returns the number of secret input wires.
        pub fn nb_private_wires(&self) -> usize {
            self.layout.nb_private_wires
        }

        /// Returns the names of the public wires, [`ONE_WIRE_NAME`] first.
        pub fn public_names(&self) -> &[String] {
            &self.layout.public_names
        }

        /// Returns the names of the secret input wires.
        pub fn private_names(&self) -> &[String] {
            &self.layout.private_names
        }

        /// Returns the `(label, wire)` tags in registration order.
        pub fn tags(&self) -> &[(String, usize)] {
            &self.layout.tags
        }

        /// Returns the number of constraints.
        pub fn nb_constraints(&self) -> usize {
            self.constraints.len()
        }
    };
}

/// A lowered system whose coefficients are arbitrary-precision integers.
///
/// It is not bound to any field and can be specialized any number of times
/// with [`UntypedR1CS::specialize`]. It cannot be saved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UntypedR1CS {
    pub(crate) layout: WireLayout,
    pub(crate) constraints: Vec<R1C<BigInt>>,
}

impl UntypedR1CS {
    layout_accessors!();

    /// Returns the constraints in emission order.
    pub fn constraints(&self) -> &[R1C<BigInt>] {
        &self.constraints
    }
}

/// A lowered system over the scalar field `F` of the curve it was
/// specialized for.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = ""),
    Eq(bound = ""),
    PartialEq(bound = "")
)]
pub struct R1CS<F>
where
    F: PrimeField,
{
    pub(crate) curve: CurveId,
    pub(crate) layout: WireLayout,
    /// Deduplicated coefficients referenced by [`Coefficient::Table`].
    pub(crate) coefficients: Vec<F>,
    pub(crate) constraints: Vec<R1C<Coefficient>>,
}

impl<F> R1CS<F>
where
    F: PrimeField,
{
    layout_accessors!();

    /// Returns the curve the system was specialized for.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Returns the coefficient table.
    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// Returns the constraints in emission order.
    pub fn constraints(&self) -> &[R1C<Coefficient>] {
        &self.constraints
    }

    fn check(&self) -> Result<(), SerializationError> {
        self.layout.check()?;
        let nb_wires = self.layout.nb_wires;
        let nb_coefficients = self.coefficients.len();
        let consistent = self.constraints.iter().all(|constraint| {
            constraint.terms().all(|term| {
                term.wire < nb_wires
                    && match term.coeff {
                        Coefficient::Table(index) => index < nb_coefficients,
                        _ => true,
                    }
            }) && constraint.hint.wires().all(|wire| wire < nb_wires)
        });
        match consistent {
            true => Ok(()),
            false => Err(SerializationError::InvalidData),
        }
    }
}

fn serialize_string<W: Write>(
    value: &str,
    writer: W,
) -> Result<(), SerializationError> {
    value.as_bytes().to_vec().serialize(writer)
}

fn deserialize_string<R: Read>(
    reader: R,
) -> Result<String, SerializationError> {
    String::from_utf8(Vec::<u8>::deserialize(reader)?)
        .map_err(|_| SerializationError::InvalidData)
}

fn serialize_strings<W: Write>(
    values: &[String],
    mut writer: W,
) -> Result<(), SerializationError> {
    (values.len() as u64).serialize(&mut writer)?;
    values
        .iter()
        .try_for_each(|value| serialize_string(value, &mut writer))
}

fn deserialize_strings<R: Read>(
    mut reader: R,
) -> Result<Vec<String>, SerializationError> {
    let len = u64::deserialize(&mut reader)?;
    (0..len).map(|_| deserialize_string(&mut reader)).collect()
}

fn strings_size(values: &[String]) -> usize {
    8 + values.iter().map(|value| 8 + value.len()).sum::<usize>()
}

impl CanonicalSerialize for WireLayout {
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        (self.nb_wires as u64).serialize(&mut writer)?;
        (self.nb_public_wires as u64).serialize(&mut writer)?;
        (self.nb_private_wires as u64).serialize(&mut writer)?;
        serialize_strings(&self.public_names, &mut writer)?;
        serialize_strings(&self.private_names, &mut writer)?;
        (self.tags.len() as u64).serialize(&mut writer)?;
        for (label, wire) in &self.tags {
            serialize_string(label, &mut writer)?;
            (*wire as u64).serialize(&mut writer)?;
        }
        Ok(())
    }

    fn serialized_size(&self) -> usize {
        24 + strings_size(&self.public_names)
            + strings_size(&self.private_names)
            + 8
            + self
                .tags
                .iter()
                .map(|(label, _)| 16 + label.len())
                .sum::<usize>()
    }
}

impl CanonicalDeserialize for WireLayout {
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        let nb_wires = u64::deserialize(&mut reader)? as usize;
        let nb_public_wires = u64::deserialize(&mut reader)? as usize;
        let nb_private_wires = u64::deserialize(&mut reader)? as usize;
        let public_names = deserialize_strings(&mut reader)?;
        let private_names = deserialize_strings(&mut reader)?;
        let nb_tags = u64::deserialize(&mut reader)?;
        let tags = (0..nb_tags)
            .map(|_| -> Result<_, SerializationError> {
                let label = deserialize_string(&mut reader)?;
                let wire = u64::deserialize(&mut reader)? as usize;
                Ok((label, wire))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            nb_wires,
            nb_public_wires,
            nb_private_wires,
            public_names,
            private_names,
            tags,
        })
    }
}

impl<F> CanonicalSerialize for R1CS<F>
where
    F: PrimeField,
{
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        self.curve.serialize(&mut writer)?;
        self.layout.serialize(&mut writer)?;
        self.coefficients.serialize(&mut writer)?;
        self.constraints.serialize(&mut writer)
    }

    fn serialized_size(&self) -> usize {
        self.curve.serialized_size()
            + self.layout.serialized_size()
            + self.coefficients.serialized_size()
            + self.constraints.serialized_size()
    }
}

impl<F> CanonicalDeserialize for R1CS<F>
where
    F: PrimeField,
{
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        let r1cs = Self {
            curve: CurveId::deserialize(&mut reader)?,
            layout: WireLayout::deserialize(&mut reader)?,
            coefficients: Vec::deserialize(&mut reader)?,
            constraints: Vec::deserialize(&mut reader)?,
        };
        r1cs.check()?;
        Ok(r1cs)
    }
}
