// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Terms, coefficients and constraints of a lowered system.

use ark_ff::Field;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Read, SerializationError, Write,
};

/// A coefficient of a curve-bound system.
///
/// The values `0`, `1`, `-1` and `2` are inlined, anything else points into
/// the coefficient table of the [`R1CS`](super::R1CS) it belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Coefficient {
    /// `0`
    Zero,
    /// `1`
    One,
    /// `2`
    Two,
    /// `-1`
    MinusOne,
    /// Index into the coefficient table.
    Table(usize),
}

impl Coefficient {
    /// Resolves the coefficient against `table`.
    pub fn value<F>(&self, table: &[F]) -> F
    where
        F: Field,
    {
        match self {
            Self::Zero => F::zero(),
            Self::One => F::one(),
            Self::Two => F::one().double(),
            Self::MinusOne => -F::one(),
            Self::Table(index) => table[*index],
        }
    }
}

/// `coeff · wire`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Term<C> {
    /// Wire index in the lowered layout.
    pub wire: usize,
    /// Coefficient, an integer before specialization.
    pub coeff: C,
}

impl<C> Term<C> {
    /// Creates a new term.
    pub fn new(wire: usize, coeff: C) -> Self {
        Self { wire, coeff }
    }
}

/// Tells the solver which wires a constraint determines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverHint {
    /// The constraint only checks already known wires.
    None,
    /// The wire is determined by every other term of the constraint.
    Output(usize),
    /// The wires are the little-endian bits of the value on `O`.
    BinaryDecomposition(Vec<usize>),
}

impl SolverHint {
    /// Iterates over the wires referenced by the hint.
    pub fn wires(&self) -> impl Iterator<Item = usize> + '_ {
        let wires: &[usize] = match self {
            Self::None => &[],
            Self::Output(wire) => core::slice::from_ref(wire),
            Self::BinaryDecomposition(bits) => bits,
        };
        wires.iter().copied()
    }
}

/// A rank-one constraint `L · R = O`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct R1C<C> {
    /// Left linear expression
    pub l: Vec<Term<C>>,
    /// Right linear expression
    pub r: Vec<Term<C>>,
    /// Output linear expression
    pub o: Vec<Term<C>>,
    /// Solver hint
    pub hint: SolverHint,
}

impl<C> R1C<C> {
    /// Iterates over every term of the constraint.
    pub fn terms(&self) -> impl Iterator<Item = &Term<C>> {
        self.l.iter().chain(&self.r).chain(&self.o)
    }
}

impl CanonicalSerialize for Coefficient {
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        match self {
            Self::Zero => 0u8.serialize(&mut writer),
            Self::One => 1u8.serialize(&mut writer),
            Self::Two => 2u8.serialize(&mut writer),
            Self::MinusOne => 3u8.serialize(&mut writer),
            Self::Table(index) => {
                4u8.serialize(&mut writer)?;
                (*index as u64).serialize(&mut writer)
            }
        }
    }

    fn serialized_size(&self) -> usize {
        match self {
            Self::Table(_) => 9,
            _ => 1,
        }
    }
}

impl CanonicalDeserialize for Coefficient {
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        match u8::deserialize(&mut reader)? {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::MinusOne),
            4 => Ok(Self::Table(u64::deserialize(&mut reader)? as usize)),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl<C> CanonicalSerialize for Term<C>
where
    C: CanonicalSerialize,
{
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        (self.wire as u64).serialize(&mut writer)?;
        self.coeff.serialize(&mut writer)
    }

    fn serialized_size(&self) -> usize {
        8 + self.coeff.serialized_size()
    }
}

impl<C> CanonicalDeserialize for Term<C>
where
    C: CanonicalDeserialize,
{
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        let wire = u64::deserialize(&mut reader)? as usize;
        let coeff = C::deserialize(&mut reader)?;
        Ok(Self { wire, coeff })
    }
}

impl CanonicalSerialize for SolverHint {
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        match self {
            Self::None => 0u8.serialize(&mut writer),
            Self::Output(wire) => {
                1u8.serialize(&mut writer)?;
                (*wire as u64).serialize(&mut writer)
            }
            Self::BinaryDecomposition(bits) => {
                2u8.serialize(&mut writer)?;
                let bits: Vec<u64> = bits.iter().map(|b| *b as u64).collect();
                bits.serialize(&mut writer)
            }
        }
    }

    fn serialized_size(&self) -> usize {
        match self {
            Self::None => 1,
            Self::Output(_) => 9,
            Self::BinaryDecomposition(bits) => 1 + 8 + 8 * bits.len(),
        }
    }
}

impl CanonicalDeserialize for SolverHint {
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        match u8::deserialize(&mut reader)? {
            0 => Ok(Self::None),
            1 => Ok(Self::Output(u64::deserialize(&mut reader)? as usize)),
            2 => {
                let bits = Vec::<u64>::deserialize(&mut reader)?;
                Ok(Self::BinaryDecomposition(
                    bits.into_iter().map(|b| b as usize).collect(),
                ))
            }
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl<C> CanonicalSerialize for R1C<C>
where
    C: CanonicalSerialize,
{
    fn serialize<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        self.l.serialize(&mut writer)?;
        self.r.serialize(&mut writer)?;
        self.o.serialize(&mut writer)?;
        self.hint.serialize(&mut writer)
    }

    fn serialized_size(&self) -> usize {
        self.l.serialized_size()
            + self.r.serialized_size()
            + self.o.serialized_size()
            + self.hint.serialized_size()
    }
}

impl<C> CanonicalDeserialize for R1C<C>
where
    C: CanonicalDeserialize,
{
    fn deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        Ok(Self {
            l: Vec::deserialize(&mut reader)?,
            r: Vec::deserialize(&mut reader)?,
            o: Vec::deserialize(&mut reader)?,
            hint: SolverHint::deserialize(&mut reader)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_bls12_381::Fr;
    use ark_ff::{One, Zero};

    #[test]
    fn special_coefficients_resolve_without_table() {
        let table: [Fr; 0] = [];
        assert_eq!(Coefficient::Zero.value(&table), Fr::zero());
        assert_eq!(Coefficient::One.value(&table), Fr::one());
        assert_eq!(Coefficient::Two.value(&table), Fr::from(2u64));
        assert_eq!(Coefficient::MinusOne.value(&table), -Fr::one());
        assert_eq!(
            Coefficient::Table(1).value(&[Fr::from(3u64), Fr::from(5u64)]),
            Fr::from(5u64)
        );
    }

    #[test]
    fn constraint_survives_serialization() {
        let constraint = R1C {
            l: vec![Term::new(1, Coefficient::Two)],
            r: vec![
                Term::new(0, Coefficient::One),
                Term::new(2, Coefficient::Table(7)),
            ],
            o: vec![],
            hint: SolverHint::BinaryDecomposition(vec![3, 4, 5]),
        };
        let mut bytes = Vec::new();
        constraint.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), constraint.serialized_size());
        assert_eq!(R1C::deserialize(bytes.as_slice()).unwrap(), constraint);
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(Coefficient::deserialize([9u8].as_slice()).is_err());
        assert!(SolverHint::deserialize([3u8].as_slice()).is_err());
    }

    #[test]
    fn hint_wires() {
        assert_eq!(SolverHint::None.wires().count(), 0);
        assert_eq!(SolverHint::Output(4).wires().collect::<Vec<_>>(), vec![4]);
        let bits = SolverHint::BinaryDecomposition(vec![1, 2]);
        assert_eq!(bits.wires().collect::<Vec<_>>(), vec![1, 2]);
    }
}
