// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! This module holds the components needed in the Constraint System.
//!
//! The components used are Variables, the linear combinations built on top
//! of them and the Operands accepted by the arithmetic API.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// The value is a reference to a wire that was added to the constraint
/// system. Wire `0` is the constant-one wire every system reserves.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Returns the wire id of the variable.
    pub fn id(&self) -> usize {
        self.0
    }
}

/// How a wire came into existence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WireKind {
    /// The constant-one wire
    One,
    /// Public input
    Public,
    /// Secret input
    Secret,
    /// Wire allocated as a side effect of a gate
    Internal,
}

impl WireKind {
    pub(crate) fn is_input(self) -> bool {
        matches!(self, Self::Public | Self::Secret)
    }
}

/// A linear combination `Σ cᵢ·wᵢ` with signed integer coefficients.
///
/// A constant `c` is written as `c` times the one wire of the system it is
/// used in (see [`ConstraintSystem::one`](super::ConstraintSystem::one)).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LinearCombination {
    pub(crate) terms: Vec<(Variable, BigInt)>,
}

impl LinearCombination {
    /// Creates an empty combination, which evaluates to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the term `coeff·variable`.
    pub fn with_term<C>(mut self, variable: Variable, coeff: C) -> Self
    where
        C: Into<BigInt>,
    {
        self.push(variable, coeff);
        self
    }

    /// Appends the term `coeff·variable` in place.
    pub fn push<C>(&mut self, variable: Variable, coeff: C)
    where
        C: Into<BigInt>,
    {
        self.terms.push((variable, coeff.into()));
    }

    /// Returns the terms in insertion order.
    pub fn terms(&self) -> &[(Variable, BigInt)] {
        &self.terms
    }

    /// Returns `true` when the combination has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiplies every coefficient by `factor`.
    pub(crate) fn scale(&self, factor: &BigInt) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(v, c)| (*v, c * factor))
                .collect(),
        }
    }

    /// Appends every term of `other`, scaled by `factor`.
    pub(crate) fn extend_scaled(&mut self, other: &Self, factor: &BigInt) {
        self.terms
            .extend(other.terms.iter().map(|(v, c)| (*v, c * factor)));
    }

    /// Returns the value of the combination if it only refers to `one`.
    pub(crate) fn constant_value(&self, one: Variable) -> Option<BigInt> {
        self.terms
            .iter()
            .try_fold(BigInt::zero(), |acc, (v, c)| {
                (*v == one).then(|| acc + c)
            })
    }

    /// Returns the variable if the combination is exactly `1·variable`.
    pub(crate) fn as_variable(&self) -> Option<Variable> {
        match self.terms.as_slice() {
            [(v, c)] if c.is_one() => Some(*v),
            _ => None,
        }
    }
}

impl From<Variable> for LinearCombination {
    fn from(variable: Variable) -> Self {
        Self::new().with_term(variable, 1)
    }
}

/// The closed set of values accepted by the arithmetic API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    /// A wire
    Variable(Variable),
    /// A linear combination of wires
    LinearCombination(LinearCombination),
    /// An integer constant, reduced into the field at specialization
    Constant(BigInt),
}

impl Operand {
    /// Returns `true` if the operand is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl From<Variable> for Operand {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<&Variable> for Operand {
    fn from(variable: &Variable) -> Self {
        Self::Variable(*variable)
    }
}

impl From<LinearCombination> for Operand {
    fn from(lc: LinearCombination) -> Self {
        Self::LinearCombination(lc)
    }
}

impl From<BigInt> for Operand {
    fn from(value: BigInt) -> Self {
        Self::Constant(value)
    }
}

impl From<&BigInt> for Operand {
    fn from(value: &BigInt) -> Self {
        Self::Constant(value.clone())
    }
}

macro_rules! impl_operand_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Self::Constant(BigInt::from(value))
                }
            }
        )*
    };
}

impl_operand_from_int!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constant_value_only_for_one_wire_terms() {
        let one = Variable(0);
        let x = Variable(3);
        let lc = LinearCombination::new()
            .with_term(one, 4)
            .with_term(one, -1);
        assert_eq!(lc.constant_value(one), Some(BigInt::from(3)));
        assert_eq!(lc.with_term(x, 1).constant_value(one), None);
        assert_eq!(
            LinearCombination::new().constant_value(one),
            Some(BigInt::zero())
        );
    }

    #[test]
    fn single_unit_term_is_a_variable() {
        let x = Variable(2);
        assert_eq!(LinearCombination::from(x).as_variable(), Some(x));
        assert_eq!(
            LinearCombination::new().with_term(x, 2).as_variable(),
            None
        );
    }

    #[test]
    fn scaling_multiplies_every_coefficient() {
        let lc = LinearCombination::new()
            .with_term(Variable(1), 2)
            .with_term(Variable(2), -3)
            .scale(&BigInt::from(5));
        assert_eq!(
            lc.terms(),
            &[
                (Variable(1), BigInt::from(10)),
                (Variable(2), BigInt::from(-15))
            ]
        );
    }

    #[test]
    fn integers_become_constants() {
        assert_eq!(Operand::from(7u8), Operand::Constant(BigInt::from(7)));
        assert_eq!(Operand::from(-2i64), Operand::Constant(BigInt::from(-2)));
        assert!(!Operand::from(Variable(1)).is_constant());
    }
}
