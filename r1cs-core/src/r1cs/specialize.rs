// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Specialization of a generic system for the scalar field of a curve.

use super::{Coefficient, Term, UntypedR1CS, R1C, R1CS};
use crate::parameters::CurveParameters;
use crate::util::field_from_bigint;
use ark_ff::{BigInteger, One, PrimeField};
use indexmap::IndexMap;
use num_bigint::BigInt;

/// Deduplicated field coefficients, keyed by the little-endian bytes of their
/// canonical representative. The first occurrence of a value fixes its
/// index.
pub(crate) struct CoefficientTable<F>
where
    F: PrimeField,
{
    values: IndexMap<Vec<u8>, F>,
    minus_one: F,
    two: F,
}

impl<F> CoefficientTable<F>
where
    F: PrimeField,
{
    pub(crate) fn new() -> Self {
        Self {
            values: IndexMap::new(),
            minus_one: -F::one(),
            two: F::one().double(),
        }
    }

    /// Reduces `value` into the field and returns its coefficient, inlining
    /// `0`, `1`, `-1` and `2`.
    pub(crate) fn intern(&mut self, value: &BigInt) -> Coefficient {
        let element: F = field_from_bigint(value);
        if element.is_zero() {
            Coefficient::Zero
        } else if element.is_one() {
            Coefficient::One
        } else if element == self.minus_one {
            Coefficient::MinusOne
        } else if element == self.two {
            Coefficient::Two
        } else {
            let key = element.into_repr().to_bytes_le();
            let (index, _) = self.values.insert_full(key, element);
            Coefficient::Table(index)
        }
    }

    fn terms(&mut self, terms: &[Term<BigInt>]) -> Vec<Term<Coefficient>> {
        terms
            .iter()
            .map(|term| Term::new(term.wire, self.intern(&term.coeff)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn into_values(self) -> Vec<F> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }
}

impl UntypedR1CS {
    /// Rewrites every coefficient into the scalar field of `P`.
    ///
    /// The constraint count, the wires and the solver hints are unchanged.
    /// Each call builds its own coefficient table, so concurrent
    /// specializations of one system do not interfere.
    pub fn specialize<P>(&self) -> R1CS<P::ScalarField>
    where
        P: CurveParameters,
    {
        let span = tracing::debug_span!("specialize", curve = %P::ID);
        let _enter = span.enter();

        let mut table = CoefficientTable::<P::ScalarField>::new();
        let constraints: Vec<R1C<Coefficient>> = self
            .constraints
            .iter()
            .map(|constraint| R1C {
                l: table.terms(&constraint.l),
                r: table.terms(&constraint.r),
                o: table.terms(&constraint.o),
                hint: constraint.hint.clone(),
            })
            .collect();

        tracing::debug!(
            constraints = constraints.len(),
            coefficients = table.len(),
            "specialized constraint system"
        );
        R1CS {
            curve: P::ID,
            layout: self.layout.clone(),
            coefficients: table.into_values(),
            constraints,
        }
    }
}
