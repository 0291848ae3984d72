// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Forward witness solver.
//!
//! Constraints are visited in emission order. Each one determines the wires
//! named by its [`SolverHint`] out of already known wires and is then
//! checked.

use super::{Coefficient, SolverHint, Term, R1C, R1CS, ONE_WIRE};
use crate::circuit::Assignment;
use crate::error::Error;
use crate::util::{bits_le, field_from_bigint};
use ark_ff::{Field, PrimeField, Zero};
use core::iter;
use hashbrown::HashMap;

impl<F> R1CS<F>
where
    F: PrimeField,
{
    /// Computes the value of every wire out of the input values in
    /// `assignment`, checking each constraint along the way.
    ///
    /// Inputs left out of `assignment` are accepted as long as some
    /// constraint determines them.
    pub fn solve(&self, assignment: &Assignment) -> Result<Vec<F>, Error> {
        let span = tracing::debug_span!(
            "solve",
            curve = %self.curve,
            constraints = self.constraints.len()
        );
        let _enter = span.enter();

        let mut solver = Solver::new(self, assignment)?;
        for (index, constraint) in self.constraints.iter().enumerate() {
            solver.solve(index, constraint)?;
        }
        solver.finish()
    }

    /// Solves the system and returns the values of the tagged wires, along
    /// with the values of the inputs if `show_inputs` is set.
    pub fn inspect(
        &self,
        assignment: &Assignment,
        show_inputs: bool,
    ) -> Result<HashMap<String, F>, Error> {
        let values = self.solve(assignment)?;
        let mut inspected: HashMap<String, F> = self
            .layout
            .tags
            .iter()
            .map(|(label, wire)| (label.clone(), values[*wire]))
            .collect();
        if show_inputs {
            for (wire, name) in self.input_names().skip(1) {
                inspected.insert(name.to_owned(), values[wire]);
            }
        }
        Ok(inspected)
    }

    /// `(wire, name)` of every input, the one wire first.
    fn input_names(&self) -> impl Iterator<Item = (usize, &str)> {
        self.layout
            .public_names
            .iter()
            .chain(&self.layout.private_names)
            .map(String::as_str)
            .enumerate()
    }
}

struct Solver<'a, F>
where
    F: PrimeField,
{
    r1cs: &'a R1CS<F>,
    values: Vec<Option<F>>,
}

impl<'a, F> Solver<'a, F>
where
    F: PrimeField,
{
    fn new(r1cs: &'a R1CS<F>, assignment: &Assignment) -> Result<Self, Error> {
        let mut values = vec![None; r1cs.layout.nb_wires];
        values[ONE_WIRE] = Some(F::one());

        let inputs: HashMap<&str, usize> = r1cs
            .input_names()
            .skip(1)
            .map(|(wire, name)| (name, wire))
            .collect();
        for (name, value) in assignment {
            let wire = inputs.get(name.as_str()).ok_or_else(|| {
                Error::UnknownInput {
                    name: name.clone(),
                }
            })?;
            values[*wire] = Some(field_from_bigint(value));
        }
        Ok(Self { r1cs, values })
    }

    fn finish(self) -> Result<Vec<F>, Error> {
        let layout = &self.r1cs.layout;
        self.values
            .into_iter()
            .enumerate()
            .map(|(wire, value)| {
                value.ok_or_else(|| Error::MissingAssignment {
                    name: layout
                        .input_name(wire)
                        .map(str::to_owned)
                        .unwrap_or_else(|| format!("wire #{}", wire)),
                })
            })
            .collect()
    }

    fn solve(
        &mut self,
        index: usize,
        constraint: &R1C<Coefficient>,
    ) -> Result<(), Error> {
        match &constraint.hint {
            SolverHint::Output(wire) if self.values[*wire].is_none() => {
                self.solve_output(index, constraint, *wire)?
            }
            SolverHint::BinaryDecomposition(bits) => {
                self.solve_bits(index, constraint, bits)?
            }
            _ => {}
        }
        self.check(index, constraint)
    }

    /// Writes each side as `k + c·wire` and solves
    /// `(l0 + l1·w)·(r0 + r1·w) = o0 + o1·w` for `w`, which is linear as long
    /// as `w` does not sit on both `L` and `R`.
    fn solve_output(
        &mut self,
        index: usize,
        constraint: &R1C<Coefficient>,
        wire: usize,
    ) -> Result<(), Error> {
        let (l0, l1) = self.split(index, &constraint.l, wire)?;
        let (r0, r1) = self.split(index, &constraint.r, wire)?;
        let (o0, o1) = self.split(index, &constraint.o, wire)?;
        if !l1.is_zero() && !r1.is_zero() {
            return Err(Error::UnsolvableConstraint { index });
        }
        let multiplier = l1 * r0 + l0 * r1 - o1;
        let inverse = multiplier
            .inverse()
            .ok_or(Error::DivisionByZero { index })?;
        self.values[wire] = Some((o0 - l0 * r0) * inverse);
        Ok(())
    }

    fn solve_bits(
        &mut self,
        index: usize,
        constraint: &R1C<Coefficient>,
        bits: &[usize],
    ) -> Result<(), Error> {
        let value = self.evaluate(index, &constraint.o)?;
        let decomposition =
            bits_le(&value).into_iter().chain(iter::repeat(false));
        for (wire, bit) in bits.iter().zip(decomposition) {
            if self.values[*wire].is_none() {
                self.values[*wire] =
                    Some(if bit { F::one() } else { F::zero() });
            }
        }
        Ok(())
    }

    fn check(
        &self,
        index: usize,
        constraint: &R1C<Coefficient>,
    ) -> Result<(), Error> {
        let l = self.evaluate(index, &constraint.l)?;
        let r = self.evaluate(index, &constraint.r)?;
        let o = self.evaluate(index, &constraint.o)?;
        if l * r != o {
            tracing::trace!(index, %l, %r, %o, "unsatisfied constraint");
            return Err(Error::UnsatisfiedConstraint { index });
        }
        Ok(())
    }

    fn coeff(&self, term: &Term<Coefficient>) -> F {
        term.coeff.value(&self.r1cs.coefficients)
    }

    fn value(&self, index: usize, wire: usize) -> Result<F, Error> {
        self.values[wire].ok_or_else(|| {
            match self.r1cs.layout.input_name(wire) {
                Some(name) => Error::MissingAssignment {
                    name: name.to_owned(),
                },
                None => Error::UnsolvableConstraint { index },
            }
        })
    }

    fn evaluate(
        &self,
        index: usize,
        terms: &[Term<Coefficient>],
    ) -> Result<F, Error> {
        terms.iter().try_fold(F::zero(), |acc, term| {
            Ok(acc + self.coeff(term) * self.value(index, term.wire)?)
        })
    }

    /// Splits `terms` into the sum of the known terms and the coefficient of
    /// `wire`.
    fn split(
        &self,
        index: usize,
        terms: &[Term<Coefficient>],
        wire: usize,
    ) -> Result<(F, F), Error> {
        let mut known = F::zero();
        let mut coeff = F::zero();
        for term in terms {
            if term.wire == wire {
                coeff += self.coeff(term);
            } else {
                known += self.coeff(term) * self.value(index, term.wire)?;
            }
        }
        Ok((known, coeff))
    }
}
