// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Simple Arithmetic Gates

use crate::constraint_system::{
    ConstraintSystem, Expression, LinearCombination, Operand, Variable,
};
use num_bigint::BigInt;
use num_traits::{One, Zero};

impl ConstraintSystem {
    /// Returns a wire holding `a + b`.
    pub fn add<A, B>(&mut self, a: A, b: B) -> Variable
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        self.sum([a.into(), b.into()])
    }

    /// Returns a wire holding the sum of every operand. Constants fold into
    /// the one-wire term of the resulting combination.
    ///
    /// # Panics
    ///
    /// If every operand is a constant.
    pub fn sum<I>(&mut self, operands: I) -> Variable
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let mut lc = LinearCombination::new();
        let mut constant_only = true;
        for operand in operands {
            let operand = operand.into();
            constant_only &= self.constant_value(&operand).is_some();
            lc.terms.extend(self.lc(operand).terms);
        }
        assert!(
            !constant_only,
            "sum of constants only, use constant() instead"
        );
        self.new_gate(Expression::Linear(lc))
    }

    /// Returns a wire holding `a - b`.
    ///
    /// # Panics
    ///
    /// If both operands are constants.
    pub fn sub<A, B>(&mut self, a: A, b: B) -> Variable
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        let (a, b) = (a.into(), b.into());
        assert!(
            self.constant_value(&a).is_none()
                || self.constant_value(&b).is_none(),
            "difference of constants only, use constant() instead"
        );
        let mut lc = self.lc(a);
        lc.extend_scaled(&self.lc(b), &BigInt::from(-1));
        self.new_gate(Expression::Linear(lc))
    }

    /// Returns a wire holding `a · b`.
    pub fn mul<A, B>(&mut self, a: A, b: B) -> Variable
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        self.product([a.into(), b.into()])
    }

    /// Returns a wire holding the product of every operand.
    ///
    /// Constant factors are folded together and scale the first
    /// non-constant factor, so `2·x` stays a linear gate. Every further
    /// non-constant factor costs one quadratic gate.
    ///
    /// # Panics
    ///
    /// If every operand is a constant.
    pub fn product<I>(&mut self, operands: I) -> Variable
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let mut factor = BigInt::one();
        let mut factors = Vec::new();
        for operand in operands {
            let operand = operand.into();
            match self.constant_value(&operand) {
                Some(c) => factor *= c,
                None => factors.push(self.lc(operand)),
            }
        }

        let mut factors = factors.into_iter();
        let left = match factors.next() {
            Some(lc) => lc.scale(&factor),
            None => panic!("product of constants only, use constant() instead"),
        };
        let right = match factors.next() {
            Some(lc) => lc,
            None => return self.new_gate(Expression::Linear(left)),
        };
        let mut out = self.new_gate(Expression::Quadratic { left, right });
        for right in factors {
            out = self.new_gate(Expression::Quadratic {
                left: out.into(),
                right,
            });
        }
        out
    }

    /// Returns a fresh wire `r` constrained by `r · b = a`.
    ///
    /// A zero witness for `b` is reported by the solver as
    /// [`Error::DivisionByZero`](crate::error::Error::DivisionByZero).
    ///
    /// # Panics
    ///
    /// If both operands are constants or `b` is the constant zero.
    pub fn div<A, B>(&mut self, a: A, b: B) -> Variable
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        let (a, b) = (a.into(), b.into());
        match (self.constant_value(&a), self.constant_value(&b)) {
            (Some(_), Some(_)) => {
                panic!("division of constants only, use constant() instead")
            }
            (_, Some(d)) if d.is_zero() => panic!("division by constant zero"),
            _ => {}
        }
        let numerator = self.lc(a);
        let denominator = self.lc(b);
        self.new_gate(Expression::Division {
            numerator,
            denominator,
        })
    }

    /// Returns a wire holding `1 / a`.
    pub fn inv<A>(&mut self, a: A) -> Variable
    where
        A: Into<Operand>,
    {
        self.div(1, a)
    }
}
