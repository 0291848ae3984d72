// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE . All rights reserved.

//! Comparator gadget

use crate::constraint_system::{
    ConstraintSystem, Expression, LinearCombination, Operand, Variable,
};

impl ConstraintSystem {
    /// Asserts `0 <= a <= bound`, `a` and `bound` being read as `nb_bits`
    /// bit integers.
    ///
    /// A constant `bound` records a single range check that lowers into a
    /// bit decomposition of `a` plus one constraint per bit. A variable
    /// `bound` is decomposed as well and compared bit by bit with the
    /// regular arithmetic API.
    ///
    /// # Panics
    ///
    /// If a constant `bound` is negative or does not fit in `nb_bits` bits,
    /// or if `bound` is a linear combination.
    pub fn must_be_less_or_equal<B>(
        &mut self,
        a: Variable,
        bound: B,
        nb_bits: usize,
    ) where
        B: Into<Operand>,
    {
        let bound = bound.into();
        if let Some(c) = self.constant_value(&bound) {
            let bound = match c.to_biguint() {
                Some(bound) => bound,
                None => panic!("range bound {} is negative", c),
            };
            assert!(
                bound.bits() <= nb_bits as u64,
                "range bound {} does not fit in {} bits",
                bound,
                nb_bits
            );
            self.push_assertion(Expression::RangeCheck {
                value: a,
                bound,
                nb_bits,
            });
            return;
        }

        match bound {
            Operand::Variable(bound) => {
                self.must_be_less_or_equal_var(a, bound, nb_bits)
            }
            other => panic!(
                "range bound must be a constant or a variable, got {:?}",
                other
            ),
        }
    }

    fn must_be_less_or_equal_var(
        &mut self,
        a: Variable,
        bound: Variable,
        nb_bits: usize,
    ) {
        let a_bits = self.to_binary(a, nb_bits);
        let bound_bits = self.to_binary(bound, nb_bits);

        // p stays one while the bits of `a` seen so far match the ones of
        // `bound` at its set positions.
        let mut p = Operand::from(1);
        for (a_i, b_i) in a_bits.into_iter().zip(bound_bits).rev() {
            let p_and_a = self.mul(p.clone(), a_i);
            let t = self.select(b_i, 0, p.clone());
            let next = self.select(b_i, p_and_a, p);

            let l = LinearCombination::new()
                .with_term(self.one, 1)
                .with_term(t, -1)
                .with_term(a_i, -1);
            let l = self.mul(l, a_i);
            self.must_be_equal(l, 0);
            p = next.into();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        batch_test,
        constraint_system::helper::*,
        error::Error,
        parameters::{Bls12_377, Bls12_381, CurveParameters},
    };
    use proptest::prelude::*;

    fn test_constant_bound_accepts_range<P>()
    where
        P: CurveParameters,
    {
        for v in 0..=10 {
            let res = gadget_tester::<P>(
                |cs: &mut ConstraintSystem| {
                    let v = cs.secret_input("v");
                    cs.must_be_less_or_equal(v, 10, 4);
                },
                &[("v", v)],
            );
            assert!(res.is_ok(), "{} should be accepted", v);
        }
    }

    fn test_constant_bound_rejects_larger<P>()
    where
        P: CurveParameters,
    {
        for v in 11..=17 {
            let res = gadget_tester::<P>(
                |cs: &mut ConstraintSystem| {
                    let v = cs.secret_input("v");
                    cs.must_be_less_or_equal(v, 10, 4);
                },
                &[("v", v)],
            );
            assert!(
                matches!(res, Err(Error::UnsatisfiedConstraint { .. })),
                "{} should be rejected",
                v
            );
        }
    }

    fn test_variable_bound<P>()
    where
        P: CurveParameters,
    {
        let cases = [
            (5, 7, true),
            (7, 7, true),
            (0, 0, true),
            (8, 7, false),
            (6, 5, false),
        ];
        for (v, bound, ok) in cases {
            let res = gadget_tester::<P>(
                |cs: &mut ConstraintSystem| {
                    let v = cs.secret_input("v");
                    let bound = cs.public_input("bound");
                    cs.must_be_less_or_equal(v, bound, 4);
                },
                &[("v", v), ("bound", bound)],
            );
            assert_eq!(res.is_ok(), ok, "{} <= {}", v, bound);
        }
    }

    fn test_bound_wider_than_nb_bits<P>()
    where
        P: CurveParameters,
    {
        let _ = gadget_tester::<P>(
            |cs: &mut ConstraintSystem| {
                let v = cs.secret_input("v");
                cs.must_be_less_or_equal(v, 16, 4);
            },
            &[("v", 1)],
        );
    }

    fn test_negative_bound<P>()
    where
        P: CurveParameters,
    {
        let _ = gadget_tester::<P>(
            |cs: &mut ConstraintSystem| {
                let v = cs.secret_input("v");
                cs.must_be_less_or_equal(v, -1, 4);
            },
            &[("v", 1)],
        );
    }

    #[test]
    fn test_constant_bound_is_a_single_gate() {
        let mut cs = ConstraintSystem::new();
        let v = cs.secret_input("v");
        cs.must_be_less_or_equal(v, 10, 4);
        assert_eq!(cs.nb_gates(), 1);
        assert!(matches!(
            cs.expressions().next(),
            Some(Expression::RangeCheck { nb_bits: 4, .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn range_check_matches_comparison(v in 0i64..64, bound in 0u64..64) {
            let res = gadget_tester::<Bls12_381>(
                |cs: &mut ConstraintSystem| {
                    let v = cs.secret_input("v");
                    cs.must_be_less_or_equal(v, bound, 6);
                },
                &[("v", v)],
            );
            prop_assert_eq!(res.is_ok(), v as u64 <= bound);
        }
    }

    // Test on Bls12-381
    batch_test!(
        [
            test_constant_bound_accepts_range,
            test_constant_bound_rejects_larger,
            test_variable_bound
        ],
        [
            test_bound_wider_than_nb_bits,
            test_negative_bound
        ] => (Bls12_381)
    );

    // Test on Bls12-377
    batch_test!(
        [
            test_constant_bound_accepts_range,
            test_constant_bound_rejects_larger,
            test_variable_bound
        ],
        [
            test_bound_wider_than_nb_bits,
            test_negative_bound
        ] => (Bls12_377)
    );
}
