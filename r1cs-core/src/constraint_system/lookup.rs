// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-Garage. All rights reserved.

//! Selection gadgets: conditional select and two-bit table lookup.

use crate::constraint_system::{
    ConstraintSystem, Expression, Operand, Variable,
};
use num_bigint::BigInt;

impl ConstraintSystem {
    /// Returns `if_true` when `condition` is one and `if_false` when it is
    /// zero. `condition` gets boolean constrained.
    pub fn select<A, B>(
        &mut self,
        condition: Variable,
        if_true: A,
        if_false: B,
    ) -> Variable
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        self.must_be_boolean(condition);
        let if_true = self.lc(if_true.into());
        let if_false = self.lc(if_false.into());
        self.new_gate(Expression::Select {
            condition,
            if_true,
            if_false,
        })
    }

    /// Returns `table[b0 + 2·b1]`. Both selector bits get boolean
    /// constrained.
    pub fn select_lut<T>(
        &mut self,
        b1: Variable,
        b0: Variable,
        table: [T; 4],
    ) -> Variable
    where
        T: Into<BigInt>,
    {
        self.must_be_boolean(b0);
        self.must_be_boolean(b1);
        let [t0, t1, t2, t3] = table;
        self.new_gate(Expression::LookupTable {
            b1,
            b0,
            table: [t0.into(), t1.into(), t2.into(), t3.into()],
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        batch_test,
        constraint_system::helper::*,
        circuit::Assignment,
        parameters::{Bls12_377, Bls12_381, Bw6_761, CurveParameters},
        util::field_from_bigint,
    };
    use ark_bls12_381::Fr;
    use ark_ff::{BigInteger, FpParameters, PrimeField, UniformRand};
    use num_bigint::Sign;
    use proptest::prelude::*;

    fn to_bigint<F: PrimeField>(value: F) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &value.into_repr().to_bytes_le())
    }

    /// Compiles `select(b, x, y)` for a field `P` and returns its value for
    /// `b = 1` and `b = 0`.
    fn select_both<P>(
        x: &BigInt,
        y: &BigInt,
    ) -> (P::ScalarField, P::ScalarField)
    where
        P: CurveParameters,
    {
        let mut cs = ConstraintSystem::new();
        let b = cs.secret_input("b");
        let x_wire = cs.secret_input("x");
        let y_wire = cs.secret_input("y");
        let r = cs.select(b, x_wire, y_wire);
        cs.tag(r, "r");
        let r1cs = cs.into_r1cs().specialize::<P>();

        let solve = |bit: i64| {
            let mut inputs = Assignment::new();
            inputs.insert("b".to_string(), BigInt::from(bit));
            inputs.insert("x".to_string(), x.clone());
            inputs.insert("y".to_string(), y.clone());
            r1cs.inspect(&inputs, false).unwrap()["r"]
        };
        (solve(1), solve(0))
    }

    fn test_select_picks_branch<P>()
    where
        P: CurveParameters,
    {
        for (b, expected) in [(1, 11u64), (0, 22u64)] {
            let res = gadget_tester::<P>(
                |cs: &mut ConstraintSystem| {
                    let b = cs.secret_input("b");
                    let x = cs.secret_input("x");
                    let y = cs.secret_input("y");
                    let r = cs.select(b, x, y);
                    let c = cs.select(b, 5, x);
                    cs.tag(r, "r");
                    cs.tag(c, "c");
                },
                &[("b", b), ("x", 11), ("y", 22)],
            )
            .unwrap();
            assert_eq!(res["r"], P::ScalarField::from(expected));
            let c = if b == 1 { 5u64 } else { 11 };
            assert_eq!(res["c"], P::ScalarField::from(c));
        }
    }

    fn test_lookup_table<P>()
    where
        P: CurveParameters,
    {
        let table = [7u64, 13, 42, 1000];
        for (index, expected) in table.iter().enumerate() {
            let res = gadget_tester::<P>(
                |cs: &mut ConstraintSystem| {
                    let b1 = cs.secret_input("b1");
                    let b0 = cs.secret_input("b0");
                    let r = cs.select_lut(b1, b0, table);
                    cs.tag(r, "r");
                },
                &[("b1", (index >> 1) as i64), ("b0", (index & 1) as i64)],
            )
            .unwrap();
            assert_eq!(res["r"], P::ScalarField::from(*expected));
        }
    }

    fn test_select_with_non_boolean_condition<P>()
    where
        P: CurveParameters,
    {
        let res = gadget_tester::<P>(
            |cs: &mut ConstraintSystem| {
                let b = cs.secret_input("b");
                cs.select(b, 1, 2);
            },
            &[("b", 2)],
        );
        assert!(res.is_err());
    }

    fn test_select_random_field_values<P>()
    where
        P: CurveParameters,
    {
        let rng = &mut ark_std::test_rng();
        for _ in 0..8 {
            let x = P::ScalarField::rand(rng);
            let y = P::ScalarField::rand(rng);
            let (if_one, if_zero) =
                select_both::<P>(&to_bigint(x), &to_bigint(y));
            assert_eq!(if_one, x);
            assert_eq!(if_zero, y);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn select_returns_the_chosen_branch(
            x in any::<i64>(),
            y in any::<i64>(),
            k in 1u64..1024,
        ) {
            let modulus = BigInt::from_bytes_le(
                Sign::Plus,
                &<<Fr as PrimeField>::Params as FpParameters>::MODULUS
                    .to_bytes_le(),
            );
            let near_modulus = modulus - k;
            let (x, y) = (BigInt::from(x), BigInt::from(y));
            for (x, y) in [
                (x.clone(), y.clone()),
                (near_modulus.clone(), y),
                (x, near_modulus),
            ] {
                let (if_one, if_zero) = select_both::<Bls12_381>(&x, &y);
                prop_assert_eq!(if_one, field_from_bigint::<Fr>(&x));
                prop_assert_eq!(if_zero, field_from_bigint::<Fr>(&y));
            }
        }
    }

    // Test on Bls12-381
    batch_test!(
        [
            test_select_picks_branch,
            test_lookup_table,
            test_select_with_non_boolean_condition,
            test_select_random_field_values
        ],
        [] => (Bls12_381)
    );

    // Test on Bls12-377
    batch_test!(
        [
            test_select_picks_branch,
            test_lookup_table,
            test_select_with_non_boolean_condition,
            test_select_random_field_values
        ],
        [] => (Bls12_377)
    );

    // Test on BW6-761
    batch_test!(
        [
            test_select_picks_branch,
            test_lookup_table,
            test_select_random_field_values
        ],
        [] => (Bw6_761)
    );
}
