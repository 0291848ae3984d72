// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Boolean Gates

use crate::constraint_system::{
    ConstraintSystem, Expression, Variable, WireKind,
};

impl ConstraintSystem {
    /// Adds a boolean constraint (also known as binary constraint) on `a`,
    /// enforcing that the [`Variable`] is either `0` or `1`.
    ///
    /// The constraint is recorded at most once per wire. Wires already known
    /// to be boolean, such as the output of [`ConstraintSystem::xor`], are
    /// skipped.
    pub fn must_be_boolean(&mut self, a: Variable) {
        if self.booleans.insert(a) {
            self.push_assertion(Expression::Boolean(a));
        }
    }

    /// Returns `a XOR b`. Both inputs get boolean constrained and the output
    /// is known to be boolean.
    pub fn xor(&mut self, a: Variable, b: Variable) -> Variable {
        self.must_be_boolean(a);
        self.must_be_boolean(b);
        let r = self.new_gate(Expression::Xor(a, b));
        self.booleans.insert(r);
        r
    }

    /// Decomposes `a` into `nb_bits` boolean wires, least significant bit
    /// first.
    ///
    /// The decomposition only holds if `a < 2^nb_bits`, otherwise the solved
    /// system fails to verify.
    pub fn to_binary(&mut self, a: Variable, nb_bits: usize) -> Vec<Variable> {
        let bits: Vec<Variable> = (0..nb_bits)
            .map(|_| self.new_wire(WireKind::Internal))
            .collect();
        self.push_gate(
            Expression::Unpack {
                value: a,
                bits: bits.clone(),
            },
            &bits,
        );
        for bit in &bits {
            self.must_be_boolean(*bit);
        }
        bits
    }

    /// Recomposes a wire out of little-endian `bits`, each of which gets
    /// boolean constrained.
    pub fn from_binary(&mut self, bits: &[Variable]) -> Variable {
        for bit in bits {
            self.must_be_boolean(*bit);
        }
        self.new_gate(Expression::Pack(bits.to_vec()))
    }
}
