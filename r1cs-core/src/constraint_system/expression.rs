// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! The closed catalogue of gates a [`ConstraintSystem`](super::ConstraintSystem)
//! records before lowering.

use super::{LinearCombination, Variable};
use num_bigint::{BigInt, BigUint};

/// A macro expression waiting to be lowered into R1CS constraints.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expression {
    /// `lc · 1 = out`
    Linear(LinearCombination),
    /// `left · right = out`
    Quadratic {
        /// Left factor
        left: LinearCombination,
        /// Right factor
        right: LinearCombination,
    },
    /// `denominator · out = numerator`
    Division {
        /// Dividend
        numerator: LinearCombination,
        /// Divisor
        denominator: LinearCombination,
    },
    /// `v · (1 - v) = 0`
    Boolean(Variable),
    /// `2a · b = a + b - out`
    Xor(Variable, Variable),
    /// `Σ bitᵢ·2ⁱ · 1 = out`, bits little-endian.
    Pack(Vec<Variable>),
    /// `Σ bitᵢ·2ⁱ · 1 = value`, the bits being fresh wires.
    Unpack {
        /// Wire being decomposed
        value: Variable,
        /// Little-endian bit wires
        bits: Vec<Variable>,
    },
    /// `b · (x - y) = out - y`
    Select {
        /// Boolean selector
        condition: Variable,
        /// Value picked when the selector is one
        if_true: LinearCombination,
        /// Value picked when the selector is zero
        if_false: LinearCombination,
    },
    /// Two-bit table lookup, `out = table[b0 + 2·b1]`.
    LookupTable {
        /// High selector bit
        b1: Variable,
        /// Low selector bit
        b0: Variable,
        /// Table entries
        table: [BigInt; 4],
    },
    /// `a · 1 = b`
    Equal(LinearCombination, LinearCombination),
    /// `0 <= value <= bound` over `nb_bits` bits.
    RangeCheck {
        /// Checked wire
        value: Variable,
        /// Inclusive upper bound
        bound: BigUint,
        /// Width of the decomposition
        nb_bits: usize,
    },
}

impl Expression {
    /// Returns `true` for the gates that only assert and define no wire.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::Boolean(_) | Self::Equal(..) | Self::RangeCheck { .. }
        )
    }

    /// Every wire the expression reads, in no particular order.
    pub(crate) fn wires(&self) -> Vec<Variable> {
        let lc = |lc: &LinearCombination| {
            lc.terms().iter().map(|(v, _)| *v).collect::<Vec<_>>()
        };
        match self {
            Self::Linear(a) => lc(a),
            Self::Quadratic { left: a, right: b }
            | Self::Division {
                numerator: a,
                denominator: b,
            }
            | Self::Equal(a, b) => [lc(a), lc(b)].concat(),
            Self::Boolean(v) | Self::RangeCheck { value: v, .. } => vec![*v],
            Self::Xor(a, b) | Self::LookupTable { b1: a, b0: b, .. } => {
                vec![*a, *b]
            }
            Self::Pack(bits) => bits.clone(),
            Self::Unpack { value, bits } => {
                [vec![*value], bits.clone()].concat()
            }
            Self::Select {
                condition,
                if_true,
                if_false,
            } => [vec![*condition], lc(if_true), lc(if_false)].concat(),
        }
    }
}

/// A recorded gate together with the single wire it defines, if any.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Gate {
    pub(crate) output: Option<Variable>,
    pub(crate) expression: Expression,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraint_system::ConstraintSystem;

    #[test]
    fn assertions_define_no_wire() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x");
        let y = cs.secret_input("y");
        cs.must_be_boolean(x);
        cs.must_be_equal(x, y);
        cs.must_be_less_or_equal(y, 10, 4);
        cs.xor(x, y);
        cs.to_binary(y, 2);

        let gates: Vec<_> = cs.gates.iter().collect();
        for gate in &gates {
            if gate.expression.is_assertion() {
                assert_eq!(gate.output, None);
            }
        }
        let outputs = gates.iter().filter(|gate| gate.output.is_some());
        assert_eq!(outputs.count(), 1);
    }

    #[test]
    fn wires_lists_every_operand() {
        let (x, y, z) = (Variable(1), Variable(2), Variable(3));
        let select = Expression::Select {
            condition: x,
            if_true: y.into(),
            if_false: LinearCombination::from(z).with_term(Variable(0), 4),
        };
        assert_eq!(select.wires(), vec![x, y, z, Variable(0)]);
        let unpack = Expression::Unpack {
            value: x,
            bits: vec![y, z],
        };
        assert_eq!(unpack.wires(), vec![x, y, z]);
        assert_eq!(Expression::Xor(y, z).wires(), vec![y, z]);
    }
}
