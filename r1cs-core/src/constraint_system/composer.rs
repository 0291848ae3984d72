// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A `ConstraintSystem` is the circuit-builder tool of this crate.
//!
//! It records a graph of [`Expression`]s over [`Variable`]s without ever
//! touching a field element. Values only enter the picture once the graph has
//! been lowered into an [`UntypedR1CS`](crate::r1cs::UntypedR1CS) and
//! specialized for a curve.
//!
//! The arithmetic API (`add`, `mul`, `select`, range checks and friends) is
//! spread over the sibling modules, each adding an `impl ConstraintSystem`
//! block for one family of gates.

use super::{Expression, Gate, LinearCombination, Operand, Variable, WireKind};
use hashbrown::{HashMap, HashSet};
use num_bigint::BigInt;

/// The ConstraintSystem stores the full description of a circuit before it is
/// lowered: every wire ever allocated, every gate in registration order, the
/// named inputs and the user tags.
///
/// Wire `0` is reserved for the constant one. Any [`Operand::Constant`] is
/// expressed as a multiple of that wire, see [`ConstraintSystem::one`].
///
/// The system is consumed by
/// [`ConstraintSystem::into_r1cs`](ConstraintSystem::into_r1cs), so every
/// recorded gate is retired exactly once.
#[derive(Clone, Debug)]
pub struct ConstraintSystem {
    /// The constant-one wire.
    pub(crate) one: Variable,

    /// Kind of every allocated wire, indexed by wire id.
    pub(crate) wires: Vec<WireKind>,

    /// Gates in registration order.
    pub(crate) gates: Vec<Gate>,

    /// Index of the gate defining each wire, if any.
    pub(crate) governor: Vec<Option<usize>>,

    /// Public inputs in declaration order.
    pub(crate) public_inputs: Vec<Variable>,

    /// Secret inputs in declaration order.
    pub(crate) secret_inputs: Vec<Variable>,

    /// Names shared by both input registries.
    pub(crate) input_names: HashMap<String, Variable>,

    /// Reverse lookup of `input_names`.
    pub(crate) wire_names: HashMap<Variable, String>,

    /// User tags in registration order.
    pub(crate) tags: Vec<(String, Variable)>,

    /// Set of labels in `tags`.
    pub(crate) tag_names: HashSet<String>,

    /// Wires already known to hold `0` or `1`.
    pub(crate) booleans: HashSet<Variable>,
}

impl Default for ConstraintSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSystem {
    /// Generates a new empty `ConstraintSystem` holding only the one wire.
    pub fn new() -> Self {
        Self::with_expected_size(0)
    }

    /// Creates a new circuit with an expected number of gates. Preallocating
    /// avoids reallocations while the gadgets are being built.
    pub fn with_expected_size(expected_size: usize) -> Self {
        let mut cs = Self {
            one: Variable(0),
            wires: Vec::with_capacity(expected_size + 1),
            gates: Vec::with_capacity(expected_size),
            governor: Vec::with_capacity(expected_size + 1),
            public_inputs: Vec::new(),
            secret_inputs: Vec::new(),
            input_names: HashMap::new(),
            wire_names: HashMap::new(),
            tags: Vec::new(),
            tag_names: HashSet::new(),
            booleans: HashSet::new(),
        };
        cs.one = cs.new_wire(WireKind::One);
        cs.booleans.insert(cs.one);
        cs
    }

    /// Returns the wire holding the constant one.
    pub fn one(&self) -> Variable {
        self.one
    }

    /// Returns the number of wires allocated so far, the one wire included.
    pub fn nb_wires(&self) -> usize {
        self.wires.len()
    }

    /// Returns the number of gates recorded so far.
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Returns the recorded expressions in registration order.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.gates.iter().map(|gate| &gate.expression)
    }

    /// Adds a named public input to the circuit.
    ///
    /// # Panics
    ///
    /// If `name` is empty or already used by another input.
    pub fn public_input(&mut self, name: &str) -> Variable {
        let variable = self.new_input(name, WireKind::Public);
        self.public_inputs.push(variable);
        variable
    }

    /// Adds a named secret input to the circuit.
    ///
    /// # Panics
    ///
    /// If `name` is empty or already used by another input.
    pub fn secret_input(&mut self, name: &str) -> Variable {
        let variable = self.new_input(name, WireKind::Secret);
        self.secret_inputs.push(variable);
        variable
    }

    /// Allocates a wire holding `value`.
    pub fn constant<T>(&mut self, value: T) -> Variable
    where
        T: Into<BigInt>,
    {
        let lc = LinearCombination::new().with_term(self.one, value);
        self.new_gate(Expression::Linear(lc))
    }

    /// Attaches a debugging label to `variable`. Tagged values can be read
    /// back from a solved system with [`R1CS::inspect`](crate::r1cs::R1CS::inspect).
    ///
    /// # Panics
    ///
    /// If `label` is already in use.
    pub fn tag(&mut self, variable: Variable, label: &str) {
        assert!(
            self.tag_names.insert(label.to_owned()),
            "tag {} is already in use",
            label
        );
        self.tags.push((label.to_owned(), variable));
    }

    /// Asserts `a == b`.
    ///
    /// Both operands may be variables, or one of them may be a constant.
    /// Asserting a variable equal to itself records nothing.
    ///
    /// # Panics
    ///
    /// On two constants, or when either operand is a linear combination.
    pub fn must_be_equal<A, B>(&mut self, a: A, b: B)
    where
        A: Into<Operand>,
        B: Into<Operand>,
    {
        let (a, b) = match (a.into(), b.into()) {
            (Operand::Variable(a), Operand::Variable(b)) => {
                if a == b {
                    tracing::warn!(
                        wire = a.0,
                        "variable asserted equal to itself"
                    );
                    return;
                }
                (LinearCombination::from(a), LinearCombination::from(b))
            }
            (Operand::Variable(a), Operand::Constant(c)) => {
                (a.into(), self.constant_lc(c))
            }
            (Operand::Constant(c), Operand::Variable(b)) => {
                (b.into(), self.constant_lc(c))
            }
            (a, b) => panic!(
                "must_be_equal expects two variables or a variable and a \
                 constant, got {:?} and {:?}",
                a, b
            ),
        };
        self.push_assertion(Expression::Equal(a, b));
    }

    /// Converts an operand into a linear combination over this system.
    pub(crate) fn lc(&self, operand: Operand) -> LinearCombination {
        match operand {
            Operand::Variable(v) => v.into(),
            Operand::LinearCombination(lc) => lc,
            Operand::Constant(c) => self.constant_lc(c),
        }
    }

    /// Returns the value of `operand` if it does not depend on any wire but
    /// the one wire.
    pub(crate) fn constant_value(&self, operand: &Operand) -> Option<BigInt> {
        match operand {
            Operand::Variable(v) if *v == self.one => Some(1.into()),
            Operand::Variable(_) => None,
            Operand::LinearCombination(lc) => lc.constant_value(self.one),
            Operand::Constant(c) => Some(c.clone()),
        }
    }

    pub(crate) fn constant_lc(&self, value: BigInt) -> LinearCombination {
        LinearCombination::new().with_term(self.one, value)
    }

    pub(crate) fn new_wire(&mut self, kind: WireKind) -> Variable {
        let variable = Variable(self.wires.len());
        self.wires.push(kind);
        self.governor.push(None);
        variable
    }

    /// Records a gate defining a fresh internal wire and returns that wire.
    pub(crate) fn new_gate(&mut self, expression: Expression) -> Variable {
        let output = self.new_wire(WireKind::Internal);
        self.governor[output.0] = Some(self.gates.len());
        self.gates.push(Gate {
            output: Some(output),
            expression,
        });
        output
    }

    /// Records a gate governing `outputs` without making any of them its
    /// single output.
    pub(crate) fn push_gate(
        &mut self,
        expression: Expression,
        outputs: &[Variable],
    ) {
        for output in outputs {
            self.governor[output.0] = Some(self.gates.len());
        }
        self.gates.push(Gate {
            output: None,
            expression,
        });
    }

    pub(crate) fn push_assertion(&mut self, expression: Expression) {
        self.push_gate(expression, &[]);
    }

    fn new_input(&mut self, name: &str, kind: WireKind) -> Variable {
        assert!(!name.is_empty(), "input name must not be empty");
        assert!(
            !self.input_names.contains_key(name),
            "input name {} is already in use",
            name
        );
        let variable = self.new_wire(kind);
        self.input_names.insert(name.to_owned(), variable);
        self.wire_names.insert(variable, name.to_owned());
        variable
    }
}
