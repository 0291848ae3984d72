// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Lowering of the gate graph into generic rank-1 constraints.

use super::{
    SolverHint, Term, UntypedR1CS, WireLayout, ONE_WIRE, ONE_WIRE_NAME, R1C,
};
use crate::constraint_system::{
    ConstraintSystem, Expression, Gate, LinearCombination, Variable, WireKind,
};
use core::iter;
use hashbrown::{HashMap, HashSet};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::collections::BTreeMap;

impl ConstraintSystem {
    /// Consumes the system and lowers every recorded gate into rank-1
    /// constraints.
    ///
    /// An equality between an input and a wire whose only definition is a
    /// single-output gate emits no constraint: the defining gate writes
    /// straight into the input wire instead. Every other gate emits at least
    /// one constraint, in registration order. Linear expressions are
    /// normalized, with terms on the same wire merged, zero coefficients
    /// dropped and terms sorted by wire.
    pub fn into_r1cs(self) -> UntypedR1CS {
        let span = tracing::debug_span!(
            "into_r1cs",
            gates = self.gates.len(),
            wires = self.wires.len()
        );
        let _enter = span.enter();

        let (aliases, retired) = self.collapse_equalities();
        let mut lowering = Lowering::new(&self, &aliases);
        for (index, gate) in self.gates.iter().enumerate() {
            if !retired.contains(&index) {
                lowering.lower(gate);
            }
        }
        let r1cs = lowering.finish();

        tracing::debug!(
            constraints = r1cs.constraints.len(),
            wires = r1cs.layout.nb_wires,
            aliases = aliases.len(),
            "lowered constraint system"
        );
        r1cs
    }

    /// Finds the equalities that can be folded into the gate defining one of
    /// their sides. Returns the aliases from defined wire to input and the
    /// indices of the retired gates.
    fn collapse_equalities(
        &self,
    ) -> (HashMap<Variable, Variable>, HashSet<usize>) {
        let mut aliases = HashMap::new();
        let mut retired = HashSet::new();
        for (index, gate) in self.gates.iter().enumerate() {
            let (a, b) = match &gate.expression {
                Expression::Equal(a, b) => (a, b),
                _ => continue,
            };
            let (a, b) = match (a.as_variable(), b.as_variable()) {
                (Some(a), Some(b)) => (
                    *aliases.get(&a).unwrap_or(&a),
                    *aliases.get(&b).unwrap_or(&b),
                ),
                _ => continue,
            };
            let alias = if self.can_alias(a, b, &aliases) {
                Some((a, b))
            } else if self.can_alias(b, a, &aliases) {
                Some((b, a))
            } else {
                None
            };
            if let Some((defined, input)) = alias {
                aliases.insert(defined, input);
                retired.insert(index);
            }
        }
        (aliases, retired)
    }

    /// Returns `true` if the gate defining `defined` can write straight into
    /// `input`. The gate must not read `input` already, either directly or
    /// through an earlier alias, or the input would sit on both sides of its
    /// own defining constraint.
    fn can_alias(
        &self,
        defined: Variable,
        input: Variable,
        aliases: &HashMap<Variable, Variable>,
    ) -> bool {
        if !self.defines(defined) || !self.wires[input.0].is_input() {
            return false;
        }
        let gate = match self.governor[defined.0] {
            Some(gate) => &self.gates[gate],
            None => return false,
        };
        !gate.expression.wires().into_iter().any(|v| {
            v == input || aliases.get(&v) == Some(&input)
        })
    }

    /// Returns `true` if `variable` is an internal wire that is the single
    /// output of its gate.
    fn defines(&self, variable: Variable) -> bool {
        self.wires[variable.0] == WireKind::Internal
            && matches!(
                self.governor[variable.0],
                Some(gate) if self.gates[gate].output == Some(variable)
            )
    }
}

/// Merges the terms on a same wire, drops the zero coefficients and sorts by
/// wire.
fn normalize<I>(terms: I) -> Vec<Term<BigInt>>
where
    I: IntoIterator<Item = (usize, BigInt)>,
{
    let mut merged = BTreeMap::new();
    for (wire, coeff) in terms {
        *merged.entry(wire).or_insert_with(BigInt::zero) += coeff;
    }
    merged
        .into_iter()
        .filter(|(_, coeff)| !coeff.is_zero())
        .map(|(wire, coeff)| Term::new(wire, coeff))
        .collect()
}

fn one() -> Vec<Term<BigInt>> {
    vec![Term::new(ONE_WIRE, BigInt::one())]
}

fn single(wire: usize) -> Vec<Term<BigInt>> {
    vec![Term::new(wire, BigInt::one())]
}

/// `Σ bitᵢ·2ⁱ`
fn binary(bits: &[usize]) -> Vec<Term<BigInt>> {
    normalize(
        bits.iter()
            .enumerate()
            .map(|(i, bit)| (*bit, BigInt::one() << i)),
    )
}

struct Lowering<'a> {
    cs: &'a ConstraintSystem,
    /// Lowered wire of every wire of `cs`.
    index: Vec<usize>,
    layout: WireLayout,
    constraints: Vec<R1C<BigInt>>,
}

impl<'a> Lowering<'a> {
    fn new(
        cs: &'a ConstraintSystem,
        aliases: &HashMap<Variable, Variable>,
    ) -> Self {
        let mut index = vec![ONE_WIRE; cs.wires.len()];
        let mut next_wire = ONE_WIRE + 1;
        let internals = cs
            .wires
            .iter()
            .enumerate()
            .filter(|(id, kind)| {
                **kind == WireKind::Internal
                    && !aliases.contains_key(&Variable(*id))
            })
            .map(|(id, _)| Variable(id));
        for variable in cs
            .public_inputs
            .iter()
            .chain(&cs.secret_inputs)
            .copied()
            .chain(internals)
        {
            index[variable.0] = next_wire;
            next_wire += 1;
        }
        for (defined, input) in aliases {
            index[defined.0] = index[input.0];
        }

        let name =
            |v: &Variable| cs.wire_names.get(v).cloned().unwrap_or_default();
        let layout = WireLayout {
            nb_wires: next_wire,
            nb_public_wires: 1 + cs.public_inputs.len(),
            nb_private_wires: cs.secret_inputs.len(),
            public_names: iter::once(ONE_WIRE_NAME.to_owned())
                .chain(cs.public_inputs.iter().map(name))
                .collect(),
            private_names: cs.secret_inputs.iter().map(name).collect(),
            tags: cs
                .tags
                .iter()
                .map(|(label, v)| (label.clone(), index[v.0]))
                .collect(),
        };

        Self {
            cs,
            index,
            layout,
            constraints: Vec::with_capacity(cs.gates.len()),
        }
    }

    fn finish(self) -> UntypedR1CS {
        UntypedR1CS {
            layout: self.layout,
            constraints: self.constraints,
        }
    }

    fn wire(&self, variable: Variable) -> usize {
        self.index[variable.0]
    }

    /// Allocates a wire that only exists in the lowered system.
    fn aux(&mut self) -> usize {
        let wire = self.layout.nb_wires;
        self.layout.nb_wires += 1;
        wire
    }

    fn lc(&self, lc: &LinearCombination) -> Vec<Term<BigInt>> {
        normalize(lc.terms().iter().map(|(v, c)| (self.wire(*v), c.clone())))
    }

    fn emit(
        &mut self,
        l: Vec<Term<BigInt>>,
        r: Vec<Term<BigInt>>,
        o: Vec<Term<BigInt>>,
        hint: SolverHint,
    ) {
        self.constraints.push(R1C { l, r, o, hint });
    }

    fn lower(&mut self, gate: &Gate) {
        let output = gate.output.map(|v| self.wire(v));
        match (&gate.expression, output) {
            (Expression::Linear(lc), Some(out)) => self.emit(
                self.lc(lc),
                one(),
                single(out),
                SolverHint::Output(out),
            ),
            (Expression::Quadratic { left, right }, Some(out)) => self.emit(
                self.lc(left),
                self.lc(right),
                single(out),
                SolverHint::Output(out),
            ),
            (
                Expression::Division {
                    numerator,
                    denominator,
                },
                Some(out),
            ) => self.emit(
                self.lc(denominator),
                single(out),
                self.lc(numerator),
                SolverHint::Output(out),
            ),
            (Expression::Boolean(v), _) => {
                let v = self.wire(*v);
                self.emit(
                    single(v),
                    normalize([
                        (ONE_WIRE, BigInt::one()),
                        (v, BigInt::from(-1)),
                    ]),
                    Vec::new(),
                    SolverHint::None,
                )
            }
            (Expression::Xor(a, b), Some(out)) => {
                let (a, b) = (self.wire(*a), self.wire(*b));
                self.emit(
                    normalize([(a, BigInt::from(2))]),
                    single(b),
                    normalize([
                        (a, BigInt::one()),
                        (b, BigInt::one()),
                        (out, BigInt::from(-1)),
                    ]),
                    SolverHint::Output(out),
                )
            }
            (Expression::Pack(bits), Some(out)) => {
                let bits: Vec<usize> =
                    bits.iter().map(|v| self.wire(*v)).collect();
                self.emit(
                    binary(&bits),
                    one(),
                    single(out),
                    SolverHint::Output(out),
                )
            }
            (Expression::Unpack { value, bits }, _) => {
                let bits: Vec<usize> =
                    bits.iter().map(|v| self.wire(*v)).collect();
                let value = self.wire(*value);
                self.emit(
                    binary(&bits),
                    one(),
                    single(value),
                    SolverHint::BinaryDecomposition(bits),
                )
            }
            (
                Expression::Select {
                    condition,
                    if_true,
                    if_false,
                },
                Some(out),
            ) => {
                let if_false = self.lc(if_false);
                let negated = if_false
                    .iter()
                    .map(|t| (t.wire, -t.coeff.clone()));
                let r = normalize(
                    self.lc(if_true)
                        .into_iter()
                        .map(|t| (t.wire, t.coeff))
                        .chain(negated.clone()),
                );
                let o =
                    normalize(iter::once((out, BigInt::one())).chain(negated));
                let condition = self.wire(*condition);
                self.emit(single(condition), r, o, SolverHint::Output(out))
            }
            (Expression::LookupTable { b1, b0, table }, Some(out)) => {
                let (b1, b0) = (self.wire(*b1), self.wire(*b0));
                let [t0, t1, t2, t3] = table;
                self.emit(
                    single(b1),
                    normalize([
                        (b0, t3 - t2 - t1 + t0),
                        (ONE_WIRE, t2 - t0),
                    ]),
                    normalize([
                        (out, BigInt::one()),
                        (ONE_WIRE, -t0),
                        (b0, t0 - t1),
                    ]),
                    SolverHint::Output(out),
                )
            }
            (Expression::Equal(a, b), _) => {
                let constant = b.constant_value(self.cs.one);
                let hint = match (a.as_variable(), constant) {
                    (Some(v), Some(_)) if self.cs.wires[v.0].is_input() => {
                        SolverHint::Output(self.wire(v))
                    }
                    _ => SolverHint::None,
                };
                self.emit(self.lc(a), one(), self.lc(b), hint)
            }
            (
                Expression::RangeCheck {
                    value,
                    bound,
                    nb_bits,
                },
                _,
            ) => self.lower_range_check(*value, bound, *nb_bits),
            (expression, None) => {
                unreachable!("{:?} defines no output wire", expression)
            }
        }
    }

    /// Decomposes `value` into `nb_bits` auxiliary bits `aᵢ` and walks them
    /// from the most significant one with a running product `p` of the bits
    /// sitting where `bound` has a one. Where `bound` has a zero,
    /// `(1 - p - aᵢ)·aᵢ = 0` forces `aᵢ = 0` as long as the prefix of `value`
    /// equals the prefix of `bound`.
    fn lower_range_check(
        &mut self,
        value: Variable,
        bound: &BigUint,
        nb_bits: usize,
    ) {
        let value = self.wire(value);
        let bits: Vec<usize> = (0..nb_bits).map(|_| self.aux()).collect();
        self.emit(
            binary(&bits),
            one(),
            single(value),
            SolverHint::BinaryDecomposition(bits.clone()),
        );

        // None stands for the empty product.
        let mut prefix: Option<usize> = None;
        for (i, a_i) in bits.into_iter().enumerate().rev() {
            if ((bound >> i) & BigUint::one()).is_one() {
                self.emit(
                    single(a_i),
                    normalize([
                        (ONE_WIRE, BigInt::one()),
                        (a_i, BigInt::from(-1)),
                    ]),
                    Vec::new(),
                    SolverHint::None,
                );
                prefix = Some(match prefix {
                    None => a_i,
                    Some(p) => {
                        let q = self.aux();
                        self.emit(
                            single(p),
                            single(a_i),
                            single(q),
                            SolverHint::Output(q),
                        );
                        q
                    }
                });
            } else {
                let l = match prefix {
                    None => vec![(a_i, BigInt::from(-1))],
                    Some(p) => vec![
                        (ONE_WIRE, BigInt::one()),
                        (p, BigInt::from(-1)),
                        (a_i, BigInt::from(-1)),
                    ],
                };
                self.emit(
                    normalize(l),
                    single(a_i),
                    Vec::new(),
                    SolverHint::None,
                );
            }
        }
    }
}
