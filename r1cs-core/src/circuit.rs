// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Tools & traits for R1CS circuits

use crate::{
    constraint_system::{ConstraintSystem, Operand, Variable},
    error::Error,
    parameters::{self, CurveId, CurveParameters},
    r1cs::{UntypedR1CS, R1CS},
};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use hashbrown::{HashMap, HashSet};
use num_bigint::BigInt;
use std::path::Path;

/// Values of the inputs of a circuit, by resolved input name.
pub type Assignment = HashMap<String, BigInt>;

/// A leaf of a circuit description.
///
/// A leaf starts [`Input::Unset`]. Compiling the circuit turns it into
/// [`Input::Allocated`], while assigning a value for witness generation turns
/// it into [`Input::Assigned`]. A circuit holding either can't be compiled
/// again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// Neither compiled nor assigned.
    Unset,
    /// Wire allocated by the compiler.
    Allocated(Variable),
    /// Concrete value.
    Assigned(BigInt),
}

impl Default for Input {
    fn default() -> Self {
        Self::Unset
    }
}

impl Input {
    /// Creates an unset input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a concrete value to the input.
    pub fn assign<T>(&mut self, value: T)
    where
        T: Into<BigInt>,
    {
        *self = Self::Assigned(value.into());
    }

    /// Returns the wire allocated for this input.
    ///
    /// # Panics
    ///
    /// If the input was not allocated by the compiler.
    pub fn variable(&self) -> Variable {
        match self {
            Self::Allocated(variable) => *variable,
            other => panic!("input is not allocated: {:?}", other),
        }
    }

    /// Returns the assigned value, if any.
    pub fn value(&self) -> Option<&BigInt> {
        match self {
            Self::Assigned(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&Input> for Operand {
    fn from(input: &Input) -> Self {
        Operand::Variable(input.variable())
    }
}

/// Visibility of a leaf or of a nested description.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    /// Inherited from the parent, secret at the root.
    Unset,
    /// Secret input
    Secret,
    /// Public input
    Public,
    /// Not an input, skipped by the compiler.
    Excluded,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Unset
    }
}

impl Visibility {
    fn inherit(self, parent: Self) -> Self {
        match self {
            Self::Unset => parent,
            other => other,
        }
    }
}

#[derive(Debug)]
enum Node<'a> {
    Leaf {
        name: String,
        visibility: Visibility,
        input: &'a mut Input,
    },
    Nested {
        name: String,
        visibility: Visibility,
        schema: Schema<'a>,
    },
}

impl<'a> Node<'a> {
    fn name_mut(&mut self) -> &mut String {
        match self {
            Node::Leaf { name, .. } | Node::Nested { name, .. } => name,
        }
    }
}

/// The structural description of a circuit: the ordered list of its input
/// leaves, possibly grouped into nested descriptions.
///
/// A nested leaf is named `parent_child` and inherits the visibility of its
/// parent unless it sets its own. Array elements are named `name_i`.
#[derive(Debug, Default)]
pub struct Schema<'a> {
    nodes: Vec<Node<'a>>,
}

/// A leaf with its resolved name and visibility.
struct Leaf<'s> {
    name: String,
    public: bool,
    input: &'s mut Input,
}

impl<'a> Schema<'a> {
    /// Creates an empty description.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a leaf inheriting its visibility.
    pub fn input(self, name: &str, input: &'a mut Input) -> Self {
        self.leaf(name, Visibility::Unset, input)
    }

    /// Adds a secret leaf.
    pub fn secret(self, name: &str, input: &'a mut Input) -> Self {
        self.leaf(name, Visibility::Secret, input)
    }

    /// Adds a public leaf.
    pub fn public(self, name: &str, input: &'a mut Input) -> Self {
        self.leaf(name, Visibility::Public, input)
    }

    /// Adds a leaf the compiler skips.
    pub fn excluded(self, name: &str, input: &'a mut Input) -> Self {
        self.leaf(name, Visibility::Excluded, input)
    }

    /// Adds a leaf with the given visibility.
    pub fn leaf(
        mut self,
        name: &str,
        visibility: Visibility,
        input: &'a mut Input,
    ) -> Self {
        self.nodes.push(Node::Leaf {
            name: name.to_owned(),
            visibility,
            input,
        });
        self
    }

    /// Adds one leaf per element of `inputs`, named `name_0`, `name_1`...
    pub fn array(
        mut self,
        name: &str,
        visibility: Visibility,
        inputs: &'a mut [Input],
    ) -> Self {
        for (i, input) in inputs.iter_mut().enumerate() {
            self = self.leaf(&format!("{}_{}", name, i), visibility, input);
        }
        self
    }

    /// Adds a nested description.
    pub fn nested(
        mut self,
        name: &str,
        visibility: Visibility,
        schema: Schema<'a>,
    ) -> Self {
        self.nodes.push(Node::Nested {
            name: name.to_owned(),
            visibility,
            schema,
        });
        self
    }

    /// Renames the last added leaf or nested description.
    ///
    /// # Panics
    ///
    /// If the description is empty.
    pub fn renamed(mut self, name: &str) -> Self {
        match self.nodes.last_mut() {
            Some(node) => *node.name_mut() = name.to_owned(),
            None => panic!("nothing to rename in an empty schema"),
        }
        self
    }

    /// Resolves every non excluded leaf, depth-first.
    fn leaves(&mut self) -> Result<Vec<Leaf<'_>>, Error> {
        let mut leaves = Vec::new();
        self.collect(None, Visibility::Unset, &mut leaves)?;

        {
            let mut names = HashSet::new();
            for leaf in &leaves {
                if !names.insert(leaf.name.as_str()) {
                    return Err(Error::DuplicateInputName {
                        name: leaf.name.clone(),
                    });
                }
            }
        }
        Ok(leaves)
    }

    fn collect<'s>(
        &'s mut self,
        prefix: Option<&str>,
        inherited: Visibility,
        leaves: &mut Vec<Leaf<'s>>,
    ) -> Result<(), Error> {
        for node in &mut self.nodes {
            let (name, visibility) = match node {
                Node::Leaf {
                    name, visibility, ..
                }
                | Node::Nested {
                    name, visibility, ..
                } => (name.clone(), visibility.inherit(inherited)),
            };
            if visibility == Visibility::Excluded {
                continue;
            }
            if name.is_empty() {
                return Err(Error::EmptyInputName {
                    path: prefix.unwrap_or("<root>").to_owned(),
                });
            }
            let name = match prefix {
                Some(prefix) => format!("{}_{}", prefix, name),
                None => name,
            };
            match node {
                Node::Leaf { input, .. } => leaves.push(Leaf {
                    name,
                    public: visibility == Visibility::Public,
                    input: &mut **input,
                }),
                Node::Nested { schema, .. } => {
                    schema.collect(Some(name.as_str()), visibility, leaves)?
                }
            }
        }
        Ok(())
    }
}

/// Trait that should be implemented for any circuit to be compiled into an
/// [`R1CS`].
///
/// # Example
///
/// ```rust
/// use r1cs_core::prelude::*;
///
/// // x**3 + x + 5 == y
/// #[derive(Default)]
/// struct Cubic {
///     x: Input,
///     y: Input,
/// }
///
/// impl Circuit for Cubic {
///     fn schema(&mut self) -> Schema<'_> {
///         Schema::new()
///             .secret("x", &mut self.x)
///             .public("y", &mut self.y)
///     }
///
///     fn define(
///         &self,
///         _curve: CurveId,
///         cs: &mut ConstraintSystem,
///     ) -> Result<(), Error> {
///         let x = self.x.variable();
///         let x3 = cs.product([x, x, x]);
///         let lhs = cs.sum([Operand::from(x3), x.into(), 5.into()]);
///         cs.must_be_equal(lhs, &self.y);
///         Ok(())
///     }
/// }
///
/// fn main() -> Result<(), Error> {
///     let r1cs = compile_for::<r1cs_core::parameters::Bn254, _>(
///         &mut Cubic::default(),
///     )?;
///
///     let mut witness = Cubic::default();
///     witness.x.assign(3);
///     witness.y.assign(35);
///     r1cs.solve(&to_assignment(&mut witness)?)?;
///     Ok(())
/// }
/// ```
pub trait Circuit {
    /// Describes the input leaves of the circuit.
    fn schema(&mut self) -> Schema<'_>;

    /// Builds the constraints of the circuit. Every non excluded leaf is
    /// allocated when this is called.
    fn define(
        &self,
        curve: CurveId,
        cs: &mut ConstraintSystem,
    ) -> Result<(), Error>;
}

/// Output of [`compile`]: the generic system for [`CurveId::Unknown`], a
/// curve-bound system otherwise.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompiledR1CS {
    /// Generic system, can't be saved.
    Untyped(UntypedR1CS),
    /// System over the BLS12-381 scalar field
    Bls12_381(R1CS<ark_bls12_381::Fr>),
    /// System over the BLS12-377 scalar field
    Bls12_377(R1CS<ark_bls12_377::Fr>),
    /// System over the BN254 scalar field
    Bn254(R1CS<ark_bn254::Fr>),
    /// System over the BW6-761 scalar field
    Bw6_761(R1CS<ark_bw6_761::Fr>),
}

impl CompiledR1CS {
    /// Returns the curve the system is bound to.
    pub fn curve(&self) -> CurveId {
        match self {
            Self::Untyped(_) => CurveId::Unknown,
            Self::Bls12_381(r1cs) => r1cs.curve(),
            Self::Bls12_377(r1cs) => r1cs.curve(),
            Self::Bn254(r1cs) => r1cs.curve(),
            Self::Bw6_761(r1cs) => r1cs.curve(),
        }
    }

    /// Returns the number of constraints.
    pub fn nb_constraints(&self) -> usize {
        match self {
            Self::Untyped(r1cs) => r1cs.nb_constraints(),
            Self::Bls12_381(r1cs) => r1cs.nb_constraints(),
            Self::Bls12_377(r1cs) => r1cs.nb_constraints(),
            Self::Bn254(r1cs) => r1cs.nb_constraints(),
            Self::Bw6_761(r1cs) => r1cs.nb_constraints(),
        }
    }
}

/// Allocates the inputs of `circuit`, runs its definition and lowers it.
fn build<C>(curve: CurveId, circuit: &mut C) -> Result<UntypedR1CS, Error>
where
    C: Circuit,
{
    let span = tracing::debug_span!("compile", %curve);
    let _enter = span.enter();

    let mut cs = ConstraintSystem::new();
    {
        let mut schema = circuit.schema();
        let leaves = schema.leaves()?;
        for leaf in &leaves {
            match leaf.input {
                Input::Unset => {}
                Input::Allocated(_) => {
                    return Err(Error::CircuitAlreadyCompiled)
                }
                Input::Assigned(_) => {
                    return Err(Error::CircuitAlreadyAssigned)
                }
            }
        }
        for leaf in leaves {
            let variable = match leaf.public {
                true => cs.public_input(&leaf.name),
                false => cs.secret_input(&leaf.name),
            };
            *leaf.input = Input::Allocated(variable);
        }
    }
    tracing::debug!(
        public = cs.public_inputs.len(),
        secret = cs.secret_inputs.len(),
        "allocated circuit inputs"
    );

    circuit.define(curve, &mut cs)?;
    Ok(cs.into_r1cs())
}

/// Compiles `circuit` for `curve`.
///
/// [`CurveId::Unknown`] returns the generic [`CompiledR1CS::Untyped`] system.
pub fn compile<C>(
    curve: CurveId,
    circuit: &mut C,
) -> Result<CompiledR1CS, Error>
where
    C: Circuit,
{
    let untyped = build(curve, circuit)?;
    Ok(match curve {
        CurveId::Unknown => CompiledR1CS::Untyped(untyped),
        CurveId::Bls12_381 => CompiledR1CS::Bls12_381(
            untyped.specialize::<parameters::Bls12_381>(),
        ),
        CurveId::Bls12_377 => CompiledR1CS::Bls12_377(
            untyped.specialize::<parameters::Bls12_377>(),
        ),
        CurveId::Bn254 => {
            CompiledR1CS::Bn254(untyped.specialize::<parameters::Bn254>())
        }
        CurveId::Bw6_761 => {
            CompiledR1CS::Bw6_761(untyped.specialize::<parameters::Bw6_761>())
        }
    })
}

/// Compiles `circuit` into the generic system.
pub fn compile_untyped<C>(circuit: &mut C) -> Result<UntypedR1CS, Error>
where
    C: Circuit,
{
    build(CurveId::Unknown, circuit)
}

/// Compiles `circuit` for the curve `P`.
pub fn compile_for<P, C>(
    circuit: &mut C,
) -> Result<R1CS<P::ScalarField>, Error>
where
    P: CurveParameters,
    C: Circuit,
{
    Ok(build(P::ID, circuit)?.specialize::<P>())
}

/// Writes a curve-bound system to `path`.
///
/// The generic system is rejected with [`Error::UntypedR1CS`].
pub fn save<T>(r1cs: &CompiledR1CS, path: T) -> Result<(), Error>
where
    T: AsRef<Path>,
{
    let bytes = match r1cs {
        CompiledR1CS::Untyped(_) => return Err(Error::UntypedR1CS),
        CompiledR1CS::Bls12_381(r1cs) => to_bytes(r1cs)?,
        CompiledR1CS::Bls12_377(r1cs) => to_bytes(r1cs)?,
        CompiledR1CS::Bn254(r1cs) => to_bytes(r1cs)?,
        CompiledR1CS::Bw6_761(r1cs) => to_bytes(r1cs)?,
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

fn to_bytes<F>(r1cs: &R1CS<F>) -> Result<Vec<u8>, Error>
where
    F: PrimeField,
{
    let mut bytes = Vec::with_capacity(r1cs.serialized_size());
    r1cs.serialize(&mut bytes)?;
    Ok(bytes)
}

/// Reads a system written by [`save`].
pub fn load<T>(path: T) -> Result<CompiledR1CS, Error>
where
    T: AsRef<Path>,
{
    let bytes = std::fs::read(path)?;
    let reader = bytes.as_slice();
    // Peeks the curve tag, the system itself starts with it.
    Ok(match CurveId::deserialize(reader)? {
        CurveId::Unknown => return Err(Error::UntypedR1CS),
        CurveId::Bls12_381 => {
            CompiledR1CS::Bls12_381(R1CS::deserialize(reader)?)
        }
        CurveId::Bls12_377 => {
            CompiledR1CS::Bls12_377(R1CS::deserialize(reader)?)
        }
        CurveId::Bn254 => CompiledR1CS::Bn254(R1CS::deserialize(reader)?),
        CurveId::Bw6_761 => CompiledR1CS::Bw6_761(R1CS::deserialize(reader)?),
    })
}

/// Extracts the values assigned to the leaves of `circuit`.
pub fn to_assignment<C>(circuit: &mut C) -> Result<Assignment, Error>
where
    C: Circuit,
{
    let mut schema = circuit.schema();
    schema
        .leaves()?
        .into_iter()
        .map(|leaf| match leaf.input.value() {
            Some(value) => Ok((leaf.name, value.clone())),
            None => Err(Error::UnassignedInput { name: leaf.name }),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraint_system::helper::assignment;
    use crate::parameters::{Bls12_377, Bls12_381, Bn254};
    use crate::r1cs::ONE_WIRE_NAME;
    use ark_ff::One;

    #[derive(Default)]
    struct Cubic {
        x: Input,
        y: Input,
    }

    impl Circuit for Cubic {
        fn schema(&mut self) -> Schema<'_> {
            Schema::new().secret("x", &mut self.x).public("y", &mut self.y)
        }

        fn define(
            &self,
            _curve: CurveId,
            cs: &mut ConstraintSystem,
        ) -> Result<(), Error> {
            let x = self.x.variable();
            let x3 = cs.product([x, x, x]);
            let lhs = cs.sum([Operand::from(x3), x.into(), 5.into()]);
            cs.must_be_equal(lhs, &self.y);
            Ok(())
        }
    }

    fn cubic_witness(x: i64, y: i64) -> Assignment {
        let mut witness = Cubic::default();
        witness.x.assign(x);
        witness.y.assign(y);
        to_assignment(&mut witness).unwrap()
    }

    #[derive(Default)]
    struct Nested {
        a: Input,
        b: Input,
        c: Input,
        skipped: Input,
        v: [Input; 2],
    }

    impl Circuit for Nested {
        fn schema(&mut self) -> Schema<'_> {
            let inner = Schema::new()
                .input("a", &mut self.a)
                .secret("b", &mut self.b)
                .excluded("skipped", &mut self.skipped);
            Schema::new()
                .nested("p", Visibility::Public, inner)
                .input("c", &mut self.c)
                .renamed("renamed")
                .array("v", Visibility::Public, &mut self.v)
        }

        fn define(
            &self,
            _curve: CurveId,
            cs: &mut ConstraintSystem,
        ) -> Result<(), Error> {
            let sum = cs.sum(self.v.iter().map(Operand::from));
            cs.must_be_equal(sum, &self.a);
            let product = cs.mul(&self.b, &self.c);
            cs.tag(product, "product");
            Ok(())
        }
    }

    struct Failing {
        x: Input,
    }

    impl Circuit for Failing {
        fn schema(&mut self) -> Schema<'_> {
            Schema::new().secret("x", &mut self.x)
        }

        fn define(
            &self,
            _curve: CurveId,
            _cs: &mut ConstraintSystem,
        ) -> Result<(), Error> {
            Err(Error::CircuitDefinition {
                error: "unsupported curve".to_string(),
            })
        }
    }

    #[test]
    fn test_cubic_circuit() {
        let r1cs = compile_for::<Bls12_381, _>(&mut Cubic::default()).unwrap();
        assert_eq!(r1cs.nb_constraints(), 3);
        assert_eq!(r1cs.public_names(), &[ONE_WIRE_NAME, "y"]);
        assert!(r1cs.solve(&cubic_witness(3, 35)).is_ok());
        assert!(matches!(
            r1cs.solve(&cubic_witness(3, 36)),
            Err(Error::UnsatisfiedConstraint { .. })
        ));
    }

    #[test]
    fn test_compile_dispatches_on_curve() {
        let compiled = compile(CurveId::Bn254, &mut Cubic::default()).unwrap();
        assert_eq!(compiled.curve(), CurveId::Bn254);
        assert!(matches!(compiled, CompiledR1CS::Bn254(_)));

        let untyped = compile(CurveId::Unknown, &mut Cubic::default()).unwrap();
        assert_eq!(untyped.curve(), CurveId::Unknown);
        assert_eq!(untyped.nb_constraints(), compiled.nb_constraints());
        assert_eq!(
            compile_untyped(&mut Cubic::default()).unwrap().nb_constraints(),
            3
        );
    }

    #[test]
    fn test_square_circuit_is_a_single_constraint() {
        #[derive(Default)]
        struct Square {
            a: Input,
            b: Input,
        }

        impl Circuit for Square {
            fn schema(&mut self) -> Schema<'_> {
                Schema::new().secret("a", &mut self.a).public("b", &mut self.b)
            }

            fn define(
                &self,
                _curve: CurveId,
                cs: &mut ConstraintSystem,
            ) -> Result<(), Error> {
                let square = cs.mul(&self.a, &self.a);
                cs.must_be_equal(square, &self.b);
                Ok(())
            }
        }

        let r1cs = compile_for::<Bls12_377, _>(&mut Square::default()).unwrap();
        assert_eq!(r1cs.nb_constraints(), 1);

        // `b` is computed by the solver
        let values = r1cs.solve(&assignment(&[("a", 3)])).unwrap();
        assert_eq!(values[1], ark_bls12_377::Fr::from(9u64));
        assert!(r1cs.solve(&assignment(&[("a", 3), ("b", 8)])).is_err());
    }

    #[test]
    fn test_recompiling_fails() {
        let mut circuit = Cubic::default();
        compile_untyped(&mut circuit).unwrap();
        assert!(matches!(circuit.x, Input::Allocated(_)));
        assert!(matches!(
            compile_untyped(&mut circuit),
            Err(Error::CircuitAlreadyCompiled)
        ));
    }

    #[test]
    fn test_compiling_an_assigned_circuit_fails() {
        let mut circuit = Cubic::default();
        circuit.y.assign(35);
        assert!(matches!(
            compile_untyped(&mut circuit),
            Err(Error::CircuitAlreadyAssigned)
        ));
        assert_eq!(circuit.x, Input::Unset);
    }

    #[test]
    fn test_name_declared_public_and_secret() {
        struct Clash {
            a: Input,
            b: Input,
        }

        impl Circuit for Clash {
            fn schema(&mut self) -> Schema<'_> {
                Schema::new().public("x", &mut self.a).secret("x", &mut self.b)
            }

            fn define(
                &self,
                _curve: CurveId,
                _cs: &mut ConstraintSystem,
            ) -> Result<(), Error> {
                Ok(())
            }
        }

        let mut circuit = Clash {
            a: Input::new(),
            b: Input::new(),
        };
        match compile_untyped(&mut circuit) {
            Err(Error::DuplicateInputName { name }) => assert_eq!(name, "x"),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(circuit.a, Input::Unset);
    }

    #[test]
    fn test_empty_name() {
        struct Unnamed {
            x: Input,
        }

        impl Circuit for Unnamed {
            fn schema(&mut self) -> Schema<'_> {
                Schema::new().nested(
                    "p",
                    Visibility::Unset,
                    Schema::new().secret("", &mut self.x),
                )
            }

            fn define(
                &self,
                _curve: CurveId,
                _cs: &mut ConstraintSystem,
            ) -> Result<(), Error> {
                Ok(())
            }
        }

        match compile_untyped(&mut Unnamed { x: Input::new() }) {
            Err(Error::EmptyInputName { path }) => assert_eq!(path, "p"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_nested_schema() {
        let mut circuit = Nested::default();
        let r1cs = compile_untyped(&mut circuit).unwrap();
        assert_eq!(
            r1cs.public_names(),
            &[ONE_WIRE_NAME, "p_a", "v_0", "v_1"]
        );
        assert_eq!(r1cs.private_names(), &["p_b", "renamed"]);
        assert_eq!(circuit.skipped, Input::Unset);

        let mut witness = Nested::default();
        witness.a.assign(7);
        witness.b.assign(2);
        witness.c.assign(5);
        witness.v[0].assign(3);
        witness.v[1].assign(4);
        let assignment = to_assignment(&mut witness).unwrap();
        assert_eq!(assignment.len(), 5);
        assert_eq!(assignment["p_a"], BigInt::from(7));

        let r1cs = r1cs.specialize::<Bls12_381>();
        let values = r1cs.inspect(&assignment, false).unwrap();
        assert_eq!(values["product"], ark_bls12_381::Fr::from(10u64));
    }

    #[test]
    fn test_unassigned_input() {
        let mut witness = Cubic::default();
        witness.x.assign(3);
        match to_assignment(&mut witness) {
            Err(Error::UnassignedInput { name }) => assert_eq!(name, "y"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_definition_error_is_propagated() {
        let mut circuit = Failing { x: Input::new() };
        assert!(matches!(
            compile(CurveId::Bls12_381, &mut circuit),
            Err(Error::CircuitDefinition { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cubic.r1cs");

        for curve in [
            CurveId::Bls12_381,
            CurveId::Bls12_377,
            CurveId::Bn254,
            CurveId::Bw6_761,
        ] {
            let compiled = compile(curve, &mut Cubic::default()).unwrap();
            save(&compiled, &path).unwrap();
            assert_eq!(load(&path).unwrap(), compiled);
        }

        let loaded = match load(&path).unwrap() {
            CompiledR1CS::Bw6_761(r1cs) => r1cs,
            other => panic!("unexpected curve {}", other.curve()),
        };
        let values = loaded.solve(&cubic_witness(3, 35)).unwrap();
        assert_eq!(values[0], ark_bw6_761::Fr::one());
    }

    #[test]
    fn test_untyped_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("untyped.r1cs");
        let compiled =
            compile(CurveId::Unknown, &mut Cubic::default()).unwrap();
        assert!(matches!(save(&compiled, &path), Err(Error::UntypedR1CS)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.r1cs");
        // curve tag followed by a truncated body
        std::fs::write(&path, [3u8, 1, 2, 3]).unwrap();
        assert!(matches!(load(&path), Err(Error::Serialization(_))));
        std::fs::write(&path, [0u8]).unwrap();
        assert!(matches!(load(&path), Err(Error::UntypedR1CS)));
        assert!(matches!(
            load(dir.path().join("missing.r1cs")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_witness_for_bn254() {
        let r1cs = compile_for::<Bn254, _>(&mut Cubic::default()).unwrap();
        let values = r1cs.solve(&cubic_witness(-2, -5)).unwrap();
        assert_eq!(values[1], -ark_bn254::Fr::from(5u64));
    }
}
