// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A collection of all recoverable errors encountered while compiling,
//! persisting or solving a circuit.
//!
//! Malformed circuit definitions (invalid operand kinds, duplicated input
//! names or tags passed to the arithmetic API) are not reported here: they
//! abort construction with a panic.

use ark_serialize::SerializationError;
use thiserror::Error;

/// Defines all possible errors that can be encountered in the compiler.
#[derive(Debug, Error)]
pub enum Error {
    // Driver errors
    /// A leaf of the circuit description already holds an allocated wire.
    #[error("circuit was already compiled")]
    CircuitAlreadyCompiled,
    /// A leaf of the circuit description already holds a concrete value.
    #[error("circuit has some assigned values, can't compile")]
    CircuitAlreadyAssigned,
    /// Two leaves of the circuit description resolve to the same name.
    #[error("duplicate input name {name:?}")]
    DuplicateInputName {
        /// Resolved input name
        name: String,
    },
    /// A leaf of the circuit description resolves to an empty name.
    #[error("input at {path:?} has an empty name")]
    EmptyInputName {
        /// Structural path of the leaf
        path: String,
    },
    /// A leaf has no value while extracting an assignment.
    #[error("{name} has no assigned value")]
    UnassignedInput {
        /// Resolved input name
        name: String,
    },
    /// The user-supplied definition callback failed.
    #[error("circuit definition failed: {error}")]
    CircuitDefinition {
        /// Reason given by the circuit
        error: String,
    },

    // Persistence errors
    /// Only curve-bound systems can be persisted.
    #[error("trying to serialize untyped R1CS")]
    UntypedR1CS,
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    // Solver errors
    /// A constraint does not hold for the computed witness.
    #[error("constraint #{index} is not satisfied")]
    UnsatisfiedConstraint {
        /// Constraint index
        index: usize,
    },
    /// The wire determined by a constraint is multiplied by zero.
    #[error("division by zero while solving constraint #{index}")]
    DivisionByZero {
        /// Constraint index
        index: usize,
    },
    /// A constraint still has unknown wires it cannot determine.
    #[error("constraint #{index} has unknown wires it cannot determine")]
    UnsolvableConstraint {
        /// Constraint index
        index: usize,
    },
    /// An input was neither assigned nor computed by any constraint.
    #[error("no value for input {name:?}")]
    MissingAssignment {
        /// Input name
        name: String,
    },
    /// The assignment names an input the system does not have.
    #[error("assignment refers to unknown input {name:?}")]
    UnknownInput {
        /// Input name
        name: String,
    },
}
