// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Collection of functions needed to build, compile and solve circuits.
//!
//! Use this as the only import that you need to interact with the principal
//! data structures of the compiler.

pub use crate::{
    circuit::{
        self, compile, compile_for, compile_untyped, load, save,
        to_assignment, Assignment, Circuit, CompiledR1CS, Input, Schema,
        Visibility,
    },
    constraint_system::{
        ConstraintSystem, Expression, LinearCombination, Operand, Variable,
    },
    error::Error,
    parameters::{CurveId, CurveParameters},
    r1cs::{Coefficient, SolverHint, UntypedR1CS, R1C, R1CS},
};
