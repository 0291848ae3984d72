// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The constraint system module stores the implementation of the
//! [`ConstraintSystem`] builder, as well as the variable and expression model
//! it records before the circuit is lowered into an R1CS.

mod arithmetic;
mod boolean;
mod lookup;
mod range;

pub(crate) mod composer;
pub(crate) mod expression;
#[cfg(test)]
pub(crate) mod helper;
pub(crate) mod variable;

pub(crate) use expression::Gate;
pub(crate) use variable::WireKind;

pub use composer::ConstraintSystem;
pub use expression::Expression;
pub use variable::{LinearCombination, Operand, Variable};
