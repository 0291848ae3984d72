// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # R1CS core
//!
//! _Constraint-system builder and R1CS compiler on top of the
//! [arkworks](https://github.com/arkworks-rs) algebra stack._
//!
//! A circuit is described by a [`Circuit`](circuit::Circuit): a schema of
//! named input slots plus a `define` callback that drives the arithmetic API
//! of the [`ConstraintSystem`](constraint_system::ConstraintSystem). The
//! resulting gate graph is lowered into an
//! [`UntypedR1CS`](r1cs::UntypedR1CS), whose coefficients are plain signed
//! integers, and finally specialized into an [`R1CS`](r1cs::R1CS) over the
//! scalar field of one of the supported pairing-friendly curves.
//!
//! Every constraint carries a [`SolverHint`](r1cs::SolverHint) telling a
//! witness solver which wire it determines, so a partial assignment (the
//! circuit inputs) can be forward-solved into a full witness.
// Variables have always the same names in respect to wires.
#![allow(clippy::many_single_char_names)]
// Bool expr are usually easier to read with match statements.
#![allow(clippy::match_bool)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod util;

pub mod circuit;
pub mod constraint_system;
pub mod error;
pub mod parameters;
pub mod prelude;
pub mod r1cs;
