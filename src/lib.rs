// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # R1CS compiler
//!
//! _A pure Rust arithmetic-circuit compiler producing Rank-1 Constraint
//! Systems over the [arkworks](https://github.com/arkworks-rs) curves._
//!
//! Circuits are written against the imperative
//! [`ConstraintSystem`](constraint_system::ConstraintSystem) API, lowered into
//! field-agnostic bilinear constraints and specialized for BLS12-381,
//! BLS12-377, BN254 or BW6-761. Every constraint carries a solver hint, so a
//! witness can be forward-solved from the circuit inputs.
//!
//! See the `cubic` demo for an end-to-end walkthrough.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

pub use r1cs_core::*;
