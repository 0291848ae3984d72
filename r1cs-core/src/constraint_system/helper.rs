// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-GARAGE. All rights reserved.

//! Testing Helper Functions

use super::ConstraintSystem;
use crate::circuit::Assignment;
use crate::error::Error;
use crate::parameters::CurveParameters;
use hashbrown::HashMap;
use num_bigint::BigInt;

/// Builds an assignment out of `(name, value)` pairs.
pub(crate) fn assignment(inputs: &[(&str, i64)]) -> Assignment {
    inputs
        .iter()
        .map(|(name, value)| (name.to_string(), BigInt::from(*value)))
        .collect()
}

/// Takes a generic gadget function, lowers and specializes it for `P` and
/// solves it against `inputs`. Returns the values of the tagged wires.
pub(crate) fn gadget_tester<P>(
    gadget: impl FnOnce(&mut ConstraintSystem),
    inputs: &[(&str, i64)],
) -> Result<HashMap<String, P::ScalarField>, Error>
where
    P: CurveParameters,
{
    let mut cs = ConstraintSystem::new();
    gadget(&mut cs);
    let r1cs = cs.into_r1cs().specialize::<P>();
    r1cs.inspect(&assignment(inputs), false)
}
