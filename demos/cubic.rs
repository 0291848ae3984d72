//! Compiles `x**3 + x + 5 == y`, saves it and solves it for `x = 3`.
//!
//! Run with `RUST_LOG=debug` to see the compiler spans.

use ark_r1cs_compiler::parameters::Bn254;
use ark_r1cs_compiler::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
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
        cs.tag(x3, "x^3");
        cs.must_be_equal(lhs, &self.y);
        Ok(())
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let compiled = compile(CurveId::Bn254, &mut Cubic::default())?;
    println!(
        "{} constraints over {}",
        compiled.nb_constraints(),
        compiled.curve()
    );

    let path = std::env::temp_dir().join("cubic.r1cs");
    save(&compiled, &path)?;
    let r1cs = match load(&path)? {
        CompiledR1CS::Bn254(r1cs) => r1cs,
        other => unreachable!("saved a {} system", other.curve()),
    };

    let mut witness = Cubic::default();
    witness.x.assign(3);
    witness.y.assign(35);
    let values = r1cs.inspect(&to_assignment(&mut witness)?, true)?;
    let mut names: Vec<_> = values.keys().collect();
    names.sort();
    for name in names {
        println!("{} = {}", name, values[name]);
    }

    // Compiling for a specific curve without going through `CompiledR1CS`.
    let typed = compile_for::<Bn254, _>(&mut Cubic::default())?;
    assert_eq!(typed.nb_constraints(), compiled.nb_constraints());
    Ok(())
}
