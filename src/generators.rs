//! Cube list generators and classic test functions

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cover::CubeList;
use crate::cube::Value;
use crate::error::{Error, Result};
use crate::problem::ProblemInfo;
use crate::truth_table::minterm;

/// Random cubes
pub mod random {
    use super::*;

    /// Random cover with the given number of cubes
    ///
    /// Each input is don't-care with probability `dc_ratio`, otherwise a random literal.
    /// Each output is set with probability 1/2, and every cube asserts at least one output.
    pub fn random_cover(pi: &ProblemInfo, nb_cubes: usize, dc_ratio: f64, seed: u64) -> CubeList {
        let mut rng = SmallRng::seed_from_u64(seed);
        let dc_ratio = dc_ratio.clamp(0.0, 1.0);
        let mut ret = pi.new_list();
        for _ in 0..nb_cubes {
            let mut c = pi.new_cube();
            for i in 0..pi.nb_inputs() {
                if !rng.gen_bool(dc_ratio) {
                    c.put(i, Value::from(rng.gen::<bool>()));
                }
            }
            for o in 0..pi.nb_outputs() {
                c.put_out(o, rng.gen());
            }
            if c.is_out_empty() {
                c.put_out(rng.gen_range(0..pi.nb_outputs()), true);
            }
            ret.cubes_mut().push(c);
        }
        ret
    }

    /// Random problem and cover, with a random number of inputs and outputs
    pub fn random_problem(
        max_inputs: usize,
        max_outputs: usize,
        nb_cubes: usize,
        seed: u64,
    ) -> (ProblemInfo, CubeList) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let pi = ProblemInfo::new(
            rng.gen_range(1..=max_inputs.max(1)),
            rng.gen_range(1..=max_outputs.max(1)),
        );
        let dc_ratio = rng.gen_range(0.0..0.8);
        let l = random_cover(&pi, nb_cubes, dc_ratio, rng.gen());
        (pi, l)
    }
}

/// Symmetric functions of all inputs
pub mod symmetric {
    use super::*;

    /// Maximum number of inputs of a symmetric function
    pub const MAX_SYMMETRIC_INPUTS: usize = 16;

    /// Single-output function of the number of inputs set, as a list of minterms
    pub fn from_count<F: Fn(usize) -> bool>(
        nb_inputs: usize,
        f: F,
    ) -> Result<(ProblemInfo, CubeList)> {
        if nb_inputs > MAX_SYMMETRIC_INPUTS {
            return Err(Error::LimitExceeded {
                what: "symmetric function input",
                limit: MAX_SYMMETRIC_INPUTS,
            });
        }
        let pi = ProblemInfo::new(nb_inputs, 1);
        let mut ret = pi.new_list();
        for m in 0..(1usize << nb_inputs) {
            if f(m.count_ones() as usize) {
                ret.push(minterm(&pi, m, 0))?;
            }
        }
        Ok((pi, ret))
    }

    /// Odd parity of the inputs: no two minterms can be merged
    pub fn parity(nb_inputs: usize) -> Result<(ProblemInfo, CubeList)> {
        from_count(nb_inputs, |n| n % 2 == 1)
    }

    /// True when more than half of the inputs are set
    pub fn majority(nb_inputs: usize) -> Result<(ProblemInfo, CubeList)> {
        from_count(nb_inputs, |n| 2 * n > nb_inputs)
    }
}

/// Adder generators
pub mod adder {
    use super::*;

    /// Maximum width of the adder operands
    pub const MAX_ADDER_BITS: usize = 8;

    /// Ripple-carry adder of two `len`-bit numbers, as multi-output minterms
    ///
    /// Inputs are a0, b0, a1, b1...; outputs are the sum bits then the carry.
    pub fn ripple_carry(len: usize) -> Result<(ProblemInfo, CubeList)> {
        if len > MAX_ADDER_BITS {
            return Err(Error::LimitExceeded {
                what: "adder bit",
                limit: MAX_ADDER_BITS,
            });
        }
        let mut inputs = Vec::new();
        for i in 0..len {
            inputs.push(format!("a{i}"));
            inputs.push(format!("b{i}"));
        }
        let mut outputs: Vec<String> = (0..len).map(|i| format!("s{i}")).collect();
        outputs.push("cout".to_string());
        let pi = ProblemInfo::with_labels(&inputs, &outputs)?;
        let mut ret = pi.new_list();
        for m in 0..(1usize << (2 * len)) {
            let (mut a, mut b) = (0usize, 0usize);
            for i in 0..len {
                a |= (m >> (2 * i) & 1) << i;
                b |= (m >> (2 * i + 1) & 1) << i;
            }
            let sum = a + b;
            if sum == 0 {
                continue;
            }
            let mut c = minterm(&pi, m, 0);
            for o in 0..=len {
                c.put_out(o, sum >> o & 1 != 0);
            }
            ret.push(c)?;
        }
        Ok((pi, ret))
    }
}

pub use adder::ripple_carry;
pub use random::{random_cover, random_problem};
pub use symmetric::{majority, parity};
