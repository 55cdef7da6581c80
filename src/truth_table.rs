//! Conversion between cube lists and truth tables
//!
//! Truth tables are [`volute::Lut`], with input `i` as bit `i` of the minterm index.

use volute::Lut;

use crate::cover::CubeList;
use crate::cube::{Cube, Value};
use crate::error::{Error, Result};
use crate::problem::ProblemInfo;

/// Maximum number of inputs for a truth table conversion
pub const MAX_LUT_INPUTS: usize = 16;

fn check_inputs(pi: &ProblemInfo) -> Result<()> {
    if pi.nb_inputs() > MAX_LUT_INPUTS {
        Err(Error::LimitExceeded {
            what: "truth table input",
            limit: MAX_LUT_INPUTS,
        })
    } else {
        Ok(())
    }
}

fn check_output(pi: &ProblemInfo, output: usize) -> Result<()> {
    if output < pi.nb_outputs() {
        Ok(())
    } else {
        Err(Error::IndexError {
            what: "output",
            index: output,
            count: pi.nb_outputs(),
        })
    }
}

/// Truth table of one output of a cube list
pub fn to_lut(pi: &ProblemInfo, list: &CubeList, output: usize) -> Result<Lut> {
    pi.check_list(list)?;
    check_inputs(pi)?;
    check_output(pi, output)?;
    let mut ret = Lut::zero(pi.nb_inputs());
    for c in list.iter() {
        if c.is_illegal() || !c.out(output) {
            continue;
        }
        let mut base = 0usize;
        let mut free = 0usize;
        for (i, v) in c.values().enumerate() {
            match v {
                Value::One => base |= 1 << i,
                Value::DontCare => free |= 1 << i,
                _ => (),
            }
        }
        // Enumerate the subsets of the don't-care positions
        let mut sub = free;
        loop {
            ret.set_bit(base | sub);
            if sub == 0 {
                break;
            }
            sub = (sub - 1) & free;
        }
    }
    Ok(ret)
}

/// Minterms of a truth table, as cubes asserting the given output
pub fn from_lut(pi: &ProblemInfo, lut: &Lut, output: usize) -> Result<CubeList> {
    check_inputs(pi)?;
    check_output(pi, output)?;
    if lut.num_vars() != pi.nb_inputs() {
        return Err(Error::ShapeMismatch {
            expected: pi.shape(),
            found: crate::cube::Shape::new(lut.num_vars(), pi.nb_outputs()),
        });
    }
    let mut ret = pi.new_list();
    for m in 0..(1usize << pi.nb_inputs()) {
        if lut.get_bit(m) {
            ret.push(minterm(pi, m, output))?;
        }
    }
    Ok(ret)
}

/// Cube of a single input point, given as a bit mask, asserting one output
pub(crate) fn minterm(pi: &ProblemInfo, mask: usize, output: usize) -> Cube {
    let mut ret = pi.new_cube();
    for i in 0..pi.nb_inputs() {
        ret.put(i, Value::from(mask >> i & 1 != 0));
    }
    ret.put_out(output, true);
    ret
}
