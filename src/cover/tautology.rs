use log::trace;

use super::algebra::cofactor_cubes;
use super::list::CubeList;
use crate::cube::Cube;
use crate::error::Result;
use crate::problem::ProblemInfo;
use crate::split::{is_unate, select, SplitMode};

/// Returns true if the non-void cubes cover every input point for every output
pub(crate) fn tautology(pi: &ProblemInfo, cubes: &[Cube]) -> Result<bool> {
    if cubes.is_empty() {
        return Ok(false);
    }
    let shape = pi.shape();

    // Outputs asserted by some cube, and outputs asserted by a cube with no literal
    let mut asserted = vec![0u64; shape.out_words()];
    let mut settled = vec![0u64; shape.out_words()];
    let mut has_universe = false;
    for c in cubes {
        let universe = c.is_input_universe();
        has_universe |= universe;
        for (w, x) in c.out_words().iter().enumerate() {
            asserted[w] |= x;
            if universe {
                settled[w] |= x;
            }
        }
    }
    let full = |words: &[u64]| {
        words
            .iter()
            .enumerate()
            .all(|(w, x)| *x == shape.out_mask(w))
    };
    if shape.nb_outputs() == 0 {
        if has_universe {
            return Ok(true);
        }
    } else {
        if !full(&asserted) {
            return Ok(false);
        }
        if full(&settled) {
            return Ok(true);
        }
    }

    // A unate cover is a tautology only if it contains the universal cube
    if is_unate(cubes) {
        return Ok(false);
    }

    let Some(split) = select(pi, cubes, SplitMode::Binate) else {
        return Ok(false);
    };
    trace!("Tautology split on {:?} for {} cubes", split, cubes.len());
    for side in split.sides(shape) {
        let sub = cofactor_cubes(cubes, &side)?;
        if !tautology(pi, &sub)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns true if the cubes cover every point of `c`
pub(crate) fn covers_cube(pi: &ProblemInfo, cubes: &[Cube], c: &Cube) -> Result<bool> {
    if c.is_void() {
        return Ok(true);
    }
    // A single cube containing c is the common case
    if cubes.iter().any(|d| d.covers(c)) {
        return Ok(true);
    }
    let sub = cofactor_cubes(cubes, c)?;
    tautology(pi, &sub)
}

impl CubeList {
    /// Returns true if the list covers the whole space: every input point for every output
    pub fn is_tautology(&self, pi: &ProblemInfo) -> Result<bool> {
        pi.check_list(self)?;
        let cubes: Vec<Cube> = self.iter().filter(|c| !c.is_void()).cloned().collect();
        tautology(pi, &cubes)
    }
}
