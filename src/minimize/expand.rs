//! Expansion of cubes to prime implicants

use itertools::Itertools;
use log::debug;

use crate::cover::{complement, scc_cubes, CubeList};
use crate::cube::{Cube, Value};
use crate::error::{Error, Result};
use crate::problem::ProblemInfo;
use crate::progress::Task;

/// Expand each cube against the OFF-set: inputs are raised to don't-care, then outputs
/// are added, as long as the cube stays disjoint from the OFF-set
///
/// Each resulting cube is prime. Contained cubes are removed afterwards.
pub(crate) fn expand_cubes(pi: &ProblemInfo, cubes: &mut Vec<Cube>, off: &[Cube]) -> Result<()> {
    pi.run_task(Task::Primes, cubes.len(), || {
        for (i, c) in cubes.iter_mut().enumerate() {
            if c.is_void() {
                continue;
            }
            expand_cube(c, off);
            pi.notify(|p| p.advance(Task::Primes, i + 1));
        }
        scc_cubes(cubes);
        Ok(())
    })
}

fn expand_cube(c: &mut Cube, off: &[Cube]) {
    let blocked = |c: &Cube| off.iter().any(|o| o.intersects(c));
    for var in 0..c.nb_inputs() {
        let v = c.value(var);
        if v.is_literal() {
            c.put(var, Value::DontCare);
            if blocked(c) {
                c.put(var, v);
            }
        }
    }
    for o in 0..c.nb_outputs() {
        if !c.out(o) {
            c.put_out(o, true);
            if blocked(c) {
                c.put_out(o, false);
            }
        }
    }
}

/// Non-void cubes of both lists
pub(crate) fn care_cubes(on: &CubeList, dc: &CubeList) -> Result<Vec<Cube>> {
    let mut ret = Vec::new();
    ret.try_reserve(on.len() + dc.len())?;
    ret.extend(on.iter().chain(dc.iter()).filter(|c| !c.is_void()).cloned());
    Ok(ret)
}

/// Replace the ON-set by prime implicants of ON ∪ DC that cover it
///
/// Every cube is expanded to a prime, and primes contained in another are removed.
/// The list is unchanged on error.
pub fn primes(pi: &ProblemInfo, on: &mut CubeList, dc: &CubeList) -> Result<()> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let off = complement(pi, &care_cubes(on, dc)?)?;
    let mut cubes: Vec<Cube> = on.iter().filter(|c| !c.is_void()).cloned().collect();
    expand_cubes(pi, &mut cubes, &off)?;
    debug!("Expanded {} cubes to {} primes", on.len(), cubes.len());
    *on = CubeList::from_vec(pi.shape(), cubes);
    Ok(())
}

/// All prime implicants of the non-void cubes, by iterated consensus
pub(crate) fn all_primes_bounded(
    cubes: &[Cube],
    max_primes: Option<usize>,
) -> Result<Vec<Cube>> {
    let mut ret: Vec<Cube> = cubes.iter().filter(|c| !c.is_void()).cloned().collect();
    scc_cubes(&mut ret);
    loop {
        let mut new: Vec<Cube> = Vec::new();
        for (a, b) in ret.iter().tuple_combinations() {
            let Some(c) = a.consensus_with(b) else {
                continue;
            };
            if c.is_void() || ret.iter().chain(new.iter()).any(|d| d.covers(&c)) {
                continue;
            }
            new.retain(|d| !c.covers(d));
            new.try_reserve(1)?;
            new.push(c);
        }
        if new.is_empty() {
            break;
        }
        ret.try_reserve(new.len())?;
        ret.extend(new);
        scc_cubes(&mut ret);
        if let Some(limit) = max_primes {
            if ret.len() > limit {
                return Err(Error::LimitExceeded {
                    what: "prime",
                    limit,
                });
            }
        }
    }
    Ok(ret)
}

/// Complete set of prime implicants of ON ∪ DC
///
/// The number of primes can grow exponentially with the number of inputs.
pub fn all_primes(pi: &ProblemInfo, on: &CubeList, dc: &CubeList) -> Result<CubeList> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let cubes = all_primes_bounded(&care_cubes(on, dc)?, None)?;
    Ok(CubeList::from_vec(pi.shape(), cubes))
}
