//! Removal of redundant cubes from a cover

use std::cmp::Reverse;

use crate::cover::{covers_cube, CubeList};
use crate::cube::Cube;
use crate::error::Result;
use crate::problem::ProblemInfo;
use crate::progress::Task;

/// Cubes other than `skip` that are still in the cover, followed by the don't-care cubes
fn others(cubes: &[Cube], removed: &[bool], skip: usize, dc: &[Cube]) -> Result<Vec<Cube>> {
    let mut ret = Vec::new();
    ret.try_reserve(cubes.len() + dc.len())?;
    for (j, c) in cubes.iter().enumerate() {
        if j != skip && !removed[j] {
            ret.push(c.clone());
        }
    }
    ret.extend(dc.iter().cloned());
    Ok(ret)
}

/// Greedily remove cubes covered by the rest of the cover and the don't-care set
///
/// With literal weighting, cubes with more literals are tried first, so that the cover
/// keeps the larger cubes.
pub(crate) fn irredundant_cubes(
    pi: &ProblemInfo,
    cubes: &mut Vec<Cube>,
    dc: &[Cube],
    weight_by_literals: bool,
) -> Result<()> {
    let n = cubes.len();
    let mut order: Vec<usize> = (0..n).collect();
    if weight_by_literals {
        order.sort_by_key(|i| Reverse(cubes[*i].literal_count()));
    }
    pi.run_task(Task::Irredundant, n, || {
        let mut removed = vec![false; n];
        for (done, &i) in order.iter().enumerate() {
            let rest = others(cubes, &removed, i, dc)?;
            if covers_cube(pi, &rest, &cubes[i])? {
                removed[i] = true;
            }
            pi.notify(|p| p.advance(Task::Irredundant, done + 1));
        }
        let mut it = removed.iter();
        cubes.retain(|_| !*it.next().unwrap_or(&false));
        Ok(())
    })
}

/// Remove redundant cubes from the ON-set, until no cube can be removed without
/// losing ON-set points outside the don't-care set
///
/// This is greedy: the result is irredundant but not necessarily of minimum size.
pub fn irredundant(
    pi: &ProblemInfo,
    on: &mut CubeList,
    dc: &CubeList,
    weight_by_literals: bool,
) -> Result<()> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let mut cubes: Vec<Cube> = on.iter().filter(|c| !c.is_void()).cloned().collect();
    irredundant_cubes(pi, &mut cubes, dc.cubes(), weight_by_literals)?;
    *on = CubeList::from_vec(pi.shape(), cubes);
    Ok(())
}

/// Cubes that are not covered by the other cubes and the don't-care set
///
/// For a list of primes, these are the essential primes: every cover made of these
/// primes contains them.
pub fn essential_primes(pi: &ProblemInfo, primes: &CubeList, dc: &CubeList) -> Result<CubeList> {
    pi.check_list(primes)?;
    pi.check_list(dc)?;
    let cubes = primes.cubes();
    let removed = vec![false; cubes.len()];
    let mut ret = CubeList::new(pi.shape());
    for (i, c) in cubes.iter().enumerate() {
        if c.is_void() {
            continue;
        }
        let rest = others(cubes, &removed, i, dc.cubes())?;
        if !covers_cube(pi, &rest, c)? {
            ret.push(c.clone())?;
        }
    }
    Ok(ret)
}
