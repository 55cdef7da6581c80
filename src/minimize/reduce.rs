//! Reduction of cubes to the smallest cubes that keep the cover

use crate::cover::{cofactor_cubes, complement, CubeList};
use crate::cube::Cube;
use crate::error::Result;
use crate::problem::ProblemInfo;
use crate::progress::Task;

/// Shrink each cube in turn to the supercube of its points not covered by the other
/// cubes and the don't-care set; cubes left with no such point are removed
///
/// Cubes are processed in order, each seeing the already reduced previous cubes.
pub(crate) fn reduce_cubes(pi: &ProblemInfo, cubes: &mut Vec<Cube>, dc: &[Cube]) -> Result<()> {
    let n = cubes.len();
    pi.run_task(Task::Reduce, n, || {
        let mut removed = vec![false; n];
        for i in 0..n {
            let mut rest = Vec::new();
            rest.try_reserve(n + dc.len())?;
            for (j, c) in cubes.iter().enumerate() {
                if j != i && !removed[j] {
                    rest.push(c.clone());
                }
            }
            rest.extend(dc.iter().cloned());

            let c = &cubes[i];
            let sub = cofactor_cubes(&rest, c)?;
            let uncovered = complement(pi, &sub)?;
            let reduced = uncovered
                .iter()
                .map(|u| u.meet(c))
                .filter(|u| !u.is_void())
                .reduce(|a, b| a.join(&b));
            match reduced {
                Some(r) => cubes[i] = r,
                None => removed[i] = true,
            }
            pi.notify(|p| p.advance(Task::Reduce, i + 1));
        }
        let mut it = removed.iter();
        cubes.retain(|_| !*it.next().unwrap_or(&false));
        Ok(())
    })
}

/// Reduce every cube of the ON-set as much as possible while keeping the covered function
///
/// Used between iterations of the heuristic minimizer, to let a new expansion find
/// different primes.
pub fn reduce(pi: &ProblemInfo, on: &mut CubeList, dc: &CubeList) -> Result<()> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let mut cubes: Vec<Cube> = on.iter().filter(|c| !c.is_void()).cloned().collect();
    reduce_cubes(pi, &mut cubes, dc.cubes())?;
    *on = CubeList::from_vec(pi.shape(), cubes);
    Ok(())
}
