//! Two-level minimization of cube lists
//!
//! The heuristic minimizer expands the ON-set to primes and removes redundant ones;
//! optionally it then iterates reduction, expansion and redundancy removal while the
//! cover improves. The exact minimizer solves the covering problem with a SAT solver.
//!
//! ```
//! use cubemin::minimize::minimize;
//! use cubemin::ProblemInfo;
//!
//! let pi = ProblemInfo::new(3, 1);
//! let mut on = pi.parse_list(&["000 1", "001 1", "010 1", "011 1"]).unwrap();
//! minimize(&pi, &mut on, &pi.new_list(), true, false).unwrap();
//! assert_eq!(on.to_string(), "0-- 1\n");
//! ```

mod exact;
mod expand;
mod irredundant;
mod reduce;

use log::debug;

use crate::cover::{complement, CubeList};
use crate::cube::Cube;
use crate::error::Result;
use crate::problem::ProblemInfo;
use crate::progress::Task;

pub use exact::{minimize_exact, ExactLimits};
pub use expand::{all_primes, primes};
pub use irredundant::{essential_primes, irredundant};
pub use reduce::reduce;

use expand::{care_cubes, expand_cubes};
use irredundant::irredundant_cubes;
use reduce::reduce_cubes;

/// Cost of a cover: number of cubes, then number of input literals
fn cost(cubes: &[Cube]) -> (usize, usize) {
    (cubes.len(), cubes.iter().map(|c| c.literal_count()).sum())
}

/// Returns true if the new cover is no worse on both counts and better on one
fn improves(new: (usize, usize), old: (usize, usize)) -> bool {
    new.0 <= old.0 && new.1 <= old.1 && new != old
}

fn minimize_cubes(
    pi: &ProblemInfo,
    on: &CubeList,
    dc: &CubeList,
    use_greedy: bool,
    weight_by_literals: bool,
) -> Result<Vec<Cube>> {
    let off = complement(pi, &care_cubes(on, dc)?)?;
    let dc_cubes: Vec<Cube> = dc.iter().filter(|c| !c.is_void()).cloned().collect();
    let mut best: Vec<Cube> = on.iter().filter(|c| !c.is_void()).cloned().collect();
    expand_cubes(pi, &mut best, &off)?;
    irredundant_cubes(pi, &mut best, &dc_cubes, weight_by_literals)?;
    let (nb_cubes, nb_literals) = cost(&best);
    let status = format!("Initial cover: {nb_cubes} cubes, {nb_literals} literals");
    debug!("{status}");
    pi.notify(|p| p.message(&status));
    if !use_greedy {
        return Ok(best);
    }

    let mut iteration = 0;
    loop {
        let mut next = best.clone();
        reduce_cubes(pi, &mut next, &dc_cubes)?;
        expand_cubes(pi, &mut next, &off)?;
        irredundant_cubes(pi, &mut next, &dc_cubes, weight_by_literals)?;
        iteration += 1;
        pi.notify(|p| p.advance(Task::Minimize, iteration));
        if !improves(cost(&next), cost(&best)) {
            break;
        }
        best = next;
        let (nb_cubes, nb_literals) = cost(&best);
        let status = format!("Iteration {iteration}: {nb_cubes} cubes, {nb_literals} literals");
        debug!("{status}");
        pi.notify(|p| p.message(&status));
    }
    Ok(best)
}

/// Minimize the ON-set, using the don't-care set
///
/// The result covers the ON-set, stays within ON ∪ DC, and has no more cubes and no more
/// literals than the original list. With `use_greedy`, the cover is improved iteratively;
/// with `weight_by_literals`, redundant cubes with many literals are removed first.
///
/// The ON-set is only modified on success.
pub fn minimize(
    pi: &ProblemInfo,
    on: &mut CubeList,
    dc: &CubeList,
    use_greedy: bool,
    weight_by_literals: bool,
) -> Result<()> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let ret = pi.run_task(Task::Minimize, 0, || {
        minimize_cubes(pi, on, dc, use_greedy, weight_by_literals)
    })?;
    *on = CubeList::from_vec(pi.shape(), ret);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::equiv::is_equivalent;
    use crate::generators::{parity, random_cover};
    use crate::progress::Recorder;
    use crate::truth_table::to_lut;

    #[test]
    fn test_xor() {
        let pi = ProblemInfo::new(2, 1);
        let f = pi.parse_list(&["01 1", "10 1"]).unwrap();
        let mut on = f.clone();
        minimize(&pi, &mut on, &pi.new_list(), true, false).unwrap();
        assert_eq!(on, f);
        assert_eq!(on.literal_count(), 4);
    }

    #[test]
    fn test_single_literal() {
        let pi = ProblemInfo::new(3, 1);
        let mut on = pi.parse_list(&["000 1", "001 1", "010 1", "011 1"]).unwrap();
        minimize(&pi, &mut on, &pi.new_list(), false, false).unwrap();
        assert_eq!(on.len(), 1);
        assert_eq!(on.literal_count(), 1);
    }

    #[test]
    fn test_parity_is_minimal() {
        let (pi, f) = parity(4).unwrap();
        let mut on = f.clone();
        minimize(&pi, &mut on, &pi.new_list(), true, true).unwrap();
        assert_eq!(on.len(), 8);
        assert!(is_equivalent(&pi, &on, &f).unwrap());
    }

    #[test]
    fn test_dont_care() {
        let pi = ProblemInfo::new(2, 1);
        let mut on = pi.parse_list(&["00 1", "11 1"]).unwrap();
        let dc = pi.parse_list(&["01 1"]).unwrap();
        minimize(&pi, &mut on, &dc, true, false).unwrap();
        let mut expected = pi.parse_list(&["0- 1", "-1 1"]).unwrap();
        on.sort();
        expected.sort();
        assert_eq!(on, expected);
    }

    #[test]
    fn test_shape_mismatch() {
        let pi = ProblemInfo::new(2, 1);
        let mut on = ProblemInfo::new(3, 1).parse_list(&["000 1"]).unwrap();
        let before = on.clone();
        assert!(minimize(&pi, &mut on, &pi.new_list(), true, false).is_err());
        assert_eq!(on, before);
    }

    #[test]
    fn test_progress() {
        let mut pi = ProblemInfo::new(2, 1);
        let rec = Rc::new(Recorder::default());
        pi.set_progress(rec.clone());
        let mut on = pi.parse_list(&["01 1", "11 1"]).unwrap();
        minimize(&pi, &mut on, &pi.new_list(), false, false).unwrap();
        let events = rec.events.borrow();
        assert_eq!(events.first().map(|s| s.as_str()), Some("start Minimize 0"));
        assert_eq!(events.last().map(|s| s.as_str()), Some("finish Minimize"));
        assert!(events.contains(&"start Primes 2".to_string()));
        assert!(events.contains(&"finish Irredundant".to_string()));
    }

    #[test]
    fn test_progress_messages() {
        let mut pi = ProblemInfo::new(2, 1);
        let rec = Rc::new(Recorder::default());
        pi.set_progress(rec.clone());
        let mut on = pi.parse_list(&["01 1", "11 1"]).unwrap();
        minimize(&pi, &mut on, &pi.new_list(), true, false).unwrap();
        let events = rec.events.borrow();
        assert!(events.contains(&"Initial cover: 1 cubes, 1 literals".to_string()));
        assert!(events.contains(&"advance Minimize 1".to_string()));
    }

    #[test]
    fn test_random_invariants() {
        for seed in 0..30 {
            let pi = ProblemInfo::new(6, 2);
            let f = random_cover(&pi, 12, 0.3, seed);
            for (greedy, weighted) in [(false, false), (true, false), (true, true)] {
                let mut on = f.clone();
                minimize(&pi, &mut on, &pi.new_list(), greedy, weighted).unwrap();
                assert!(on.len() <= f.len());
                assert!(on.literal_count() <= f.literal_count());
                for o in 0..pi.nb_outputs() {
                    assert_eq!(
                        to_lut(&pi, &on, o).unwrap(),
                        to_lut(&pi, &f, o).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn test_random_primes() {
        for seed in 0..30 {
            let pi = ProblemInfo::new(5, 3);
            let f = random_cover(&pi, 10, 0.4, seed);
            let mut p = f.clone();
            primes(&pi, &mut p, &pi.new_list()).unwrap();
            assert!(is_equivalent(&pi, &f, &p).unwrap());
            // Primes only generalize cubes
            for c in f.iter().filter(|c| !c.is_void()) {
                assert!(p.iter().any(|q| q.contains(c).unwrap()));
            }
        }
    }

    #[test]
    fn test_random_dont_care() {
        for seed in 0..20 {
            let pi = ProblemInfo::new(5, 2);
            let f = random_cover(&pi, 8, 0.4, seed);
            let dc = random_cover(&pi, 3, 0.5, seed + 1000);
            let mut on = f.clone();
            minimize(&pi, &mut on, &dc, true, false).unwrap();
            // f ⊆ on ⊆ f ∪ dc
            assert!(f.is_subset_of(&pi, &on.union_with(&dc).unwrap()).unwrap());
            assert!(on.is_subset_of(&pi, &f.union_with(&dc).unwrap()).unwrap());
        }
    }
}
