//! Exact minimization as a covering problem solved with a SAT solver
//!
//! The ON-set minus the don't-care set is split into rows such that each prime either
//! contains a row or is disjoint from it. A cover is then a set of primes containing
//! every row; its size is minimized by repeatedly asking the solver for a smaller one.

use fxhash::FxHashSet;
use log::debug;
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Clause, Lit, TernaryVal};
use rustsat_kissat::Kissat;

use super::expand::{all_primes_bounded, care_cubes};
use crate::cover::CubeList;
use crate::cube::Cube;
use crate::error::{Error, Result};
use crate::problem::ProblemInfo;
use crate::progress::Task;

/// Bounds on the size of the exact minimization problem
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExactLimits {
    /// Maximum number of prime implicants
    pub max_primes: usize,
    /// Maximum number of rows of the covering problem
    pub max_elements: usize,
}

impl Default for ExactLimits {
    fn default() -> Self {
        ExactLimits {
            max_primes: 10_000,
            max_elements: 100_000,
        }
    }
}

fn solver_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Solver(e.to_string())
}

/// Covering problem: for each row, the primes that contain it
struct CoverProblem {
    nb_primes: usize,
    rows: Vec<Vec<usize>>,
}

impl CoverProblem {
    fn build(primes: &[Cube], on: &[Cube], dc: &[Cube], limits: &ExactLimits) -> Result<Self> {
        let mut elements: Vec<Cube> = Vec::new();
        for c in on {
            let mut parts = vec![c.clone()];
            for d in dc {
                parts = parts.iter().flat_map(|p| p.disjoint_sharp_by(d)).collect();
            }
            elements.try_reserve(parts.len())?;
            elements.extend(parts);
        }

        // Split the elements until each prime contains them or misses them
        for p in primes {
            let mut next = Vec::new();
            for e in elements {
                if !e.intersects(p) || p.covers(&e) {
                    next.push(e);
                } else {
                    let outside = e.disjoint_sharp_by(p);
                    next.try_reserve(outside.len() + 1)?;
                    next.push(e.meet(p));
                    next.extend(outside);
                }
            }
            if next.len() > limits.max_elements {
                return Err(Error::LimitExceeded {
                    what: "covering row",
                    limit: limits.max_elements,
                });
            }
            elements = next;
        }

        let mut seen = FxHashSet::default();
        let mut rows = Vec::new();
        for e in &elements {
            let row: Vec<usize> = (0..primes.len())
                .filter(|i| primes[*i].covers(e))
                .collect();
            debug_assert!(!row.is_empty());
            if seen.insert(row.clone()) {
                rows.push(row);
            }
        }
        Ok(CoverProblem {
            nb_primes: primes.len(),
            rows,
        })
    }

    /// Greedy cover, taking the prime that covers the most uncovered rows each time
    fn greedy(&self, weights: &[usize]) -> Vec<usize> {
        let mut prime_to_rows = vec![Vec::new(); self.nb_primes];
        for (r, row) in self.rows.iter().enumerate() {
            for p in row {
                prime_to_rows[*p].push(r);
            }
        }
        let mut nb_new: Vec<usize> = prime_to_rows.iter().map(|v| v.len()).collect();
        let mut covered = vec![false; self.rows.len()];
        let mut remaining = self.rows.len();
        let mut selected = Vec::new();
        while remaining > 0 {
            let Some(best) = (0..self.nb_primes)
                .filter(|p| nb_new[*p] > 0)
                .max_by(|a, b| {
                    nb_new[*a]
                        .cmp(&nb_new[*b])
                        .then(weights[*b].cmp(&weights[*a]))
                        .then(b.cmp(a))
                })
            else {
                break;
            };
            selected.push(best);
            for r in &prime_to_rows[best] {
                if !covered[*r] {
                    covered[*r] = true;
                    remaining -= 1;
                    for p in &self.rows[*r] {
                        nb_new[*p] -= 1;
                    }
                }
            }
        }
        selected.sort();
        selected
    }

    /// Find a cover satisfying every weighted bound, or None if there is none
    fn solve(&self, bounds: &[(&[usize], usize)]) -> Result<Option<Vec<usize>>> {
        let mut solver = Kissat::default();
        let x: Vec<Lit> = (0..self.nb_primes)
            .map(|i| Lit::positive(i as u32))
            .collect();
        for row in &self.rows {
            let clause: Clause = row.iter().map(|p| x[*p]).collect();
            solver.add_clause(clause).map_err(solver_error)?;
        }
        let mut next_var = self.nb_primes as u32;
        for (weights, bound) in bounds {
            for clause in at_most(&x, weights, *bound, &mut next_var) {
                solver.add_clause(clause).map_err(solver_error)?;
            }
        }
        match solver.solve().map_err(solver_error)? {
            SolverResult::Sat => {
                let mut ret = Vec::new();
                for (i, l) in x.iter().enumerate() {
                    if solver.lit_val(*l).map_err(solver_error)? == TernaryVal::True {
                        ret.push(i);
                    }
                }
                Ok(Some(ret))
            }
            SolverResult::Unsat => Ok(None),
            SolverResult::Interrupted => Err(Error::Solver("interrupted".to_string())),
        }
    }
}

/// Clauses for a weighted at-most constraint, using a sequential weight counter
///
/// Counter literal `s[i][j]` is implied when the selected weights among the first
/// `i + 1` literals reach `j + 1`.
fn at_most(lits: &[Lit], weights: &[usize], bound: usize, next_var: &mut u32) -> Vec<Clause> {
    let mut fresh = || {
        let l = Lit::positive(*next_var);
        *next_var += 1;
        l
    };
    let mut ret = Vec::new();
    let mut prev: Option<Vec<Lit>> = None;
    for (x, &w) in lits.iter().zip(weights.iter()) {
        if w == 0 {
            continue;
        }
        if w > bound {
            ret.push([!*x].into_iter().collect());
            continue;
        }
        let s: Vec<Lit> = (0..bound).map(|_| fresh()).collect();
        for j in 0..w {
            ret.push([!*x, s[j]].into_iter().collect());
        }
        if let Some(p) = &prev {
            for j in 0..bound {
                ret.push([!p[j], s[j]].into_iter().collect());
                if j + w < bound {
                    ret.push([!*x, !p[j], s[j + w]].into_iter().collect());
                }
            }
            // Overflow: the previous sum plus this weight would exceed the bound
            ret.push([!*x, !p[bound - w]].into_iter().collect());
        }
        prev = Some(s);
    }
    ret
}

/// Tighten the greedy cover with the SAT solver until no smaller one exists
fn smallest_cover(
    pi: &ProblemInfo,
    problem: &CoverProblem,
    literals: &[usize],
    weight_by_literals: bool,
) -> Result<Vec<usize>> {
    let ones = vec![1; problem.nb_primes];
    let ones: &[usize] = &ones;
    let mut best = problem.greedy(literals);
    while !best.is_empty() {
        match problem.solve(&[(ones, best.len() - 1)])? {
            Some(sol) => best = sol,
            None => break,
        }
        pi.notify(|p| p.advance(Task::ExactCover, best.len()));
    }
    if weight_by_literals {
        let cost = |sol: &[usize]| sol.iter().map(|i| literals[*i]).sum::<usize>();
        let size = best.len();
        while cost(&best) > 0 {
            match problem.solve(&[(ones, size), (literals, cost(&best) - 1)])? {
                Some(sol) => best = sol,
                None => break,
            }
        }
    }
    Ok(best)
}

/// Minimum cover of the ON-set by primes of ON ∪ DC
fn exact_cover(
    pi: &ProblemInfo,
    on: &CubeList,
    dc: &CubeList,
    weight_by_literals: bool,
    limits: &ExactLimits,
) -> Result<Vec<Cube>> {
    let care = care_cubes(on, dc)?;
    let primes = all_primes_bounded(&care, Some(limits.max_primes))?;
    let on_cubes: Vec<Cube> = on.iter().filter(|c| !c.is_void()).cloned().collect();
    let dc_cubes: Vec<Cube> = dc.iter().filter(|c| !c.is_void()).cloned().collect();
    let problem = CoverProblem::build(&primes, &on_cubes, &dc_cubes, limits)?;
    debug!(
        "Exact cover with {} primes and {} rows",
        primes.len(),
        problem.rows.len()
    );
    let literals: Vec<usize> = primes.iter().map(|c| c.literal_count()).collect();
    let best = pi.run_task(Task::ExactCover, 0, || {
        smallest_cover(pi, &problem, &literals, weight_by_literals)
    })?;
    debug!("Exact cover of size {}", best.len());
    Ok(best.into_iter().map(|i| primes[i].clone()).collect())
}

/// Replace the ON-set by a cover with the minimum number of primes
///
/// With literal weighting, ties between minimum covers are broken towards fewer literals.
/// Fails with [`Error::LimitExceeded`] if the problem exceeds the limits; the list is then
/// left unchanged.
pub fn minimize_exact(
    pi: &ProblemInfo,
    on: &mut CubeList,
    dc: &CubeList,
    weight_by_literals: bool,
    limits: &ExactLimits,
) -> Result<()> {
    pi.check_list(on)?;
    pi.check_list(dc)?;
    let cubes = exact_cover(pi, on, dc, weight_by_literals, limits)?;
    *on = CubeList::from_vec(pi.shape(), cubes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equiv::is_equivalent;
    use crate::generators::{majority, random_cover};
    use crate::minimize::minimize;

    #[test]
    fn test_xor() {
        let pi = ProblemInfo::new(2, 1);
        let mut on = pi.parse_list(&["01 1", "10 1"]).unwrap();
        minimize_exact(&pi, &mut on, &pi.new_list(), false, &ExactLimits::default()).unwrap();
        assert_eq!(on.len(), 2);
        assert_eq!(on.literal_count(), 4);
    }

    #[test]
    fn test_majority() {
        let (pi, f) = majority(5).unwrap();
        let mut on = f.clone();
        minimize_exact(&pi, &mut on, &pi.new_list(), true, &ExactLimits::default()).unwrap();
        // One cube per subset of 3 inputs
        assert_eq!(on.len(), 10);
        assert_eq!(on.literal_count(), 30);
        assert!(is_equivalent(&pi, &on, &f).unwrap());
    }

    #[test]
    fn test_cyclic() {
        // Cyclic cover: no essential prime, minimum is 3 out of 6 primes
        let pi = ProblemInfo::new(3, 1);
        let f = pi
            .parse_list(&["001 1", "011 1", "010 1", "110 1", "100 1", "101 1"])
            .unwrap();
        let mut on = f.clone();
        minimize_exact(&pi, &mut on, &pi.new_list(), false, &ExactLimits::default()).unwrap();
        assert_eq!(on.len(), 3);
        assert!(is_equivalent(&pi, &on, &f).unwrap());
    }

    #[test]
    fn test_dont_care() {
        let pi = ProblemInfo::new(2, 1);
        let mut on = pi.parse_list(&["00 1"]).unwrap();
        let dc = pi.parse_list(&["01 1", "11 1"]).unwrap();
        minimize_exact(&pi, &mut on, &dc, true, &ExactLimits::default()).unwrap();
        assert_eq!(on, pi.parse_list(&["0- 1"]).unwrap());

        // ON-set inside the don't-care set needs no cube
        let mut on = pi.parse_list(&["01 1"]).unwrap();
        minimize_exact(&pi, &mut on, &dc, false, &ExactLimits::default()).unwrap();
        assert!(on.is_empty());
    }

    #[test]
    fn test_limits() {
        let (pi, f) = majority(5).unwrap();
        let mut on = f.clone();
        let limits = ExactLimits {
            max_primes: 4,
            max_elements: 100,
        };
        let err = minimize_exact(&pi, &mut on, &pi.new_list(), false, &limits).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { .. }));
        assert_eq!(on, f);
    }

    #[test]
    fn test_not_worse_than_heuristic() {
        for seed in 0..10 {
            let pi = ProblemInfo::new(5, 2);
            let f = random_cover(&pi, 8, 0.4, seed);
            let mut exact = f.clone();
            minimize_exact(&pi, &mut exact, &pi.new_list(), false, &ExactLimits::default())
                .unwrap();
            let mut heuristic = f.clone();
            minimize(&pi, &mut heuristic, &pi.new_list(), true, false).unwrap();
            assert!(exact.len() <= heuristic.len());
            assert!(is_equivalent(&pi, &exact, &f).unwrap());
        }
    }

    #[test]
    fn test_at_most_encoding() {
        // Check the counter clauses against every assignment of 4 literals
        let lits: Vec<Lit> = (0..4).map(Lit::positive).collect();
        let weights = [2, 1, 0, 3];
        for bound in 0..5 {
            let mut next_var = 4;
            let clauses = at_most(&lits, &weights, bound, &mut next_var);
            for assignment in 0..16u32 {
                let sum: usize = (0..4)
                    .filter(|i| assignment >> i & 1 != 0)
                    .map(|i| weights[i])
                    .sum();
                let mut solver = Kissat::default();
                for c in &clauses {
                    solver.add_clause(c.clone()).unwrap();
                }
                for (i, l) in lits.iter().enumerate() {
                    let lit = if assignment >> i & 1 != 0 { *l } else { !*l };
                    solver.add_clause([lit].into_iter().collect()).unwrap();
                }
                let res = solver.solve().unwrap();
                assert_eq!(res == SolverResult::Sat, sum <= bound);
            }
        }
    }
}
