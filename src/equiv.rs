//! Equivalence checking on cube lists

use crate::cover::{cofactor_cubes, complement, covers_cube, CubeList};
use crate::cube::{Cube, Value};
use crate::error::Result;
use crate::problem::ProblemInfo;

/**
 * Reduce a non-void cube to a single point: don't-cares set to 0, first output only
 */
fn to_minterm(c: &Cube) -> Cube {
    let mut ret = c.clone();
    for var in 0..ret.nb_inputs() {
        if ret.value(var) == Value::DontCare {
            ret.put(var, Value::Zero);
        }
    }
    if let Some(first) = (0..ret.nb_outputs()).find(|o| ret.out(*o)) {
        for o in first + 1..ret.nb_outputs() {
            ret.put_out(o, false);
        }
    }
    ret
}

/**
 * Find a point of `a` not covered by `b`
 */
fn uncovered_point(pi: &ProblemInfo, a: &CubeList, b: &CubeList) -> Result<Option<Cube>> {
    for c in a.iter().filter(|c| !c.is_void()) {
        if covers_cube(pi, b.cubes(), c)? {
            continue;
        }
        let sub = cofactor_cubes(b.cubes(), c)?;
        for u in complement(pi, &sub)? {
            let d = u.meet(c);
            if !d.is_void() {
                return Ok(Some(to_minterm(&d)));
            }
        }
    }
    Ok(None)
}

/// Find a point covered by exactly one of the lists, or None if they are equivalent
///
/// The point is returned as a cube with no don't-care and a single output set.
pub fn find_difference(pi: &ProblemInfo, a: &CubeList, b: &CubeList) -> Result<Option<Cube>> {
    pi.check_list(a)?;
    pi.check_list(b)?;
    if let Some(p) = uncovered_point(pi, a, b)? {
        return Ok(Some(p));
    }
    uncovered_point(pi, b, a)
}

/// Returns true if the two lists cover the same points
///
/// Order and duplicates do not matter.
pub fn is_equivalent(pi: &ProblemInfo, a: &CubeList, b: &CubeList) -> Result<bool> {
    Ok(a.is_subset_of(pi, b)? && b.is_subset_of(pi, a)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::random_cover;

    #[test]
    fn test_reordered_duplicates() {
        let pi = ProblemInfo::new(3, 1);
        let l1 = pi.parse_list(&["01- 1", "1-0 1"]).unwrap();
        let l2 = pi.parse_list(&["1-0 1", "01- 1", "01- 1"]).unwrap();
        assert!(is_equivalent(&pi, &l1, &l2).unwrap());
        assert!(is_equivalent(&pi, &l2, &l1).unwrap());
        assert_eq!(find_difference(&pi, &l1, &l2).unwrap(), None);
    }

    #[test]
    fn test_different_shapes_of_same_function() {
        let pi = ProblemInfo::new(2, 1);
        let l1 = pi.parse_list(&["0- 1", "-1 1"]).unwrap();
        let l2 = pi.parse_list(&["00 1", "01 1", "11 1"]).unwrap();
        assert!(is_equivalent(&pi, &l1, &l2).unwrap());
    }

    #[test]
    fn test_witness() {
        let pi = ProblemInfo::new(3, 2);
        let l1 = pi.parse_list(&["01- 11", "1-0 10"]).unwrap();
        let l2 = pi.parse_list(&["01- 11", "1-- 10"]).unwrap();
        assert!(!is_equivalent(&pi, &l1, &l2).unwrap());
        let w = find_difference(&pi, &l1, &l2).unwrap().unwrap();
        assert_eq!(w.to_string(), "101 10");
        assert_eq!(w, find_difference(&pi, &l2, &l1).unwrap().unwrap());
    }

    #[test]
    fn test_empty() {
        let pi = ProblemInfo::new(2, 1);
        let e = pi.new_list();
        assert!(is_equivalent(&pi, &e, &e).unwrap());
        let void = pi.parse_list(&["0x 1", "01 0"]).unwrap();
        assert!(is_equivalent(&pi, &e, &void).unwrap());
        let w = find_difference(&pi, &e, pi.universe()).unwrap().unwrap();
        assert_eq!(w.to_string(), "00 1");
    }

    #[test]
    fn test_reflexive_symmetric() {
        for seed in 0..20 {
            let pi = ProblemInfo::new(6, 2);
            let a = random_cover(&pi, 10, 0.4, seed);
            let b = random_cover(&pi, 10, 0.4, seed + 100);
            assert!(is_equivalent(&pi, &a, &a).unwrap());
            let mut shuffled = a.clone();
            shuffled.shuffle(seed);
            assert!(is_equivalent(&pi, &a, &shuffled).unwrap());
            assert_eq!(
                is_equivalent(&pi, &a, &b).unwrap(),
                is_equivalent(&pi, &b, &a).unwrap()
            );
            match find_difference(&pi, &a, &b).unwrap() {
                None => assert!(is_equivalent(&pi, &a, &b).unwrap()),
                Some(w) => {
                    // The witness is in exactly one list
                    let in_a = a.intersects_cube(&w).unwrap();
                    let in_b = b.intersects_cube(&w).unwrap();
                    assert_ne!(in_a, in_b);
                }
            }
        }
    }
}
