use fxhash::FxHashMap;
use log::trace;

use super::algebra::{cofactor_cubes, merge_same_inputs, scc_cubes};
use super::list::CubeList;
use crate::cube::{Cube, Value};
use crate::error::Result;
use crate::problem::ProblemInfo;
use crate::progress::Task;
use crate::split::{select, Split, SplitMode};

/// Complement of a list of non-void cubes, in the combined input and output space
///
/// The cubes are split recursively on input variables or output groups. The halves
/// of an input split that only differ by the split variable are merged back.
pub(crate) fn complement(pi: &ProblemInfo, cubes: &[Cube]) -> Result<Vec<Cube>> {
    let shape = pi.shape();
    if cubes.is_empty() {
        return Ok(vec![Cube::universe(shape)]);
    }
    if cubes.iter().any(|c| c.is_tautology()) {
        return Ok(Vec::new());
    }
    if cubes.len() == 1 {
        return Ok(cubes[0].complement());
    }
    if cubes.iter().all(|c| c.is_input_universe()) {
        let mut missing = Cube::new(shape);
        for (w, o) in missing.out_words_mut().iter_mut().enumerate() {
            let covered = cubes.iter().fold(0, |acc, c| acc | c.out_words()[w]);
            *o = !covered & shape.out_mask(w);
        }
        return Ok(if missing.is_out_empty() || shape.nb_outputs() == 0 {
            Vec::new()
        } else {
            vec![missing]
        });
    }

    let Some(split) = select(pi, cubes, SplitMode::AnyLiteral) else {
        return complement_by_sharp(pi, cubes);
    };
    trace!("Complement split on {:?} for {} cubes", split, cubes.len());
    let [a, b] = split.sides(shape);
    let left = complement_side(pi, cubes, &a)?;
    let right = complement_side(pi, cubes, &b)?;
    let mut ret = match split {
        Split::Input(var) => merge_halves(var, left, right)?,
        Split::Output(_) => {
            let mut ret = left;
            ret.try_reserve(right.len())?;
            ret.extend(right);
            merge_same_inputs(&mut ret)?;
            ret
        }
    };
    scc_cubes(&mut ret);
    Ok(ret)
}

/// Complement of the cofactor, restricted to the side
fn complement_side(pi: &ProblemInfo, cubes: &[Cube], side: &Cube) -> Result<Vec<Cube>> {
    let sub = cofactor_cubes(cubes, side)?;
    let mut ret = complement(pi, &sub)?;
    for c in ret.iter_mut() {
        c.meet_assign(side);
    }
    ret.retain(|c| !c.is_void());
    Ok(ret)
}

/// Join the two halves of an input split, merging cubes that only differ on the variable
fn merge_halves(var: usize, left: Vec<Cube>, right: Vec<Cube>) -> Result<Vec<Cube>> {
    let mut ret = Vec::new();
    ret.try_reserve(left.len() + right.len())?;
    let mut index: FxHashMap<Cube, usize> = FxHashMap::default();
    for c in left {
        let mut key = c.clone();
        key.put(var, Value::DontCare);
        index.insert(key, ret.len());
        ret.push(c);
    }
    for c in right {
        let mut key = c.clone();
        key.put(var, Value::DontCare);
        match index.remove(&key) {
            Some(i) => ret[i] = key,
            None => ret.push(c),
        }
    }
    Ok(ret)
}

/// Complement by removing every cube from the universe in turn
fn complement_by_sharp(pi: &ProblemInfo, cubes: &[Cube]) -> Result<Vec<Cube>> {
    let mut ret = vec![Cube::universe(pi.shape())];
    for c in cubes {
        let mut next = Vec::new();
        for r in &ret {
            let pieces = r.sharp_by(c);
            next.try_reserve(pieces.len())?;
            next.extend(pieces);
        }
        scc_cubes(&mut next);
        ret = next;
    }
    Ok(ret)
}

impl CubeList {
    /// Complement of the list: every point of the input and output space it does not cover
    pub fn complement(&self, pi: &ProblemInfo) -> Result<CubeList> {
        pi.check_list(self)?;
        let cubes: Vec<Cube> = self.iter().filter(|c| !c.is_void()).cloned().collect();
        let ret = pi.run_task(Task::Complement, 0, || complement(pi, &cubes))?;
        Ok(CubeList::from_vec(self.shape(), ret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::random_cover;

    fn complement_of(pi: &ProblemInfo, s: &[&str]) -> CubeList {
        let mut ret = pi.parse_list(s).unwrap().complement(pi).unwrap();
        ret.sort();
        ret
    }

    fn sorted(pi: &ProblemInfo, s: &[&str]) -> CubeList {
        let mut ret = pi.parse_list(s).unwrap();
        ret.sort();
        ret
    }

    #[test]
    fn test_single_input() {
        let pi = ProblemInfo::new(1, 1);
        assert_eq!(complement_of(&pi, &["0 1"]), sorted(&pi, &["1 1"]));
        assert_eq!(complement_of(&pi, &[]), sorted(&pi, &["- 1"]));
        assert_eq!(complement_of(&pi, &["0 1", "1 1"]), sorted(&pi, &[]));
    }

    #[test]
    fn test_xor() {
        let pi = ProblemInfo::new(2, 1);
        assert_eq!(
            complement_of(&pi, &["01 1", "10 1"]),
            sorted(&pi, &["00 1", "11 1"])
        );
    }

    #[test]
    fn test_merge() {
        let pi = ProblemInfo::new(3, 1);
        // Complement of a'b + ab is b', found on both sides of a split on a
        assert_eq!(
            complement_of(&pi, &["01- 1", "11- 1"]),
            sorted(&pi, &["-0- 1"])
        );
    }

    #[test]
    fn test_outputs() {
        let pi = ProblemInfo::new(1, 2);
        assert_eq!(
            complement_of(&pi, &["- 10", "0 01"]),
            sorted(&pi, &["1 01"])
        );
        assert_eq!(
            complement_of(&pi, &["- 10", "- 10"]),
            sorted(&pi, &["- 01"])
        );
        assert_eq!(
            complement_of(&pi, &["0 10", "1 01"]),
            sorted(&pi, &["1 10", "0 01"])
        );
    }

    #[test]
    fn test_void_ignored() {
        let pi = ProblemInfo::new(2, 1);
        assert_eq!(
            complement_of(&pi, &["0x 1", "0- 0", "1- 1"]),
            sorted(&pi, &["0- 1"])
        );
    }

    #[test]
    fn test_progress() {
        use crate::progress::Recorder;
        use std::rc::Rc;
        let mut pi = ProblemInfo::new(2, 1);
        let rec = Rc::new(Recorder::default());
        pi.set_progress(rec.clone());
        let l = pi.parse_list(&["01 1"]).unwrap();
        l.complement(&pi).unwrap();
        assert_eq!(
            *rec.events.borrow(),
            vec!["start Complement 0", "finish Complement"]
        );
    }

    #[test]
    fn test_random_partition() {
        for seed in 0..20 {
            let pi = ProblemInfo::new(6, 3);
            let f = random_cover(&pi, 8, 0.4, seed);
            let c = f.complement(&pi).unwrap();
            // The complement is disjoint from f, and together they cover everything
            for a in f.iter().filter(|c| !c.is_void()) {
                assert!(!c.intersects_cube(a).unwrap());
            }
            let mut all = f.clone();
            all.union(&c).unwrap();
            assert!(all.is_tautology(&pi).unwrap());
            // Double complement gives back the same function
            let cc = c.complement(&pi).unwrap();
            assert!(cc.is_subset_of(&pi, &f).unwrap());
            assert!(f.is_subset_of(&pi, &cc).unwrap());
        }
    }
}
