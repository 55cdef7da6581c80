use fxhash::FxHashMap;

use super::list::CubeList;
use super::tautology::covers_cube;
use crate::cube::Cube;
use crate::error::Result;
use crate::problem::ProblemInfo;

/// Cofactor of each cube with respect to `p`, dropping the cubes that do not intersect it
pub(crate) fn cofactor_cubes(cubes: &[Cube], p: &Cube) -> Result<Vec<Cube>> {
    let mut ret = Vec::new();
    ret.try_reserve(cubes.len())?;
    ret.extend(cubes.iter().filter_map(|c| c.cofactor_by(p)));
    Ok(ret)
}

/// Remove void cubes, duplicates and cubes contained in another; first occurrence wins
pub(crate) fn scc_cubes(cubes: &mut Vec<Cube>) {
    let n = cubes.len();
    let keep: Vec<bool> = (0..n)
        .map(|i| {
            let c = &cubes[i];
            if c.is_void() {
                return false;
            }
            !(0..n).any(|j| {
                j != i && !cubes[j].is_void() && cubes[j].covers(c) && (j < i || cubes[j] != *c)
            })
        })
        .collect();
    let mut it = keep.iter();
    cubes.retain(|_| *it.next().unwrap_or(&false));
}

/// Merge cubes with identical inputs by combining their outputs; first occurrence wins
pub(crate) fn merge_same_inputs(cubes: &mut Vec<Cube>) -> Result<()> {
    let mut index: FxHashMap<Vec<u64>, usize> = FxHashMap::default();
    index.try_reserve(cubes.len())?;
    let mut ret: Vec<Cube> = Vec::new();
    ret.try_reserve(cubes.len())?;
    for c in cubes.drain(..) {
        match index.get(c.in_words()) {
            Some(&i) => {
                let merged = ret[i].join(&c);
                ret[i] = merged;
            }
            None => {
                index.insert(c.in_words().to_vec(), ret.len());
                ret.push(c);
            }
        }
    }
    *cubes = ret;
    Ok(())
}

impl CubeList {
    /// Pairwise intersections of the cubes of both lists, skipping void results
    ///
    /// The lists must have the same shape.
    pub fn intersection_iter<'a>(&'a self, other: &'a CubeList) -> impl Iterator<Item = Cube> + 'a {
        debug_assert_eq!(self.shape(), other.shape());
        self.iter().flat_map(move |a| {
            other.iter().filter_map(move |b| {
                if a.intersects(b) {
                    Some(a.meet(b))
                } else {
                    None
                }
            })
        })
    }

    /// List of all non-void pairwise intersections
    pub fn intersection(&self, other: &CubeList) -> Result<CubeList> {
        self.shape().check(other.shape())?;
        let mut ret = CubeList::new(self.shape());
        for c in self.intersection_iter(other) {
            ret.push(c)?;
        }
        Ok(ret)
    }

    /// Remove void, duplicate and contained cubes (single cube containment)
    pub fn scc(&mut self) {
        scc_cubes(self.cubes_mut());
    }

    /// Merge the cubes with identical inputs, combining their outputs
    pub fn merge_outputs(&mut self) -> Result<()> {
        merge_same_inputs(self.cubes_mut())
    }

    /// Cubes asserting an output, restricted to this output
    pub fn restrict_to_output(&self, output: usize) -> Result<CubeList> {
        let mut mask = Cube::new(self.shape());
        mask.set_output(output, true)?;
        let mut ret = CubeList::new(self.shape());
        for c in self.iter() {
            if c.out(output) {
                ret.push(c.meet(&mask))?;
            }
        }
        Ok(ret)
    }

    /// Smallest cube containing every cube of the list, or None for an empty list
    pub fn supercube(&self) -> Option<Cube> {
        let mut it = self.iter().filter(|c| !c.is_void());
        let first = it.next()?.clone();
        Some(it.fold(first, |acc, c| acc.join(c)))
    }

    /// Cofactor of the list with respect to a cube
    pub fn cofactor(&self, p: &Cube) -> Result<CubeList> {
        self.shape().check(p.shape())?;
        Ok(CubeList::from_vec(
            self.shape(),
            cofactor_cubes(self.cubes(), p)?,
        ))
    }

    /// Returns true if every point of the cube is covered by the list
    pub fn contains_cube(&self, pi: &ProblemInfo, c: &Cube) -> Result<bool> {
        pi.check_list(self)?;
        pi.check_cube(c)?;
        covers_cube(pi, self.cubes(), c)
    }

    /// Returns true if some cube of the list shares a point with the cube
    pub fn intersects_cube(&self, c: &Cube) -> Result<bool> {
        self.shape().check(c.shape())?;
        Ok(self.iter().any(|d| d.intersects(c)))
    }

    /// Returns true if every point covered by this list is covered by the other
    pub fn is_subset_of(&self, pi: &ProblemInfo, other: &CubeList) -> Result<bool> {
        pi.check_list(self)?;
        pi.check_list(other)?;
        for c in self.iter() {
            if !covers_cube(pi, other.cubes(), c)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Points of this list outside the other list
    ///
    /// Each cube is split by the sharp operation against every cube of the other list,
    /// and the result is reduced by single cube containment.
    pub fn sharp(&self, other: &CubeList) -> Result<CubeList> {
        self.sharp_impl(other, false)
    }

    /// Points of this list outside the other list, as cubes that do not overlap
    /// within the part coming from each original cube
    pub fn disjoint_sharp(&self, other: &CubeList) -> Result<CubeList> {
        self.sharp_impl(other, true)
    }

    fn sharp_impl(&self, other: &CubeList, disjoint: bool) -> Result<CubeList> {
        self.shape().check(other.shape())?;
        let mut ret = Vec::new();
        for a in self.iter().filter(|c| !c.is_void()) {
            let mut parts = vec![a.clone()];
            for b in other.iter() {
                let mut next = Vec::new();
                for p in &parts {
                    let pieces = if disjoint {
                        p.disjoint_sharp_by(b)
                    } else {
                        p.sharp_by(b)
                    };
                    next.try_reserve(pieces.len())?;
                    next.extend(pieces);
                }
                if !disjoint {
                    scc_cubes(&mut next);
                }
                parts = next;
                if parts.is_empty() {
                    break;
                }
            }
            ret.try_reserve(parts.len())?;
            ret.extend(parts);
        }
        if !disjoint {
            scc_cubes(&mut ret);
        }
        Ok(CubeList::from_vec(self.shape(), ret))
    }

    /// Remove from this list the points of the other list
    ///
    /// On failure the list is left unchanged.
    pub fn subtract(&mut self, other: &CubeList) -> Result<()> {
        let ret = self.sharp(other)?;
        *self = ret;
        Ok(())
    }

    /// Remove the cubes entirely covered by a don't-care set
    pub fn restrict_by_dc(&mut self, pi: &ProblemInfo, dc: &CubeList) -> Result<()> {
        pi.check_list(self)?;
        pi.check_list(dc)?;
        let mut keep = Vec::new();
        keep.try_reserve(self.len())?;
        for c in self.iter() {
            keep.push(!covers_cube(pi, dc.cubes(), c)?);
        }
        let mut it = keep.iter();
        self.retain(|_| *it.next().unwrap_or(&true));
        Ok(())
    }
}
