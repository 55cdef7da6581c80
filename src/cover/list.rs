use std::fmt;
use std::slice;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cube::{Cube, Shape};
use crate::error::{Error, Result};

/// An ordered list of cubes, representing a sum of products
///
/// The list records the shape of its cubes, and refuses cubes of another shape.
/// Duplicates are allowed and order is preserved, although it only matters for
/// tie-breaking in the algorithms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubeList {
    shape: Shape,
    cubes: Vec<Cube>,
}

impl CubeList {
    /// Create an empty list
    pub fn new(shape: Shape) -> CubeList {
        CubeList {
            shape,
            cubes: Vec::new(),
        }
    }

    /// Create the list holding the single universal cube
    pub fn universe(shape: Shape) -> CubeList {
        CubeList {
            shape,
            cubes: vec![Cube::universe(shape)],
        }
    }

    pub(crate) fn try_universe(shape: Shape) -> Result<CubeList> {
        let mut c = Cube::try_empty(shape)?;
        c.set_tautology();
        let mut ret = CubeList::new(shape);
        ret.push(c)?;
        Ok(ret)
    }

    /// Create a list from cubes, which must all have the given shape
    pub fn from_cubes(shape: Shape, cubes: Vec<Cube>) -> Result<CubeList> {
        for c in &cubes {
            shape.check(c.shape())?;
        }
        Ok(CubeList { shape, cubes })
    }

    /// Build a list from cubes known to have the right shape
    pub(crate) fn from_vec(shape: Shape, cubes: Vec<Cube>) -> CubeList {
        debug_assert!(cubes.iter().all(|c| c.shape() == shape));
        CubeList { shape, cubes }
    }

    /// Return the shape of the cubes
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of cubes
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Returns true if the list has no cube
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Get a cube by index
    pub fn get(&self, index: usize) -> Result<&Cube> {
        self.cubes.get(index).ok_or(Error::IndexError {
            what: "cube",
            index,
            count: self.cubes.len(),
        })
    }

    /// Iterate over the cubes
    pub fn iter(&self) -> slice::Iter<'_, Cube> {
        self.cubes.iter()
    }

    /// Cubes as a slice
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub(crate) fn cubes_mut(&mut self) -> &mut Vec<Cube> {
        &mut self.cubes
    }

    /// Move the cubes out of the list
    pub fn into_cubes(self) -> Vec<Cube> {
        self.cubes
    }

    /// Append a cube; duplicates are not removed
    pub fn push(&mut self, cube: Cube) -> Result<()> {
        self.shape.check(cube.shape())?;
        self.cubes.try_reserve(1)?;
        self.cubes.push(cube);
        Ok(())
    }

    /// Append a copy of a cube
    pub fn add(&mut self, cube: &Cube) -> Result<()> {
        self.push(cube.clone())
    }

    /// Append all cubes of another list, without any simplification
    pub fn union(&mut self, other: &CubeList) -> Result<()> {
        self.shape.check(other.shape)?;
        self.cubes.try_reserve(other.len())?;
        self.cubes.extend(other.cubes.iter().cloned());
        Ok(())
    }

    /// Union of two lists as a new list
    pub fn union_with(&self, other: &CubeList) -> Result<CubeList> {
        let mut ret = self.clone();
        ret.union(other)?;
        Ok(ret)
    }

    /// Remove all cubes, keeping the storage
    pub fn clear(&mut self) {
        self.cubes.clear();
    }

    /// Remove all cubes and release the storage
    pub fn release(&mut self) {
        self.cubes = Vec::new();
    }

    /// Remove a cube by index
    pub fn remove(&mut self, index: usize) -> Result<Cube> {
        if index >= self.cubes.len() {
            return Err(Error::IndexError {
                what: "cube",
                index,
                count: self.cubes.len(),
            });
        }
        Ok(self.cubes.remove(index))
    }

    /// Keep only the cubes satisfying the predicate
    pub fn retain<F: FnMut(&Cube) -> bool>(&mut self, f: F) {
        self.cubes.retain(f);
    }

    /// Remove cubes that represent no point
    pub fn remove_void(&mut self) {
        self.cubes.retain(|c| !c.is_void());
    }

    /// Widen the cubes to a larger shape: new inputs are don't-care, new outputs cleared
    pub fn adjust_shape(&mut self, shape: Shape) -> Result<()> {
        if shape == self.shape {
            return Ok(());
        }
        if shape.nb_inputs() < self.shape.nb_inputs() || shape.nb_outputs() < self.shape.nb_outputs()
        {
            return Err(Error::ShapeMismatch {
                expected: shape,
                found: self.shape,
            });
        }
        let mut cubes = Vec::new();
        cubes.try_reserve(self.cubes.len())?;
        for c in &self.cubes {
            let mut d = Cube::new(shape);
            for (i, v) in c.values().enumerate() {
                d.put(i, v);
            }
            for o in 0..c.nb_outputs() {
                d.put_out(o, c.out(o));
            }
            d.set_tag(c.tag());
            cubes.push(d);
        }
        self.shape = shape;
        self.cubes = cubes;
        Ok(())
    }

    /// Total number of input literals
    pub fn literal_count(&self) -> usize {
        self.cubes.iter().map(|c| c.literal_count()).sum()
    }

    /// Total number of output bits set
    pub fn output_literal_count(&self) -> usize {
        self.cubes.iter().map(|c| c.output_count()).sum()
    }

    /// Sort the cubes in their natural order
    pub fn sort(&mut self) {
        self.cubes.sort();
    }

    /// Shuffle the cubes with a seeded generator
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.cubes.shuffle(&mut rng);
    }
}

impl<'a> IntoIterator for &'a CubeList {
    type Item = &'a Cube;
    type IntoIter = slice::Iter<'a, Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.cubes.iter()
    }
}

impl fmt::Display for CubeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cubes {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}
